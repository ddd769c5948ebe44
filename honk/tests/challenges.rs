//! A relation set reading relation parameters, proved and verified end to
//! end.

use ark_ff::{UniformRand, Zero};
use honk::{
    columns::{Column, ColumnSchema},
    error::VerifyError,
    expr::{curr_cell, E},
    prover::prove,
    prover_index::ProverIndex,
    relation::{RelationSet, Subrelation},
    trace::{Row, Trace},
    verifier::{verify, verify_detailed},
    verifier_index::VerifierIndex,
    Fp, Kzg, PairingSRS,
};
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Arc;

const CIRCUIT_SIZE: usize = 16;

static SRS: Lazy<Arc<PairingSRS>> = Lazy::new(|| {
    let mut rng = StdRng::from_seed([9u8; 32]);
    Arc::new(unsafe { PairingSRS::create(Fp::rand(&mut rng), CIRCUIT_SIZE) })
});

/// `beta * a * (1 - a)` and `gamma * (c - a)`, the parameters being drawn in
/// the order of `labels`.
fn relations(labels: [&str; 2]) -> Arc<RelationSet<Fp>> {
    let a = curr_cell::<Fp>(Column::Relation(0));
    let c = curr_cell::<Fp>(Column::Relation(1));
    let (beta, gamma) = if labels[0] == "beta" {
        (E::Challenge(0), E::Challenge(1))
    } else {
        (E::Challenge(1), E::Challenge(0))
    };
    let schema = ColumnSchema::new(vec!["a".into(), "c".into()], vec![]).unwrap();
    let relations = RelationSet::new(
        "scaled_boolean",
        schema,
        vec![
            Subrelation::new("a_boolean", beta * a.clone() * (E::one() - a.clone()), 3),
            Subrelation::new("c_copies_a", gamma * (c - a), 2),
        ],
        labels.iter().map(|l| l.to_string()).collect(),
    )
    .unwrap();
    Arc::new(relations)
}

fn trace(rng: &mut StdRng, bad_row: Option<usize>) -> Trace<Fp> {
    let rows = (0..CIRCUIT_SIZE)
        .map(|i| {
            let a = if Some(i) == bad_row {
                Fp::from(3u64)
            } else {
                Fp::from(rng.gen_bool(0.5))
            };
            Row(vec![a, a])
        })
        .collect();
    Trace::from_rows(rows, 2).unwrap()
}

fn prover_index(labels: [&str; 2]) -> ProverIndex<Kzg> {
    ProverIndex::create(CIRCUIT_SIZE, relations(labels), Arc::clone(&SRS)).unwrap()
}

#[test]
fn a_satisfied_trace_verifies() {
    let mut rng = StdRng::from_seed([1u8; 32]);
    let index = prover_index(["beta", "gamma"]);
    let proof = prove(&index, &trace(&mut rng, None)).unwrap();
    assert_eq!(verify_detailed(&index.verifier_index(), &proof), Ok(()));
}

#[test]
fn a_violated_scaled_constraint_fails_the_sumcheck() {
    let mut rng = StdRng::from_seed([2u8; 32]);
    let index = prover_index(["beta", "gamma"]);
    let proof = prove(&index, &trace(&mut rng, Some(3))).unwrap();
    assert_eq!(
        verify_detailed(&index.verifier_index(), &proof),
        Err(VerifyError::SumcheckFailed)
    );
}

#[test]
fn parameters_are_drawn_in_declared_order() {
    let mut rng = StdRng::from_seed([3u8; 32]);
    let trace = trace(&mut rng, None);
    let proof = prove(&prover_index(["beta", "gamma"]), &trace).unwrap();

    // Same constraints, parameters declared the other way round: the labels
    // absorbed differ, so every later challenge does too.
    let swapped =
        VerifierIndex::<Kzg>::create(CIRCUIT_SIZE, relations(["gamma", "beta"]), Arc::clone(&SRS))
            .unwrap();
    assert!(!verify(&swapped, &proof));

    let swapped_proof = prove(&prover_index(["gamma", "beta"]), &trace).unwrap();
    assert_ne!(proof, swapped_proof);
    assert!(verify(&swapped, &swapped_proof));
}

#[test]
fn an_all_zero_trace_verifies() {
    // Every commitment is the identity.
    let index = prover_index(["beta", "gamma"]);
    let rows = vec![Row(vec![Fp::zero(); 2]); CIRCUIT_SIZE];
    let proof = prove(&index, &Trace::from_rows(rows, 2).unwrap()).unwrap();
    assert!(verify(&index.verifier_index(), &proof));
}
