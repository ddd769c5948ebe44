use ark_bn254::{Bn254, Fr, G1Affine};
use ark_ec::AffineRepr;
use ark_ff::{UniformRand, Zero};
use once_cell::sync::Lazy;
use poly_commitment::{
    gemini::{self, multilinear_evaluation},
    kzg::{PairingSRS, KZG},
    shplonk,
    utils::{batch_commitments, inner_product, powers},
    CommitmentScheme, ProverTranscript, Transcript, VerifierTranscript,
};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

type Pcs = KZG<Bn254>;

const LOG_SIZE: usize = 4;
const SIZE: usize = 1 << LOG_SIZE;

static SRS: Lazy<PairingSRS<Bn254>> = Lazy::new(|| {
    let mut rng = StdRng::from_seed([42u8; 32]);
    unsafe { PairingSRS::create(Fr::rand(&mut rng), SIZE) }
});

struct Instance {
    unshifted: Vec<Vec<Fr>>,
    to_be_shifted: Vec<Vec<Fr>>,
}

fn random_instance(rng: &mut StdRng, zero_column: bool) -> Instance {
    let mut unshifted: Vec<Vec<Fr>> = (0..3)
        .map(|_| (0..SIZE).map(|_| Fr::rand(rng)).collect())
        .collect();
    if zero_column {
        unshifted[1] = vec![Fr::zero(); SIZE];
    }
    let to_be_shifted = (0..2)
        .map(|_| {
            let mut column: Vec<Fr> = (0..SIZE).map(|_| Fr::rand(rng)).collect();
            column[0] = Fr::zero();
            column
        })
        .collect();
    Instance {
        unshifted,
        to_be_shifted,
    }
}

fn shift(column: &[Fr]) -> Vec<Fr> {
    let mut shifted = column[1..].to_vec();
    shifted.push(Fr::zero());
    shifted
}

/// Runs the prover and verifier sides of the multilinear opening for the
/// claimed evaluations, returning whether the final pairing check passed.
fn open_and_verify(instance: &Instance, u: &[Fr], tamper: Option<usize>) -> bool {
    let mut evaluations: Vec<Fr> = instance
        .unshifted
        .iter()
        .map(|c| multilinear_evaluation(c, u))
        .chain(
            instance
                .to_be_shifted
                .iter()
                .map(|c| multilinear_evaluation(&shift(c), u)),
        )
        .collect();
    if let Some(i) = tamper {
        evaluations[i] += Fr::from(1u64);
    }

    let unshifted_commitments: Vec<G1Affine> = instance
        .unshifted
        .iter()
        .map(|c| Pcs::commit(&SRS, c).unwrap())
        .collect();
    let shifted_commitments: Vec<G1Affine> = instance
        .to_be_shifted
        .iter()
        .map(|c| Pcs::commit(&SRS, c).unwrap())
        .collect();

    // Prover
    let mut prover = ProverTranscript::new();
    let rho: Fr = prover.get_challenge("rho");
    let rhos = powers(rho, evaluations.len());
    let mut f = vec![Fr::zero(); SIZE];
    let mut g = vec![Fr::zero(); SIZE];
    for (column, scalar) in instance.unshifted.iter().zip(&rhos) {
        for (acc, v) in f.iter_mut().zip(column) {
            *acc += *scalar * v;
        }
    }
    for (column, scalar) in instance
        .to_be_shifted
        .iter()
        .zip(&rhos[instance.unshifted.len()..])
    {
        for (acc, v) in g.iter_mut().zip(column) {
            *acc += *scalar * v;
        }
    }
    let claims = gemini::prove::<Pcs>(&SRS, u, &f, &g, &mut prover).unwrap();
    let batched = shplonk::prove::<Pcs>(&SRS, &claims, &mut prover).unwrap();
    Pcs::open(&SRS, &batched, &mut prover).unwrap();
    let proof = prover.export_proof();

    // Verifier
    let mut verifier = VerifierTranscript::new(&proof);
    let rho: Fr = verifier.get_challenge("rho");
    let rhos = powers(rho, evaluations.len());
    let batched_evaluation = inner_product(&evaluations, &rhos);
    let n_unshifted = unshifted_commitments.len();
    let batched_f = batch_commitments(&unshifted_commitments, &rhos[..n_unshifted]).unwrap();
    let batched_g = batch_commitments(&shifted_commitments, &rhos[n_unshifted..]).unwrap();
    let claims = gemini::reduce_verification::<G1Affine>(
        u,
        batched_evaluation,
        batched_f.commitment,
        batched_g.commitment,
        &mut verifier,
    )
    .unwrap();
    let claim = shplonk::reduce_verification(&claims, &mut verifier).unwrap();
    let verified = Pcs::verify(&SRS, &claim, &mut verifier).unwrap();
    assert!(verifier.is_exhausted());
    verified
}

#[test]
fn multilinear_claims_with_shifts_verify() {
    let mut rng = StdRng::from_seed([1u8; 32]);
    let instance = random_instance(&mut rng, false);
    let u: Vec<Fr> = (0..LOG_SIZE).map(|_| Fr::rand(&mut rng)).collect();
    assert!(open_and_verify(&instance, &u, None));
}

#[test]
fn zero_columns_commit_to_identity_and_still_verify() {
    let mut rng = StdRng::from_seed([2u8; 32]);
    let instance = random_instance(&mut rng, true);
    assert!(Pcs::commit(&SRS, &instance.unshifted[1]).unwrap().is_zero());
    let u: Vec<Fr> = (0..LOG_SIZE).map(|_| Fr::rand(&mut rng)).collect();
    assert!(open_and_verify(&instance, &u, None));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(6))]

    #[test]
    fn a_wrong_claimed_evaluation_is_rejected(seed in any::<[u8; 32]>(), index in 0usize..5) {
        let mut rng = StdRng::from_seed(seed);
        let instance = random_instance(&mut rng, false);
        let u: Vec<Fr> = (0..LOG_SIZE).map(|_| Fr::rand(&mut rng)).collect();
        prop_assert!(!open_and_verify(&instance, &u, Some(index)));
    }
}
