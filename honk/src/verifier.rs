//! This module implements the verifier: it reads a [Proof] back in the order
//! the prover wrote it and checks it against a [VerifierIndex].

use crate::{
    error::VerifyError,
    proof::{Proof, CIRCUIT_SIZE_LABEL},
    prover::RHO_LABEL,
    relation::RelationParameters,
    sumcheck::SumcheckVerifier,
    verifier_index::VerifierIndex,
};
use itertools::Itertools;
use poly_commitment::{
    gemini, shplonk,
    utils::{batch_commitments, inner_product, powers},
    CommitmentScheme, ScalarField, Transcript, VerifierTranscript,
};
use tracing::{debug, instrument, warn};

/// `true` if and only if the proof verifies. Never panics on the proof
/// bytes.
pub fn verify<C: CommitmentScheme>(index: &VerifierIndex<C>, proof: &Proof) -> bool {
    verify_detailed(index, proof).is_ok()
}

/// Verifies the proof, reporting why it is rejected.
///
/// Only a circuit size mismatch stops the verifier early. Failed checks are
/// recorded and the rest of the proof is still read, so that a proof of the
/// wrong length is reported as such.
#[instrument(skip_all, fields(circuit_size = index.circuit_size, relations = index.relations.name()))]
pub fn verify_detailed<C: CommitmentScheme>(
    index: &VerifierIndex<C>,
    proof: &Proof,
) -> Result<(), VerifyError> {
    let relations = &index.relations;
    let schema = relations.schema();
    let mut transcript = VerifierTranscript::new(&proof.proof_data);

    //~ 1. Read the circuit size and reject right away if it is not the one of
    //~    the index.
    let circuit_size: u32 = transcript.receive_from_prover(CIRCUIT_SIZE_LABEL)?;
    let expected = index.circuit_size as u32;
    if circuit_size != expected {
        warn!(circuit_size, expected, "circuit size mismatch");
        return Err(VerifyError::CircuitSizeMismatch(circuit_size, expected));
    }

    //~ 1. Read one commitment per column, in schema order.
    let commitments: Vec<C::Curve> = schema
        .names()
        .iter()
        .map(|name| transcript.receive_from_prover(name))
        .collect::<Result<_, _>>()?;

    //~ 1. Draw the relation parameters.
    let parameters = RelationParameters::draw(&mut transcript, relations.challenge_labels());

    //~ 1. Run the sumcheck verifier.
    let sumcheck =
        SumcheckVerifier::new(relations, &parameters, index.multivariate_d()).verify(&mut transcript);
    let sumcheck_verified = sumcheck.verified.ok_or(VerifyError::MalformedSumcheck)?;

    //~ 1. Draw `rho`, batch the claimed evaluations and the commitments with
    //~    its powers. Commitments to the identity are left out.
    let rho: ScalarField<C> = transcript.get_challenge(RHO_LABEL);
    let rhos = powers(rho, schema.n_evaluations());
    let batched_evaluation = inner_product(&sumcheck.claimed_evaluations.to_vec(), &rhos);
    let (unshifted_rhos, shifted_rhos) = rhos.split_at(schema.n_columns());
    let shifted_commitments = schema
        .to_be_shifted()
        .iter()
        .map(|col| commitments[col.index()])
        .collect_vec();
    let batched_f = batch_commitments(&commitments, unshifted_rhos)?;
    let batched_g = batch_commitments(&shifted_commitments, shifted_rhos)?;
    if !batched_f.excluded.is_empty() {
        let names = batched_f
            .excluded
            .iter()
            .filter_map(|i| schema.names().get(*i))
            .join(", ");
        debug!(%names, "columns committing to the identity");
    }

    //~ 1. Reduce the evaluation claims through Gemini and Shplonk and check
    //~    the final opening.
    let claims = gemini::reduce_verification::<C::Curve>(
        &sumcheck.challenge,
        batched_evaluation,
        batched_f.commitment,
        batched_g.commitment,
        &mut transcript,
    )?;
    let claim = shplonk::reduce_verification(&claims, &mut transcript)?;
    let opening_verified = C::verify(&index.srs, &claim, &mut transcript)?;

    //~ 1. Check that the whole proof was read.
    if !transcript.is_exhausted() {
        warn!(remaining = transcript.remaining(), "trailing bytes in the proof");
        return Err(VerifyError::TrailingBytes(transcript.remaining()));
    }
    if !sumcheck_verified {
        return Err(VerifyError::SumcheckFailed);
    }
    if !opening_verified {
        warn!("opening proof rejected");
        return Err(VerifyError::OpeningFailed);
    }
    debug!("proof verified");
    Ok(())
}
