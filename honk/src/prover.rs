//! This module implements the prover: it turns a satisfying [Trace] into a
//! [Proof] for a [ProverIndex].

use crate::{
    error::ProverError,
    proof::{Proof, CIRCUIT_SIZE_LABEL},
    prover_index::ProverIndex,
    relation::RelationParameters,
    sumcheck::SumcheckProver,
    trace::Trace,
};
use ark_ff::PrimeField;
use itertools::Itertools;
use poly_commitment::{
    gemini, shplonk, transcript::ManifestEntry, utils::powers, CommitmentScheme,
    ProverTranscript, ScalarField, Transcript,
};
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Label of the challenge batching the claimed evaluations.
pub const RHO_LABEL: &str = "rho";

/// Builds a proof that `trace` satisfies the relations of `index`.
pub fn prove<C: CommitmentScheme>(
    index: &ProverIndex<C>,
    trace: &Trace<ScalarField<C>>,
) -> Result<Proof, ProverError> {
    prove_with_manifest(index, trace).map(|(proof, _)| proof)
}

/// Same as [prove], also returning the label and byte range of every message
/// of the proof.
#[instrument(skip_all, fields(circuit_size = index.circuit_size, relations = index.relations.name()))]
pub fn prove_with_manifest<C: CommitmentScheme>(
    index: &ProverIndex<C>,
    trace: &Trace<ScalarField<C>>,
) -> Result<(Proof, Vec<ManifestEntry>), ProverError> {
    let relations = &index.relations;
    let schema = relations.schema();
    let n = index.circuit_size;

    //~ 1. Check the trace against the index: its size, its width, and that
    //~    every to-be-shifted column is zero on the first row.
    if trace.circuit_size() != n {
        return Err(ProverError::CircuitSizeMismatch(trace.circuit_size(), n));
    }
    if trace.width() != schema.n_columns() {
        return Err(ProverError::ColumnCountMismatch(
            trace.width(),
            schema.n_columns(),
        ));
    }
    if let Some(col) = trace.first_unshiftable(relations) {
        let name = schema.name(col).unwrap_or_default().to_string();
        return Err(ProverError::ShiftedColumnNotZeroAtOrigin(name));
    }

    let mut transcript = ProverTranscript::new();

    //~ 1. Send the circuit size.
    transcript.send_to_verifier(CIRCUIT_SIZE_LABEL, &(n as u32))?;

    //~ 1. Commit to every column, reading its values on the hypercube as the
    //~    coefficients of a univariate polynomial, and send the commitments
    //~    in schema order.
    let commitments: Vec<C::Curve> = trace
        .columns()
        .par_iter()
        .map(|column| C::commit(&index.srs, column))
        .collect::<Result<_, _>>()?;
    for (name, commitment) in schema.names().iter().zip(&commitments) {
        transcript.send_to_verifier(name, commitment)?;
    }
    debug!(columns = commitments.len(), "column commitments sent");

    //~ 1. Draw the relation parameters.
    let parameters = RelationParameters::draw(&mut transcript, relations.challenge_labels());

    //~ 1. Run the sumcheck on the columns followed by the shifted columns.
    let to_be_shifted = schema.to_be_shifted();
    let polynomials = trace
        .columns()
        .iter()
        .cloned()
        .chain(to_be_shifted.iter().map(|col| trace.shifted(*col)))
        .collect_vec();
    let sumcheck = SumcheckProver::new(relations, &parameters).prove(polynomials, &mut transcript)?;

    //~ 1. Draw `rho` and batch the columns into `F = sum_i rho^i c_i` and the
    //~    to-be-shifted columns into `G = sum_k rho^{N + k} c_k`, `N` being the
    //~    number of columns. The shifted evaluations are then those of `G / X`.
    let rho: ScalarField<C> = transcript.get_challenge(RHO_LABEL);
    let rhos = powers(rho, schema.n_evaluations());
    let (unshifted_rhos, shifted_rhos) = rhos.split_at(schema.n_columns());
    let unshifted = trace.columns().iter().map(|c| c.as_slice()).collect_vec();
    let shifted = to_be_shifted.iter().map(|col| trace.column(*col)).collect_vec();
    let batched_unshifted = batch_columns(&unshifted, unshifted_rhos, n);
    let batched_to_be_shifted = batch_columns(&shifted, shifted_rhos, n);

    //~ 1. Reduce the multilinear evaluation claims to univariate ones with
    //~    Gemini, batch them with Shplonk and open the result.
    let claims = gemini::prove::<C>(
        &index.srs,
        &sumcheck.challenge,
        &batched_unshifted,
        &batched_to_be_shifted,
        &mut transcript,
    )?;
    let claim = shplonk::prove::<C>(&index.srs, &claims, &mut transcript)?;
    C::open(&index.srs, &claim, &mut transcript)?;

    let manifest = transcript.manifest().to_vec();
    let proof = Proof::new(transcript.export_proof());
    debug!(bytes = proof.len(), "proof built");
    Ok((proof, manifest))
}

/// `sum_i scalars[i] * columns[i]`, row by row.
fn batch_columns<F: PrimeField>(columns: &[&[F]], scalars: &[F], n: usize) -> Vec<F> {
    (0..n)
        .into_par_iter()
        .map(|row| {
            columns
                .iter()
                .zip(scalars)
                .fold(F::zero(), |acc, (column, scalar)| acc + column[row] * scalar)
        })
        .collect()
}
