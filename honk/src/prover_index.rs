//! This module implements the prover index as [ProverIndex].

use crate::{
    error::SetupError, relation::RelationSet, verifier_index::VerifierIndex, MIN_CIRCUIT_SIZE,
};
use poly_commitment::{CommitmentScheme, ScalarField};
use std::sync::Arc;
use tracing::debug;

/// Checks that `circuit_size` is a power of two of at least 2 that fits the
/// `u32` sent in proofs, and that the SRS can commit to its columns.
pub(crate) fn check_circuit_size<C: CommitmentScheme>(
    circuit_size: usize,
    srs: &C::SRS,
) -> Result<(), SetupError> {
    if circuit_size < MIN_CIRCUIT_SIZE
        || !circuit_size.is_power_of_two()
        || u32::try_from(circuit_size).is_err()
    {
        return Err(SetupError::InvalidCircuitSize(circuit_size));
    }
    let max_poly_size = C::max_poly_size(srs);
    if max_poly_size < circuit_size {
        return Err(SetupError::SrsTooSmall(max_poly_size, circuit_size));
    }
    Ok(())
}

/// The index used by the prover: everything fixed for a circuit, shared
/// read-only by every proof built for it.
pub struct ProverIndex<C: CommitmentScheme> {
    /// number of rows of the traces this index proves
    pub circuit_size: usize,

    /// constraints every row must satisfy
    pub relations: Arc<RelationSet<ScalarField<C>>>,

    /// polynomial commitment keys
    pub srs: Arc<C::SRS>,
}

impl<C: CommitmentScheme> Clone for ProverIndex<C> {
    fn clone(&self) -> Self {
        Self {
            circuit_size: self.circuit_size,
            relations: Arc::clone(&self.relations),
            srs: Arc::clone(&self.srs),
        }
    }
}

impl<C: CommitmentScheme> ProverIndex<C> {
    pub fn create(
        circuit_size: usize,
        relations: Arc<RelationSet<ScalarField<C>>>,
        srs: Arc<C::SRS>,
    ) -> Result<Self, SetupError> {
        check_circuit_size::<C>(circuit_size, &srs)?;
        debug!(
            circuit_size,
            relations = relations.name(),
            "prover index created"
        );
        Ok(Self {
            circuit_size,
            relations,
            srs,
        })
    }

    /// `log2(circuit_size)`, the number of sumcheck rounds.
    pub fn multivariate_d(&self) -> usize {
        self.circuit_size.trailing_zeros() as usize
    }

    /// The matching verifier index, sharing the relation set and the SRS.
    pub fn verifier_index(&self) -> VerifierIndex<C> {
        VerifierIndex {
            circuit_size: self.circuit_size,
            relations: Arc::clone(&self.relations),
            srs: Arc::clone(&self.srs),
        }
    }
}
