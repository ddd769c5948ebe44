//! This module implements the verifier index as [VerifierIndex].

use crate::{error::SetupError, prover_index::check_circuit_size, relation::RelationSet};
use poly_commitment::{CommitmentScheme, ScalarField};
use std::sync::Arc;

/// The index used by the verifier
pub struct VerifierIndex<C: CommitmentScheme> {
    /// number of rows of the circuit, checked against the first message of
    /// every proof
    pub circuit_size: usize,

    pub relations: Arc<RelationSet<ScalarField<C>>>,

    /// polynomial commitment keys
    pub srs: Arc<C::SRS>,
}

impl<C: CommitmentScheme> Clone for VerifierIndex<C> {
    fn clone(&self) -> Self {
        Self {
            circuit_size: self.circuit_size,
            relations: Arc::clone(&self.relations),
            srs: Arc::clone(&self.srs),
        }
    }
}

impl<C: CommitmentScheme> VerifierIndex<C> {
    pub fn create(
        circuit_size: usize,
        relations: Arc<RelationSet<ScalarField<C>>>,
        srs: Arc<C::SRS>,
    ) -> Result<Self, SetupError> {
        check_circuit_size::<C>(circuit_size, &srs)?;
        Ok(Self {
            circuit_size,
            relations,
            srs,
        })
    }

    pub fn multivariate_d(&self) -> usize {
        self.circuit_size.trailing_zeros() as usize
    }
}
