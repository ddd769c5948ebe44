//! Ties a relation set and an SRS to the keys, provers and verifiers built
//! from them.

use crate::{
    config::ProverConfig,
    error::{ProverError, SetupError, VerifyError},
    proof::Proof,
    prover,
    prover_index::ProverIndex,
    relation::RelationSet,
    trace::Trace,
    verifier,
    verifier_index::VerifierIndex,
};
use poly_commitment::{CommitmentScheme, ScalarField};
use std::sync::Arc;

pub struct Composer<C: CommitmentScheme> {
    relations: Arc<RelationSet<ScalarField<C>>>,
    srs: Arc<C::SRS>,
    config: ProverConfig,
    proving_key: Option<ProverIndex<C>>,
    verification_key: Option<VerifierIndex<C>>,
}

impl<C: CommitmentScheme> Composer<C> {
    /// The prover configuration is read from the environment, see
    /// [ProverConfig::from_env].
    pub fn new(relations: Arc<RelationSet<ScalarField<C>>>, srs: Arc<C::SRS>) -> Self {
        Self {
            relations,
            srs,
            config: ProverConfig::from_env(),
            proving_key: None,
            verification_key: None,
        }
    }

    pub fn with_config(mut self, config: ProverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ProverConfig {
        &self.config
    }

    /// The proving key for circuits of `circuit_size` rows, computed on first
    /// use.
    pub fn compute_proving_key(
        &mut self,
        circuit_size: usize,
    ) -> Result<&ProverIndex<C>, SetupError> {
        let pk = match self.proving_key.take() {
            Some(pk) if pk.circuit_size == circuit_size => pk,
            _ => ProverIndex::create(
                circuit_size,
                Arc::clone(&self.relations),
                Arc::clone(&self.srs),
            )?,
        };
        Ok(self.proving_key.insert(pk))
    }

    /// The verification key for circuits of `circuit_size` rows, derived from
    /// the proving key.
    pub fn compute_verification_key(
        &mut self,
        circuit_size: usize,
    ) -> Result<&VerifierIndex<C>, SetupError> {
        let vk = match self.verification_key.take() {
            Some(vk) if vk.circuit_size == circuit_size => vk,
            _ => self.compute_proving_key(circuit_size)?.verifier_index(),
        };
        Ok(self.verification_key.insert(vk))
    }

    pub fn create_prover(&mut self, trace: Trace<ScalarField<C>>) -> Result<Prover<C>, SetupError> {
        let index = self.compute_proving_key(trace.circuit_size())?.clone();
        Ok(Prover {
            index,
            trace,
            config: self.config.clone(),
        })
    }

    pub fn create_verifier(&mut self, circuit_size: usize) -> Result<Verifier<C>, SetupError> {
        let index = self.compute_verification_key(circuit_size)?.clone();
        Ok(Verifier { index })
    }
}

/// A trace bound to its proving key.
pub struct Prover<C: CommitmentScheme> {
    index: ProverIndex<C>,
    trace: Trace<ScalarField<C>>,
    config: ProverConfig,
}

impl<C: CommitmentScheme> Prover<C> {
    pub fn construct_proof(&self) -> Result<Proof, ProverError> {
        self.config
            .install(|| prover::prove(&self.index, &self.trace))?
    }
}

pub struct Verifier<C: CommitmentScheme> {
    index: VerifierIndex<C>,
}

impl<C: CommitmentScheme> Verifier<C> {
    pub fn verify_proof(&self, proof: &Proof) -> bool {
        verifier::verify(&self.index, proof)
    }

    pub fn verify_detailed(&self, proof: &Proof) -> Result<(), VerifyError> {
        verifier::verify_detailed(&self.index, proof)
    }
}
