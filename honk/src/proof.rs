//! The proof container and the layout of its bytes.

use crate::{
    columns::Column,
    relation::RelationSet,
    sumcheck::{univariate_label, EVALUATIONS_LABEL},
};
use ark_ec::AffineRepr;
use ark_ff::Zero;
use ark_serialize::CanonicalSerialize;
use poly_commitment::{gemini, kzg::KZG_QUOTIENT_LABEL, shplonk::SHPLONK_QUOTIENT_LABEL};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::ops::Range;

pub const CIRCUIT_SIZE_LABEL: &str = "circuit_size";

/// A proof: the bytes written to the transcript by the prover, in the order
/// the verifier reads them back.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    #[serde_as(as = "serde_with::Bytes")]
    pub proof_data: Vec<u8>,
}

impl Proof {
    pub fn new(proof_data: Vec<u8>) -> Self {
        Self { proof_data }
    }

    pub fn len(&self) -> usize {
        self.proof_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proof_data.is_empty()
    }

    /// MessagePack encoding of the proof.
    pub fn to_msgpack(&self) -> Result<Vec<u8>, rmp_serde::encode::Error> {
        rmp_serde::to_vec(self)
    }

    pub fn from_msgpack(bytes: &[u8]) -> Result<Self, rmp_serde::decode::Error> {
        rmp_serde::from_slice(bytes)
    }
}

/// The kind of message occupying a range of the proof.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProofSection {
    CircuitSize,
    Commitment(Column),
    SumcheckUnivariate(usize),
    SumcheckEvaluations,
    GeminiFold(usize),
    GeminiEvaluation(usize),
    ShplonkQuotient,
    KzgQuotient,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutEntry {
    pub section: ProofSection,
    pub label: String,
    pub range: Range<usize>,
}

/// Where every message of a proof sits, computed from the relation set and
/// the circuit size alone. A proof of the right shape has exactly
/// [ProofLayout::total_size] bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofLayout {
    entries: Vec<LayoutEntry>,
}

impl ProofLayout {
    /// Layout of a proof committing in `G` and opening through KZG.
    pub fn new<G: AffineRepr>(relations: &RelationSet<G::ScalarField>, circuit_size: usize) -> Self {
        let point = G::zero().compressed_size();
        let scalar = G::ScalarField::zero().compressed_size();
        let multivariate_d = circuit_size.trailing_zeros() as usize;
        let schema = relations.schema();

        let mut entries = vec![];
        let mut offset = 0;
        let mut push = |section: ProofSection, label: String, size: usize| {
            entries.push(LayoutEntry {
                section,
                label,
                range: offset..offset + size,
            });
            offset += size;
        };

        push(ProofSection::CircuitSize, CIRCUIT_SIZE_LABEL.to_string(), 0u32.compressed_size());
        for (i, name) in schema.names().iter().enumerate() {
            push(ProofSection::Commitment(Column::Relation(i)), name.clone(), point);
        }
        let univariate_size = relations.batched_univariate_length() * scalar;
        for round in 0..multivariate_d {
            push(
                ProofSection::SumcheckUnivariate(round),
                univariate_label(round),
                univariate_size,
            );
        }
        push(
            ProofSection::SumcheckEvaluations,
            EVALUATIONS_LABEL.to_string(),
            schema.n_evaluations() * scalar,
        );
        for l in 1..multivariate_d {
            push(ProofSection::GeminiFold(l), gemini::fold_label(l), point);
        }
        for l in 0..multivariate_d {
            push(ProofSection::GeminiEvaluation(l), gemini::evaluation_label(l), scalar);
        }
        push(ProofSection::ShplonkQuotient, SHPLONK_QUOTIENT_LABEL.to_string(), point);
        push(ProofSection::KzgQuotient, KZG_QUOTIENT_LABEL.to_string(), point);

        Self { entries }
    }

    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    pub fn total_size(&self) -> usize {
        self.entries.last().map(|e| e.range.end).unwrap_or(0)
    }

    /// The entry covering byte `offset`, if any.
    pub fn section_at(&self, offset: usize) -> Option<&LayoutEntry> {
        self.entries.iter().find(|e| e.range.contains(&offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::avm_mini;

    #[test]
    fn avm_mini_layout_sizes() {
        let relations = avm_mini::relations::<crate::Fp>().unwrap();
        let layout = ProofLayout::new::<ark_bn254::G1Affine>(&relations, 256);
        // 4 + 12 * 32 + 8 * 7 * 32 + 15 * 32 + 7 * 32 + 8 * 32 + 32 + 32
        assert_eq!(layout.total_size(), 4 + 384 + 1792 + 480 + 224 + 256 + 64);
        assert_eq!(layout.entries()[1].label, "avmMini_clk");
        assert_eq!(
            layout.section_at(4 + 384).map(|e| e.section),
            Some(ProofSection::SumcheckUnivariate(0))
        );
        assert_eq!(layout.section_at(layout.total_size()), None);
    }

    #[test]
    fn proofs_round_trip_through_msgpack() {
        let proof = Proof::new(vec![1, 2, 3, 255]);
        let bytes = proof.to_msgpack().unwrap();
        assert_eq!(Proof::from_msgpack(&bytes).unwrap(), proof);
    }
}
