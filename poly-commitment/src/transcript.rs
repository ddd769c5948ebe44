//! Fiat-Shamir transcript backed by Keccak-256.
//!
//! The prover writes every message into the proof buffer while absorbing it;
//! the verifier reads the same bytes back in the same order. Both sides derive
//! challenges from the same chaining state, so any difference in the message
//! schedule (or in a single byte of a message) changes every later challenge.
//!
//! Absorbing a message hashes its label followed by its canonical compressed
//! encoding. A challenge hashes the pending buffer followed by the challenge
//! label; the 32-byte digest replaces the buffer and its first
//! [CHALLENGE_LENGTH_IN_BYTES] bytes, read big-endian, give the challenge.

use crate::error::TranscriptError;
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, SerializationError};
use std::ops::Range;
use tiny_keccak::{Hasher, Keccak};

/// Number of digest bytes turned into a challenge (128-bit challenges).
pub const CHALLENGE_LENGTH_IN_BYTES: usize = 16;

/// A chaining Keccak-256 state. Absorbed bytes accumulate until the next
/// squeeze, which replaces them with the digest.
#[derive(Debug, Clone, Default)]
struct Keccak256Sponge {
    pending: Vec<u8>,
}

impl Keccak256Sponge {
    fn absorb_bytes(&mut self, x: &[u8]) {
        self.pending.extend_from_slice(x)
    }

    fn squeeze(&mut self) -> [u8; 32] {
        let mut hasher = Keccak::v256();
        hasher.update(self.pending.as_slice());
        let mut output = [0u8; 32];
        hasher.finalize(&mut output);
        self.pending = output.to_vec();
        output
    }
}

/// Common interface of both transcript halves: deriving challenges.
pub trait Transcript {
    /// Absorbs `label` and squeezes a field element out of the state.
    fn get_challenge<F: PrimeField>(&mut self, label: &str) -> F;

    /// Draws one challenge per label, in order.
    fn get_challenges<F: PrimeField>(&mut self, labels: &[String]) -> Vec<F> {
        labels.iter().map(|label| self.get_challenge(label)).collect()
    }
}

fn challenge_from_sponge<F: PrimeField>(sponge: &mut Keccak256Sponge, label: &str) -> F {
    sponge.absorb_bytes(label.as_bytes());
    let digest = sponge.squeeze();
    F::from_be_bytes_mod_order(&digest[..CHALLENGE_LENGTH_IN_BYTES])
}

/// One message written by the prover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub label: String,
    pub range: Range<usize>,
}

/// Prover half: serializes messages into the proof buffer.
#[derive(Debug, Clone, Default)]
pub struct ProverTranscript {
    sponge: Keccak256Sponge,
    proof_data: Vec<u8>,
    manifest: Vec<ManifestEntry>,
}

impl ProverTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes `value` (compressed), absorbs it and appends it to the proof.
    pub fn send_to_verifier<T: CanonicalSerialize>(
        &mut self,
        label: &str,
        value: &T,
    ) -> Result<(), TranscriptError> {
        let mut bytes = Vec::with_capacity(value.compressed_size());
        value
            .serialize_compressed(&mut bytes)
            .map_err(|e| TranscriptError::Serialization {
                label: label.to_string(),
                reason: e.to_string(),
            })?;
        self.write_message(label, &bytes);
        Ok(())
    }

    /// Sends a slice element by element, with no length prefix: the length is
    /// fixed by the protocol and known to the verifier.
    pub fn send_field_elements<F: PrimeField>(
        &mut self,
        label: &str,
        values: &[F],
    ) -> Result<(), TranscriptError> {
        let mut bytes = Vec::with_capacity(values.len() * F::zero().compressed_size());
        for value in values {
            value
                .serialize_compressed(&mut bytes)
                .map_err(|e| TranscriptError::Serialization {
                    label: label.to_string(),
                    reason: e.to_string(),
                })?;
        }
        self.write_message(label, &bytes);
        Ok(())
    }

    fn write_message(&mut self, label: &str, bytes: &[u8]) {
        self.sponge.absorb_bytes(label.as_bytes());
        self.sponge.absorb_bytes(bytes);
        let start = self.proof_data.len();
        self.proof_data.extend_from_slice(bytes);
        self.manifest.push(ManifestEntry {
            label: label.to_string(),
            range: start..self.proof_data.len(),
        });
    }

    /// The messages written so far, with the byte range each one occupies.
    pub fn manifest(&self) -> &[ManifestEntry] {
        &self.manifest
    }

    pub fn proof_data(&self) -> &[u8] {
        &self.proof_data
    }

    /// Consumes the transcript and returns the proof bytes.
    pub fn export_proof(self) -> Vec<u8> {
        self.proof_data
    }
}

impl Transcript for ProverTranscript {
    fn get_challenge<F: PrimeField>(&mut self, label: &str) -> F {
        challenge_from_sponge(&mut self.sponge, label)
    }
}

fn read_error(label: &str, remaining: usize, e: SerializationError) -> TranscriptError {
    match e {
        SerializationError::IoError(_) => TranscriptError::UnexpectedEnd {
            label: label.to_string(),
            remaining,
        },
        e => TranscriptError::Deserialization {
            label: label.to_string(),
            reason: e.to_string(),
        },
    }
}

/// Verifier half: reads messages back from untrusted proof bytes.
#[derive(Debug, Clone)]
pub struct VerifierTranscript<'a> {
    sponge: Keccak256Sponge,
    proof_data: &'a [u8],
    cursor: usize,
}

impl<'a> VerifierTranscript<'a> {
    pub fn new(proof_data: &'a [u8]) -> Self {
        Self {
            sponge: Keccak256Sponge::default(),
            proof_data,
            cursor: 0,
        }
    }

    /// Reads one value and absorbs the raw bytes it was decoded from.
    pub fn receive_from_prover<T: CanonicalDeserialize>(
        &mut self,
        label: &str,
    ) -> Result<T, TranscriptError> {
        let remaining = &self.proof_data[self.cursor..];
        if remaining.is_empty() {
            return Err(TranscriptError::UnexpectedEnd {
                label: label.to_string(),
                remaining: 0,
            });
        }
        let mut reader = remaining;
        let value = T::deserialize_compressed(&mut reader)
            .map_err(|e| read_error(label, remaining.len(), e))?;
        let consumed = remaining.len() - reader.len();
        self.sponge.absorb_bytes(label.as_bytes());
        self.sponge.absorb_bytes(&remaining[..consumed]);
        self.cursor += consumed;
        Ok(value)
    }

    /// Reads `count` field elements sent as a single message.
    pub fn receive_field_elements<F: PrimeField>(
        &mut self,
        label: &str,
        count: usize,
    ) -> Result<Vec<F>, TranscriptError> {
        let remaining = &self.proof_data[self.cursor..];
        let mut reader = remaining;
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            let value = F::deserialize_compressed(&mut reader)
                .map_err(|e| read_error(label, remaining.len(), e))?;
            values.push(value);
        }
        let consumed = remaining.len() - reader.len();
        self.sponge.absorb_bytes(label.as_bytes());
        self.sponge.absorb_bytes(&remaining[..consumed]);
        self.cursor += consumed;
        Ok(values)
    }

    /// Number of proof bytes not read yet.
    pub fn remaining(&self) -> usize {
        self.proof_data.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

impl Transcript for VerifierTranscript<'_> {
    fn get_challenge<F: PrimeField>(&mut self, label: &str) -> F {
        challenge_from_sponge(&mut self.sponge, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{Fr, G1Affine};
    use ark_ec::AffineRepr;
    use ark_ff::{Field, One, UniformRand};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn prover_and_verifier_derive_the_same_challenges() {
        let mut rng = StdRng::from_seed([7u8; 32]);
        let point = G1Affine::generator();
        let scalars: Vec<Fr> = (0..5).map(|_| Fr::rand(&mut rng)).collect();

        let mut prover = ProverTranscript::new();
        prover.send_to_verifier("circuit_size", &16u32).unwrap();
        prover.send_to_verifier("A", &point).unwrap();
        let alpha_p: Fr = prover.get_challenge("alpha");
        prover.send_field_elements("evals", &scalars).unwrap();
        let beta_p: Fr = prover.get_challenge("beta");
        let proof = prover.export_proof();
        assert_eq!(proof.len(), 4 + 32 + 5 * 32);

        let mut verifier = VerifierTranscript::new(&proof);
        let size: u32 = verifier.receive_from_prover("circuit_size").unwrap();
        assert_eq!(size, 16);
        let read_point: G1Affine = verifier.receive_from_prover("A").unwrap();
        assert_eq!(read_point, point);
        let alpha_v: Fr = verifier.get_challenge("alpha");
        let evals: Vec<Fr> = verifier.receive_field_elements("evals", 5).unwrap();
        let beta_v: Fr = verifier.get_challenge("beta");

        assert_eq!(evals, scalars);
        assert_eq!(alpha_p, alpha_v);
        assert_eq!(beta_p, beta_v);
        assert!(verifier.is_exhausted());
    }

    #[test]
    fn challenges_depend_on_labels_and_fit_in_128_bits() {
        let mut a = ProverTranscript::new();
        let mut b = ProverTranscript::new();
        let x: Fr = a.get_challenge("x");
        let y: Fr = b.get_challenge("y");
        assert_ne!(x, y);

        let bound = Fr::from(2u64).pow([128u64]);
        assert!(x.into_bigint() < bound.into_bigint());
        assert!(y.into_bigint() < bound.into_bigint());
    }

    #[test]
    fn manifest_records_byte_ranges() {
        let mut prover = ProverTranscript::new();
        prover.send_to_verifier("circuit_size", &8u32).unwrap();
        prover
            .send_field_elements("round", &[Fr::one(), Fr::one()])
            .unwrap();
        let manifest = prover.manifest();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest[0].label, "circuit_size");
        assert_eq!(manifest[0].range, 0..4);
        assert_eq!(manifest[1].range, 4..68);
    }

    #[test]
    fn short_reads_are_errors() {
        let mut prover = ProverTranscript::new();
        prover.send_to_verifier("circuit_size", &8u32).unwrap();
        let proof = prover.export_proof();

        let mut verifier = VerifierTranscript::new(&proof[..2]);
        let res: Result<u32, _> = verifier.receive_from_prover("circuit_size");
        assert!(matches!(res, Err(TranscriptError::UnexpectedEnd { .. })));

        let mut verifier = VerifierTranscript::new(&proof);
        let _: u32 = verifier.receive_from_prover("circuit_size").unwrap();
        let res: Result<Vec<Fr>, _> = verifier.receive_field_elements("evals", 1);
        assert!(res.is_err());
    }

    #[test]
    fn non_canonical_field_elements_are_rejected() {
        let bytes = [0xffu8; 32];
        let mut verifier = VerifierTranscript::new(&bytes);
        let res: Result<Fr, _> = verifier.receive_from_prover("v");
        assert!(matches!(res, Err(TranscriptError::Deserialization { .. })));
    }
}
