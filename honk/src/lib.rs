//! A Honk-style proof system: relations declared as expressions over the
//! columns of a trace, a sumcheck over the boolean hypercube, and the
//! resulting multilinear evaluation claims opened through Gemini, Shplonk
//! and KZG.

pub mod circuits;
pub mod columns;
pub mod composer;
pub mod config;
pub mod env;
pub mod error;
pub mod expr;
pub mod proof;
pub mod prover;
pub mod prover_index;
pub mod relation;
pub mod sumcheck;
pub mod trace;
pub mod verifier;
pub mod verifier_index;

/// The pairing proofs are built over.
pub type BN254 = ark_bn254::Bn254;

/// Scalar field of [BN254], the field the traces live in.
pub type Fp = ark_bn254::Fr;

/// The commitment scheme used by the concrete instantiation.
pub type Kzg = poly_commitment::kzg::KZG<BN254>;

/// SRS of [Kzg].
pub type PairingSRS = poly_commitment::kzg::PairingSRS<BN254>;

/// Minimum number of rows of a circuit.
pub const MIN_CIRCUIT_SIZE: usize = 2;
