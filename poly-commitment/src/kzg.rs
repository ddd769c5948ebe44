//! This module implements the KZG protocol described in the paper
//! [Constant-Size Commitments to Polynomials and Their
//! Applications](https://www.iacr.org/archive/asiacrypt2010/6477178/6477178.pdf)
//! by Kate, Zaverucha and Goldberg, often referred to as the KZG10 paper.
//!
//! The protocol requires a structured reference string (SRS) that contains
//! powers of a generator of a group, and a pairing friendly curve.
//!
//! The pairing friendly curve requirement is hidden in the Pairing trait
//! parameter.
//!
//! Only single-point openings are supported: batching several claims into one
//! is the job of [crate::shplonk].

use crate::{
    claim::{OpeningClaim, ProverOpeningClaim},
    error::{CommitmentError, TranscriptError},
    srs::SRS,
    transcript::{ProverTranscript, VerifierTranscript},
    CommitmentScheme,
};
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::One;
use serde::{Deserialize, Serialize};
use std::{marker::PhantomData, ops::Neg};
use tracing::{debug, warn};

pub const KZG_QUOTIENT_LABEL: &str = "KZG:W";

/// Powers of a secret `x`: `[x^i]_1` for `i < n` on the prover side, only
/// `[1]_2, [x]_2` on the verifier side.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PairingSRS<Pair: Pairing> {
    pub full_srs: SRS<Pair::G1Affine>,
    pub verifier_srs: SRS<Pair::G2Affine>,
}

// `Pair` itself is neither `Clone` nor `Default`, so no derives.
impl<Pair: Pairing> Default for PairingSRS<Pair> {
    fn default() -> Self {
        Self {
            full_srs: SRS::default(),
            verifier_srs: SRS::default(),
        }
    }
}

impl<Pair: Pairing> Clone for PairingSRS<Pair> {
    fn clone(&self) -> Self {
        Self {
            full_srs: self.full_srs.clone(),
            verifier_srs: self.verifier_srs.clone(),
        }
    }
}

impl<Pair: Pairing> PairingSRS<Pair> {
    /// SRS for circuits of up to `n` rows, from a known `x`.
    ///
    /// # Safety
    ///
    /// Whoever knows `x` can open any commitment to any value. Only for tests
    /// and benchmarks.
    pub unsafe fn create(x: Pair::ScalarField, n: usize) -> Self {
        PairingSRS {
            full_srs: unsafe { SRS::create_trusted_setup(x, n) },
            verifier_srs: unsafe { SRS::create_trusted_setup(x, 2) },
        }
    }
}

/// KZG over the pairing `Pair`, committing in `G1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KZG<Pair>(PhantomData<Pair>);

impl<Pair: Pairing> CommitmentScheme for KZG<Pair> {
    type Curve = Pair::G1Affine;
    type SRS = PairingSRS<Pair>;

    fn max_poly_size(srs: &Self::SRS) -> usize {
        srs.full_srs.max_poly_size()
    }

    fn commit(
        srs: &Self::SRS,
        coefficients: &[Pair::ScalarField],
    ) -> Result<Pair::G1Affine, CommitmentError> {
        srs.full_srs.commit_non_hiding(coefficients)
    }

    /// Sends `W = [(p(X) - p(z)) / (X - z)]`.
    fn open(
        srs: &Self::SRS,
        claim: &ProverOpeningClaim<Pair::ScalarField>,
        transcript: &mut ProverTranscript,
    ) -> Result<(), CommitmentError> {
        let quotient = claim.quotient()?;
        let quotient_commitment = srs.full_srs.commit_non_hiding(&quotient.coeffs)?;
        transcript.send_to_verifier(KZG_QUOTIENT_LABEL, &quotient_commitment)?;
        Ok(())
    }

    /// Checks `e(C - v[1] + z W, [1]_2) = e(W, [x]_2)`.
    fn verify(
        srs: &Self::SRS,
        claim: &OpeningClaim<Pair::G1Affine>,
        transcript: &mut VerifierTranscript,
    ) -> Result<bool, TranscriptError> {
        let quotient_commitment: Pair::G1Affine =
            transcript.receive_from_prover(KZG_QUOTIENT_LABEL)?;
        if srs.verifier_srs.g.len() < 2 {
            warn!("the verifier SRS does not contain [x]_2");
            return Ok(false);
        }

        let g1 = Pair::G1Affine::generator();
        let numerator = claim.commitment.into_group() - g1 * claim.opening_pair.evaluation
            + quotient_commitment * claim.opening_pair.challenge;

        // We compute the result of the multiplication of two miller loop,
        // to apply only one final exponentation
        let to_loop_left = [
            ark_ec::pairing::prepare_g1::<Pair>(numerator.into_affine()),
            // Note that we do a negation here, to put everything on the same side
            ark_ec::pairing::prepare_g1::<Pair>(quotient_commitment.into_group().neg()),
        ];
        let to_loop_right = [
            ark_ec::pairing::prepare_g2::<Pair>(srs.verifier_srs.g[0]),
            ark_ec::pairing::prepare_g2::<Pair>(srs.verifier_srs.g[1]),
        ];
        let accepted =
            match Pair::final_exponentiation(Pair::multi_miller_loop(to_loop_left, to_loop_right))
            {
                Some(res) => res.0 == Pair::TargetField::one(),
                None => false,
            };
        debug!(accepted, "pairing check");
        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{claim::OpeningPair, transcript::Transcript};
    use ark_bn254::{Bn254, Fr, G1Affine};
    use ark_ff::UniformRand;
    use ark_poly::{univariate::DensePolynomial, DenseUVPolynomial};
    use rand::{rngs::StdRng, SeedableRng};

    fn setup() -> (PairingSRS<Bn254>, StdRng) {
        let mut rng = StdRng::from_seed([9u8; 32]);
        let x = Fr::rand(&mut rng);
        (unsafe { PairingSRS::create(x, 32) }, rng)
    }

    #[test]
    fn opening_a_valid_claim_verifies() {
        let (srs, mut rng) = setup();
        let polynomial = DensePolynomial::from_coefficients_vec(
            (0..32).map(|_| Fr::rand(&mut rng)).collect(),
        );
        let commitment = KZG::<Bn254>::commit(&srs, &polynomial.coeffs).unwrap();

        let mut prover = ProverTranscript::new();
        let z: Fr = prover.get_challenge("z");
        let claim = ProverOpeningClaim::at(polynomial, z);
        KZG::<Bn254>::open(&srs, &claim, &mut prover).unwrap();
        let proof = prover.export_proof();
        assert_eq!(proof.len(), 32);

        let mut verifier = VerifierTranscript::new(&proof);
        let z_v: Fr = verifier.get_challenge("z");
        let verifier_claim = OpeningClaim {
            opening_pair: OpeningPair {
                challenge: z_v,
                evaluation: claim.opening_pair.evaluation,
            },
            commitment,
        };
        assert!(KZG::<Bn254>::verify(&srs, &verifier_claim, &mut verifier).unwrap());
    }

    #[test]
    fn wrong_evaluation_is_rejected() {
        let (srs, mut rng) = setup();
        let polynomial = DensePolynomial::from_coefficients_vec(
            (0..16).map(|_| Fr::rand(&mut rng)).collect(),
        );
        let commitment: G1Affine = KZG::<Bn254>::commit(&srs, &polynomial.coeffs).unwrap();
        let z = Fr::rand(&mut rng);
        let claim = ProverOpeningClaim::at(polynomial, z);

        let mut prover = ProverTranscript::new();
        KZG::<Bn254>::open(&srs, &claim, &mut prover).unwrap();
        let proof = prover.export_proof();

        let mut verifier = VerifierTranscript::new(&proof);
        let forged = OpeningClaim {
            opening_pair: OpeningPair {
                challenge: z,
                evaluation: claim.opening_pair.evaluation + Fr::one(),
            },
            commitment,
        };
        assert!(!KZG::<Bn254>::verify(&srs, &forged, &mut verifier).unwrap());
    }

    #[test]
    fn the_prover_refuses_to_open_a_wrong_evaluation() {
        let (srs, mut rng) = setup();
        let polynomial = DensePolynomial::from_coefficients_vec(
            (0..16).map(|_| Fr::rand(&mut rng)).collect(),
        );
        let mut claim = ProverOpeningClaim::at(polynomial, Fr::rand(&mut rng));
        claim.opening_pair.evaluation += Fr::one();

        let mut prover = ProverTranscript::new();
        assert_eq!(
            KZG::<Bn254>::open(&srs, &claim, &mut prover),
            Err(CommitmentError::IncorrectEvaluation)
        );
        assert!(prover.export_proof().is_empty());
    }

    #[test]
    fn srs_survives_serialization() {
        let (srs, _) = setup();
        let bytes = rmp_serde::to_vec(&srs).unwrap();
        let back: PairingSRS<Bn254> = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(srs, back);
    }
}
