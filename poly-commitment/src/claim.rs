//! Univariate opening claims exchanged between the opening reductions.

use crate::error::CommitmentError;
use ark_ec::AffineRepr;
use ark_ff::{One, PrimeField, Zero};
use ark_poly::{
    univariate::{DenseOrSparsePolynomial, DensePolynomial},
    DenseUVPolynomial, Polynomial,
};

/// A point and the value a polynomial is claimed to take there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningPair<F> {
    pub challenge: F,
    pub evaluation: F,
}

/// Verifier view of a claim: `p(challenge) = evaluation` for the polynomial
/// committed in `commitment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningClaim<G: AffineRepr> {
    pub opening_pair: OpeningPair<G::ScalarField>,
    pub commitment: G,
}

/// Prover view of a claim, holding the polynomial itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProverOpeningClaim<F: PrimeField> {
    pub polynomial: DensePolynomial<F>,
    pub opening_pair: OpeningPair<F>,
}

impl<F: PrimeField> ProverOpeningClaim<F> {
    /// Builds the claim by evaluating `polynomial` at `challenge`.
    pub fn at(polynomial: DensePolynomial<F>, challenge: F) -> Self {
        let evaluation = polynomial.evaluate(&challenge);
        Self {
            polynomial,
            opening_pair: OpeningPair {
                challenge,
                evaluation,
            },
        }
    }

    /// Whether the stored evaluation is correct. Used in tests and debug
    /// assertions.
    pub fn holds(&self) -> bool {
        self.polynomial.evaluate(&self.opening_pair.challenge) == self.opening_pair.evaluation
    }

    /// `(p(X) - v) / (X - z)`. A wrong evaluation leaves a remainder and is
    /// rejected.
    pub fn quotient(&self) -> Result<DensePolynomial<F>, CommitmentError> {
        let OpeningPair {
            challenge,
            evaluation,
        } = self.opening_pair;
        let numerator =
            &self.polynomial - &DensePolynomial::from_coefficients_slice(&[evaluation]);
        let divisor = DensePolynomial::from_coefficients_slice(&[-challenge, F::one()]);
        let (quotient, remainder) =
            DenseOrSparsePolynomial::divide_with_q_and_r(&numerator.into(), &divisor.into())
                .ok_or(CommitmentError::IncorrectEvaluation)?;
        if !remainder.is_zero() {
            return Err(CommitmentError::IncorrectEvaluation);
        }
        Ok(quotient)
    }
}
