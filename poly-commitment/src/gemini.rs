//! Gemini: reduce an evaluation claim on a multilinear polynomial to
//! evaluation claims on univariate polynomials.
//!
//! The multilinear polynomial is given by its values on the hypercube, read as
//! the coefficients of a univariate polynomial `A_0`. Binding the variables
//! lowest index bit first, fold `l` computes
//!
//! ```text
//! A_{l+1}[j] = A_l[2j] + u_l (A_l[2j+1] - A_l[2j])
//! ```
//!
//! so that `A_{l+1}(X^2) = (1 - u_l) (A_l(X) + A_l(-X)) / 2 + u_l (A_l(X) - A_l(-X)) / 2X`
//! and the fully folded constant `A_d` is the multilinear evaluation at `u`.
//! Checking the relation at `X = r^{2^l}` for a random `r` ties each fold to
//! the previous one.
//!
//! Shifted columns are handled by batching them separately into `G` and
//! opening `A_0 = F + G / X`. The verifier only holds `[F]` and `[G]`, so
//! `A_0` is opened through the two partially evaluated polynomials
//! `A_0+ = F + G / r` at `r` and `A_0- = F - G / r` at `-r`.

use crate::{
    claim::{OpeningClaim, OpeningPair, ProverOpeningClaim},
    error::CommitmentError,
    transcript::{ProverTranscript, Transcript, VerifierTranscript},
    utils::squares,
    CommitmentScheme, ScalarField,
};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{Field, PrimeField};
use ark_poly::{univariate::DensePolynomial, DenseUVPolynomial};
use rayon::prelude::*;
use tracing::{debug, instrument};

pub const GEMINI_CHALLENGE_LABEL: &str = "Gemini:r";

pub fn fold_label(l: usize) -> String {
    format!("Gemini:FOLD_{l}")
}

pub fn evaluation_label(l: usize) -> String {
    format!("Gemini:a_{l}")
}

/// Computes the fold polynomials `A_1, ..., A_{d-1}` from the batched
/// unshifted coefficients `f` and the batched to-be-shifted coefficients `g`.
/// `A_d` is constant and never materialized.
pub fn compute_fold_polynomials<F: PrimeField>(
    u: &[F],
    f: &[F],
    g: &[F],
) -> Result<Vec<Vec<F>>, CommitmentError> {
    let n = 1 << u.len();
    if f.len() != n || g.len() != n {
        return Err(CommitmentError::PointDimensionMismatch(
            u.len(),
            f.len().trailing_zeros() as usize,
        ));
    }
    if !g[0].is_zero() {
        return Err(CommitmentError::ShiftedPolynomialNotZeroAtOrigin);
    }

    // A_0 = F + G / X
    let mut current: Vec<F> = (0..n)
        .into_par_iter()
        .map(|i| {
            let shifted = if i + 1 < n { g[i + 1] } else { F::zero() };
            f[i] + shifted
        })
        .collect();

    let mut folds = Vec::with_capacity(u.len().saturating_sub(1));
    for u_l in u.iter().take(u.len().saturating_sub(1)) {
        let next: Vec<F> = current
            .par_chunks(2)
            .map(|pair| pair[0] + *u_l * (pair[1] - pair[0]))
            .collect();
        folds.push(next.clone());
        current = next;
    }
    Ok(folds)
}

/// Prover side of Gemini: commits to the folds, draws `r` and sends the
/// evaluations `a_l = A_l(-r^{2^l})`. Returns the `d + 1` univariate claims,
/// `A_0+` at `r` first, then `A_0-` at `-r`, then `A_l` at `-r^{2^l}`.
#[instrument(skip_all, fields(d = u.len()))]
pub fn prove<C: CommitmentScheme>(
    srs: &C::SRS,
    u: &[ScalarField<C>],
    batched_unshifted: &[ScalarField<C>],
    batched_to_be_shifted: &[ScalarField<C>],
    transcript: &mut ProverTranscript,
) -> Result<Vec<ProverOpeningClaim<ScalarField<C>>>, CommitmentError> {
    let d = u.len();
    let folds = compute_fold_polynomials(u, batched_unshifted, batched_to_be_shifted)?;

    let fold_commitments: Vec<C::Curve> = folds
        .par_iter()
        .map(|fold| C::commit(srs, fold))
        .collect::<Result<_, _>>()?;
    for (l, commitment) in fold_commitments.iter().enumerate() {
        transcript.send_to_verifier(&fold_label(l + 1), commitment)?;
    }

    let r: ScalarField<C> = transcript.get_challenge(GEMINI_CHALLENGE_LABEL);
    let r_inv = r
        .inverse()
        .ok_or(CommitmentError::DegenerateChallenge(GEMINI_CHALLENGE_LABEL))?;
    let r_squares = squares(r, d);

    let f = DensePolynomial::from_coefficients_slice(batched_unshifted);
    let g_over_r = DensePolynomial::from_coefficients_vec(
        batched_to_be_shifted.iter().map(|c| *c * r_inv).collect(),
    );
    let a_0_pos = &f + &g_over_r;
    let a_0_neg = &f - &g_over_r;

    let mut claims = Vec::with_capacity(d + 1);
    claims.push(ProverOpeningClaim::at(a_0_pos, r));
    claims.push(ProverOpeningClaim::at(a_0_neg, -r));
    for (l, fold) in folds.into_iter().enumerate() {
        let polynomial = DensePolynomial::from_coefficients_vec(fold);
        claims.push(ProverOpeningClaim::at(polynomial, -r_squares[l + 1]));
    }

    for (l, claim) in claims.iter().skip(1).enumerate() {
        transcript.send_to_verifier(&evaluation_label(l), &claim.opening_pair.evaluation)?;
    }
    debug!(folds = d.saturating_sub(1), "gemini folds sent");
    Ok(claims)
}

/// Recovers `A_0(r)` from the batched multilinear evaluation and the
/// evaluations `a_l = A_l(-r^{2^l})`, walking the folds from the last one
/// back to the first.
pub fn compute_positive_evaluation<F: PrimeField>(
    batched_evaluation: F,
    r_squares: &[F],
    evaluations: &[F],
    u: &[F],
) -> Result<F, CommitmentError> {
    let mut eval_pos = batched_evaluation;
    for l in (1..=u.len()).rev() {
        let challenge_power = r_squares[l - 1];
        let u_l = u[l - 1];
        let eval_neg = evaluations[l - 1];
        let one_minus_u = F::one() - u_l;
        let denominator = challenge_power * one_minus_u + u_l;
        let denominator_inv = denominator
            .inverse()
            .ok_or(CommitmentError::DegenerateChallenge(GEMINI_CHALLENGE_LABEL))?;
        eval_pos = (challenge_power * eval_pos.double()
            - eval_neg * (challenge_power * one_minus_u - u_l))
            * denominator_inv;
    }
    Ok(eval_pos)
}

/// Verifier side of Gemini. `batched_f` and `batched_g` are the commitments
/// to the batched unshifted and to-be-shifted polynomials. Returns the claims
/// in the order [prove] produces them.
#[instrument(skip_all, fields(d = u.len()))]
pub fn reduce_verification<G: AffineRepr>(
    u: &[G::ScalarField],
    batched_evaluation: G::ScalarField,
    batched_f: G::Group,
    batched_g: G::Group,
    transcript: &mut VerifierTranscript,
) -> Result<Vec<OpeningClaim<G>>, CommitmentError> {
    let d = u.len();
    let fold_commitments: Vec<G> = (1..d)
        .map(|l| transcript.receive_from_prover(&fold_label(l)))
        .collect::<Result<_, _>>()?;

    let r: G::ScalarField = transcript.get_challenge(GEMINI_CHALLENGE_LABEL);
    let evaluations: Vec<G::ScalarField> = (0..d)
        .map(|l| transcript.receive_from_prover(&evaluation_label(l)))
        .collect::<Result<_, _>>()?;

    let r_inv = r
        .inverse()
        .ok_or(CommitmentError::DegenerateChallenge(GEMINI_CHALLENGE_LABEL))?;
    let r_squares = squares(r, d);
    let a_0_pos = compute_positive_evaluation(batched_evaluation, &r_squares, &evaluations, u)?;

    let g_over_r = batched_g * r_inv;
    let commitments = G::Group::normalize_batch(&[batched_f + g_over_r, batched_f - g_over_r]);

    let mut claims = Vec::with_capacity(d + 1);
    claims.push(OpeningClaim {
        opening_pair: OpeningPair {
            challenge: r,
            evaluation: a_0_pos,
        },
        commitment: commitments[0],
    });
    claims.push(OpeningClaim {
        opening_pair: OpeningPair {
            challenge: -r,
            evaluation: evaluations[0],
        },
        commitment: commitments[1],
    });
    for (l, commitment) in fold_commitments.into_iter().enumerate() {
        claims.push(OpeningClaim {
            opening_pair: OpeningPair {
                challenge: -r_squares[l + 1],
                evaluation: evaluations[l + 1],
            },
            commitment,
        });
    }
    Ok(claims)
}

/// Evaluation of the multilinear extension of `values` at `u`, binding the
/// lowest index bit first.
pub fn multilinear_evaluation<F: Field>(values: &[F], u: &[F]) -> F {
    let mut current = values.to_vec();
    for u_l in u {
        current = current
            .chunks(2)
            .map(|pair| pair[0] + *u_l * (pair[1] - pair[0]))
            .collect();
    }
    current.first().copied().unwrap_or_else(F::zero)
}
