//! Shplonk: batch univariate opening claims at distinct points into a single
//! claim at one fresh point.
//!
//! With claims `f_j(z_j) = v_j` and a challenge `nu`, the prover commits to
//!
//! ```text
//! Q(X) = sum_j nu^j (f_j(X) - v_j) / (X - z_j)
//! ```
//!
//! and, after drawing `z`, opens
//!
//! ```text
//! G(X) = Q(X) - sum_j nu^j (f_j(X) - v_j) / (z - z_j)
//! ```
//!
//! at `z` to the value zero. The verifier computes `[G]` from `[Q]` and the
//! claim commitments alone.

use crate::{
    claim::{OpeningClaim, OpeningPair, ProverOpeningClaim},
    error::CommitmentError,
    transcript::{ProverTranscript, Transcript, VerifierTranscript},
    utils::powers,
    CommitmentScheme, ScalarField,
};
use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::{batch_inversion, Field, One, PrimeField, Zero};
use ark_poly::{univariate::DensePolynomial, DenseUVPolynomial};
use rayon::prelude::*;
use tracing::instrument;

pub const SHPLONK_BATCHING_LABEL: &str = "Shplonk:nu";
pub const SHPLONK_QUOTIENT_LABEL: &str = "Shplonk:Q";
pub const SHPLONK_EVALUATION_LABEL: &str = "Shplonk:z";

/// `1 / (z - z_j)` for every claim point, failing if `z` hits one of them.
fn inverse_vanishing_evals<F: PrimeField>(
    z: F,
    points: impl Iterator<Item = F>,
) -> Result<Vec<F>, CommitmentError> {
    let mut denominators: Vec<F> = points.map(|z_j| z - z_j).collect();
    if denominators.iter().any(|d| d.is_zero()) {
        return Err(CommitmentError::DegenerateChallenge(
            SHPLONK_EVALUATION_LABEL,
        ));
    }
    batch_inversion(&mut denominators);
    Ok(denominators)
}

/// Adds `scalar * (p - v)` to `acc`, growing `acc` if needed.
fn add_scaled_claim<F: Field>(acc: &mut Vec<F>, coefficients: &[F], evaluation: F, scalar: F) {
    if acc.len() < coefficients.len() {
        acc.resize(coefficients.len(), F::zero());
    }
    if acc.is_empty() {
        acc.push(F::zero());
    }
    acc.par_iter_mut()
        .zip(coefficients.par_iter())
        .for_each(|(a, c)| *a += scalar * c);
    acc[0] -= scalar * evaluation;
}

/// Prover side: sends `[Q]`, draws `z` and returns the claim `G(z) = 0`.
#[instrument(skip_all, fields(claims = claims.len()))]
pub fn prove<C: CommitmentScheme>(
    srs: &C::SRS,
    claims: &[ProverOpeningClaim<ScalarField<C>>],
    transcript: &mut ProverTranscript,
) -> Result<ProverOpeningClaim<ScalarField<C>>, CommitmentError> {
    if claims.is_empty() {
        return Err(CommitmentError::NoClaims);
    }
    let nu: ScalarField<C> = transcript.get_challenge(SHPLONK_BATCHING_LABEL);
    let nu_powers = powers(nu, claims.len());

    let mut quotient: Vec<ScalarField<C>> = vec![];
    for (claim, nu_j) in claims.iter().zip(&nu_powers) {
        let q_j = claim.quotient()?.coeffs;
        if quotient.len() < q_j.len() {
            quotient.resize(q_j.len(), ScalarField::<C>::zero());
        }
        quotient
            .par_iter_mut()
            .zip(q_j.par_iter())
            .for_each(|(acc, c)| *acc += *nu_j * c);
    }
    let quotient_commitment = C::commit(srs, &quotient)?;
    transcript.send_to_verifier(SHPLONK_QUOTIENT_LABEL, &quotient_commitment)?;

    let z: ScalarField<C> = transcript.get_challenge(SHPLONK_EVALUATION_LABEL);
    let inverses =
        inverse_vanishing_evals(z, claims.iter().map(|c| c.opening_pair.challenge))?;

    let mut batched = quotient;
    for ((claim, nu_j), inverse) in claims.iter().zip(&nu_powers).zip(&inverses) {
        add_scaled_claim(
            &mut batched,
            &claim.polynomial.coeffs,
            claim.opening_pair.evaluation,
            -(*nu_j * inverse),
        );
    }

    let claim = ProverOpeningClaim {
        polynomial: DensePolynomial::from_coefficients_vec(batched),
        opening_pair: OpeningPair {
            challenge: z,
            evaluation: ScalarField::<C>::zero(),
        },
    };
    debug_assert!(claim.holds());
    Ok(claim)
}

/// Verifier side: reads `[Q]`, draws `z` and returns the claim on
/// `[G] = [Q] - sum_j nu^j / (z - z_j) ([f_j] - v_j [1])`.
#[instrument(skip_all, fields(claims = claims.len()))]
pub fn reduce_verification<G: AffineRepr>(
    claims: &[OpeningClaim<G>],
    transcript: &mut VerifierTranscript,
) -> Result<OpeningClaim<G>, CommitmentError> {
    if claims.is_empty() {
        return Err(CommitmentError::NoClaims);
    }
    let nu: G::ScalarField = transcript.get_challenge(SHPLONK_BATCHING_LABEL);
    let quotient_commitment: G = transcript.receive_from_prover(SHPLONK_QUOTIENT_LABEL)?;
    let z: G::ScalarField = transcript.get_challenge(SHPLONK_EVALUATION_LABEL);

    let nu_powers = powers(nu, claims.len());
    let inverses =
        inverse_vanishing_evals(z, claims.iter().map(|c| c.opening_pair.challenge))?;

    let mut bases = Vec::with_capacity(claims.len() + 2);
    let mut scalars = Vec::with_capacity(claims.len() + 2);
    let mut constant = G::ScalarField::zero();
    bases.push(quotient_commitment);
    scalars.push(G::ScalarField::one());
    for ((claim, nu_j), inverse) in claims.iter().zip(&nu_powers).zip(&inverses) {
        let scaling = *nu_j * inverse;
        bases.push(claim.commitment);
        scalars.push(-scaling);
        constant += scaling * claim.opening_pair.evaluation;
    }
    bases.push(G::generator());
    scalars.push(constant);

    let commitment = G::Group::msm(&bases, &scalars)
        .map_err(|_| CommitmentError::MsmLengthMismatch(bases.len(), scalars.len()))?
        .into_affine();
    Ok(OpeningClaim {
        opening_pair: OpeningPair {
            challenge: z,
            evaluation: G::ScalarField::zero(),
        },
        commitment,
    })
}
