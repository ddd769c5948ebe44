//! Structured reference string: powers of a secret `x` in a group.

use crate::error::CommitmentError;
use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::{One, Zero};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "G: ark_serialize::CanonicalDeserialize + ark_serialize::CanonicalSerialize")]
pub struct SRS<G: AffineRepr> {
    /// `[1], [x], [x^2], ...` in the group `G`.
    #[serde_as(as = "Vec<crate::serialization::SerdeAs>")]
    pub g: Vec<G>,
}

impl<G: AffineRepr> SRS<G> {
    /// Creates an SRS of `depth` powers of `x`.
    ///
    /// # Safety
    ///
    /// The caller knows the toxic waste `x`, so the resulting commitments are
    /// not binding against that caller. Only use it for tests and benchmarks,
    /// or with a value nobody can recover.
    pub unsafe fn create_trusted_setup(x: G::ScalarField, depth: usize) -> Self {
        let mut x_pow = G::ScalarField::one();
        let powers: Vec<_> = (0..depth)
            .map(|_| {
                let res = x_pow;
                x_pow *= x;
                res
            })
            .collect();
        let generator = G::generator();
        let projective: Vec<G::Group> = powers.par_iter().map(|p| generator * *p).collect();
        SRS {
            g: G::Group::normalize_batch(&projective),
        }
    }

    /// Largest number of coefficients a committed polynomial may have.
    pub fn max_poly_size(&self) -> usize {
        self.g.len()
    }

    /// Commits to a polynomial given by its coefficients, lowest degree first.
    /// The commitment is not hiding.
    pub fn commit_non_hiding(&self, coefficients: &[G::ScalarField]) -> Result<G, CommitmentError> {
        if coefficients.len() > self.g.len() {
            return Err(CommitmentError::PolynomialTooLarge(
                coefficients.len(),
                self.g.len(),
            ));
        }
        if coefficients.iter().all(|c| c.is_zero()) {
            return Ok(G::zero());
        }
        let bases = &self.g[..coefficients.len()];
        G::Group::msm(bases, coefficients)
            .map(|c| c.into_affine())
            .map_err(|_| CommitmentError::MsmLengthMismatch(bases.len(), coefficients.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{Fr, G1Affine};
    use ark_ff::UniformRand;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn commitment_is_the_evaluation_at_the_secret() {
        let mut rng = StdRng::from_seed([1u8; 32]);
        let x = Fr::rand(&mut rng);
        let srs = unsafe { SRS::<G1Affine>::create_trusted_setup(x, 8) };
        let coefficients: Vec<Fr> = (0..8).map(|_| Fr::rand(&mut rng)).collect();
        let eval = coefficients
            .iter()
            .rev()
            .fold(Fr::zero(), |acc, c| acc * x + c);

        let commitment = srs.commit_non_hiding(&coefficients).unwrap();
        assert_eq!(commitment, (G1Affine::generator() * eval).into_affine());
    }

    #[test]
    fn too_large_polynomials_are_rejected() {
        let srs = unsafe { SRS::<G1Affine>::create_trusted_setup(Fr::from(3u64), 4) };
        let res = srs.commit_non_hiding(&[Fr::one(); 5]);
        assert_eq!(res, Err(CommitmentError::PolynomialTooLarge(5, 4)));
    }

    #[test]
    fn zero_polynomial_commits_to_identity() {
        let srs = unsafe { SRS::<G1Affine>::create_trusted_setup(Fr::from(3u64), 4) };
        assert!(srs.commit_non_hiding(&[Fr::zero(); 4]).unwrap().is_zero());
        assert!(srs.commit_non_hiding(&[]).unwrap().is_zero());
    }
}
