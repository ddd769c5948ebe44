use crate::error::CommitmentError;
use ark_ec::{AffineRepr, VariableBaseMSM};
use ark_ff::{Field, Zero};
use tracing::debug;

/// `[1, x, x^2, ..., x^{n-1}]`
pub fn powers<F: Field>(x: F, n: usize) -> Vec<F> {
    let mut acc = F::one();
    (0..n)
        .map(|_| {
            let res = acc;
            acc *= x;
            res
        })
        .collect()
}

/// `[x, x^2, x^4, ..., x^{2^{n-1}}]`
pub fn squares<F: Field>(x: F, n: usize) -> Vec<F> {
    let mut acc = x;
    (0..n)
        .map(|_| {
            let res = acc;
            acc.square_in_place();
            res
        })
        .collect()
}

/// Result of batching commitments with scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchedCommitment<G: AffineRepr> {
    pub commitment: G::Group,
    /// Positions of the commitments left out because they are the identity.
    pub excluded: Vec<usize>,
}

/// Computes `sum_i scalars[i] * commitments[i]` over the commitments that are
/// not the identity. Identity commitments are reported in
/// [BatchedCommitment::excluded] rather than entering the accumulation.
pub fn batch_commitments<G: AffineRepr>(
    commitments: &[G],
    scalars: &[G::ScalarField],
) -> Result<BatchedCommitment<G>, CommitmentError> {
    if commitments.len() != scalars.len() {
        return Err(CommitmentError::MsmLengthMismatch(
            commitments.len(),
            scalars.len(),
        ));
    }
    let mut excluded = vec![];
    let mut bases = Vec::with_capacity(commitments.len());
    let mut coefficients = Vec::with_capacity(commitments.len());
    for (i, (commitment, scalar)) in commitments.iter().zip(scalars).enumerate() {
        if commitment.is_zero() {
            excluded.push(i);
        } else {
            bases.push(*commitment);
            coefficients.push(*scalar);
        }
    }
    if !excluded.is_empty() {
        debug!(
            ?excluded,
            "commitments at the point at infinity left out of the batch"
        );
    }
    let commitment = if bases.is_empty() {
        G::Group::zero()
    } else {
        G::Group::msm(&bases, &coefficients)
            .map_err(|_| CommitmentError::MsmLengthMismatch(bases.len(), coefficients.len()))?
    };
    Ok(BatchedCommitment {
        commitment,
        excluded,
    })
}

/// `sum_i scalars[i] * values[i]`
pub fn inner_product<F: Field>(values: &[F], scalars: &[F]) -> F {
    values
        .iter()
        .zip(scalars)
        .fold(F::zero(), |acc, (v, s)| acc + *v * s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{Fr, G1Affine};
    use ark_ec::CurveGroup;
    use ark_ff::{One, UniformRand};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn squares_are_repeated_squarings() {
        let x = Fr::from(3u64);
        assert_eq!(
            squares(x, 4),
            vec![
                Fr::from(3u64),
                Fr::from(9u64),
                Fr::from(81u64),
                Fr::from(6561u64)
            ]
        );
        assert_eq!(powers(x, 3), vec![Fr::one(), x, x * x]);
    }

    #[test]
    fn identity_commitments_do_not_enter_the_batch() {
        let mut rng = StdRng::from_seed([4u8; 32]);
        let g = G1Affine::generator();
        let a = (g * Fr::rand(&mut rng)).into_affine();
        let b = (g * Fr::rand(&mut rng)).into_affine();
        let commitments = vec![a, G1Affine::zero(), b];
        let scalars = vec![Fr::from(2u64), Fr::from(5u64), Fr::from(7u64)];

        let batched = batch_commitments(&commitments, &scalars).unwrap();
        assert_eq!(batched.excluded, vec![1]);
        assert_eq!(batched.commitment, a * Fr::from(2u64) + b * Fr::from(7u64));

        let all_identity = batch_commitments(&[G1Affine::zero()], &[Fr::one()]).unwrap();
        assert!(all_identity.commitment.is_zero());
        assert_eq!(all_identity.excluded, vec![0]);
    }
}
