use ark_ff::PrimeField;

/// The gate separator `pow_zeta(X) = prod_i (1 + X_i (zeta^{2^i} - 1))`,
/// partially evaluated as the sumcheck rounds bind its variables.
///
/// On the hypercube point with index `b`, `pow_zeta(b) = zeta^b`, so summing
/// `pow_zeta * R` over the hypercube is zero for a random `zeta` only if `R`
/// vanishes everywhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowUnivariate<F> {
    /// `zeta^{2^i}` in round `i`.
    pub zeta_pow: F,
    /// `zeta^{2^{i+1}}` in round `i`.
    pub zeta_pow_sqr: F,
    /// `prod_{l < i} (1 + u_l (zeta^{2^l} - 1))`
    pub partial_evaluation_constant: F,
}

impl<F: PrimeField> PowUnivariate<F> {
    pub fn new(zeta: F) -> Self {
        Self {
            zeta_pow: zeta,
            zeta_pow_sqr: zeta.square(),
            partial_evaluation_constant: F::one(),
        }
    }

    /// `1 + X (zeta^{2^i} - 1)` at `x`.
    pub fn univariate_eval(&self, x: F) -> F {
        F::one() + x * (self.zeta_pow - F::one())
    }

    /// Binds the variable of the current round to `u` and moves to the next
    /// round.
    pub fn partially_evaluate(&mut self, u: F) {
        self.partial_evaluation_constant *= self.univariate_eval(u);
        self.zeta_pow = self.zeta_pow_sqr;
        self.zeta_pow_sqr.square_in_place();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Fp;
    use ark_ff::{Field, One, Zero};

    #[test]
    fn hypercube_points_evaluate_to_powers_of_zeta() {
        let zeta = Fp::from(7u64);
        // index 6 = 0b110
        let bits = [Fp::zero(), Fp::one(), Fp::one()];
        let mut pow = PowUnivariate::new(zeta);
        for b in bits {
            pow.partially_evaluate(b);
        }
        assert_eq!(pow.partial_evaluation_constant, zeta.pow([6u64]));
        assert_eq!(pow.zeta_pow, zeta.pow([8u64]));
    }
}
