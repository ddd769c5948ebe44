use ark_ff::{batch_inversion, PrimeField};

/// A univariate polynomial given by its evaluations on `0, 1, ..., L - 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Univariate<F> {
    pub evaluations: Vec<F>,
}

impl<F: PrimeField> Univariate<F> {
    pub fn new(evaluations: Vec<F>) -> Self {
        Self { evaluations }
    }

    pub fn zero(length: usize) -> Self {
        Self {
            evaluations: vec![F::zero(); length],
        }
    }

    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }

    /// `p(0) + p(1)`, the sum over the boolean values of the variable.
    pub fn sum_over_hypercube(&self) -> F {
        self.evaluations.iter().take(2).fold(F::zero(), |acc, v| acc + v)
    }

    /// The line through `(0, a)` and `(1, b)`, evaluated on `0..length`.
    pub fn extend_edge(a: F, b: F, length: usize) -> Self {
        let delta = b - a;
        let mut acc = a;
        let evaluations = (0..length)
            .map(|_| {
                let res = acc;
                acc += delta;
                res
            })
            .collect();
        Self { evaluations }
    }

    /// Barycentric evaluation at `u`.
    pub fn evaluate(&self, u: F) -> F {
        let n = self.evaluations.len();
        if n == 0 {
            return F::zero();
        }
        let points: Vec<F> = (0..n as u64).map(F::from).collect();
        if let Some(i) = points.iter().position(|p| *p == u) {
            return self.evaluations[i];
        }

        // w_i = 1 / prod_{j != i} (i - j)
        let mut weights: Vec<F> = (0..n)
            .map(|i| {
                (0..n)
                    .filter(|j| *j != i)
                    .fold(F::one(), |acc, j| acc * (points[i] - points[j]))
            })
            .collect();
        batch_inversion(&mut weights);

        let mut denominators: Vec<F> = points.iter().map(|p| u - p).collect();
        let full_product = denominators.iter().fold(F::one(), |acc, d| acc * d);
        batch_inversion(&mut denominators);

        let sum = self
            .evaluations
            .iter()
            .zip(weights.iter().zip(&denominators))
            .fold(F::zero(), |acc, (v, (w, d))| acc + *v * w * d);
        full_product * sum
    }
}

impl<F: PrimeField> std::ops::AddAssign<&Univariate<F>> for Univariate<F> {
    fn add_assign(&mut self, other: &Univariate<F>) {
        for (a, b) in self.evaluations.iter_mut().zip(&other.evaluations) {
            *a += b;
        }
    }
}
