//! Sumcheck over the batched relations.
//!
//! The claim is `sum_b pow_zeta(b) * sum_s alpha^s R_s(b) = 0` over the
//! boolean hypercube of `d = log2(n)` variables, where `R_s` is subrelation
//! `s` on the multilinear extensions of the columns. Round `i` binds variable
//! `i`, which pairs rows `(2j, 2j + 1)`; the prover sends the round
//! univariate by its evaluations on `0..L` with `L` the batched univariate
//! length of the relation set. After the last round the prover sends the
//! evaluations of every column, then of every shifted column, at the bound
//! point.

pub mod gate_separator;
pub mod prover;
pub mod univariate;
pub mod verifier;

pub use gate_separator::PowUnivariate;
pub use prover::{SumcheckProver, SumcheckProverOutput};
pub use univariate::Univariate;
pub use verifier::SumcheckVerifier;

pub const ALPHA_LABEL: &str = "Sumcheck:alpha";
pub const ZETA_LABEL: &str = "Sumcheck:zeta";
pub const EVALUATIONS_LABEL: &str = "Sumcheck:evaluations";

pub fn univariate_label(round: usize) -> String {
    format!("Sumcheck:univariate_{round}")
}

pub fn challenge_label(round: usize) -> String {
    format!("Sumcheck:u_{round}")
}

/// Column evaluations at the sumcheck point.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClaimedEvaluations<F> {
    /// One per column, in schema order.
    pub unshifted: Vec<F>,
    /// One per shifted column, in schema order of the shifted columns.
    pub shifted: Vec<F>,
}

impl<F: Clone> ClaimedEvaluations<F> {
    /// Unshifted then shifted, the order they are sent and batched in.
    pub fn to_vec(&self) -> Vec<F> {
        let mut all = self.unshifted.clone();
        all.extend_from_slice(&self.shifted);
        all
    }
}

/// Outcome of the verifier side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SumcheckOutput<F> {
    pub challenge: Vec<F>,
    pub claimed_evaluations: ClaimedEvaluations<F>,
    /// `None` when the transcript could not be read, `Some(false)` when a
    /// check failed.
    pub verified: Option<bool>,
}
