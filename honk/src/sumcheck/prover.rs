use super::{
    challenge_label, univariate_label, ClaimedEvaluations, PowUnivariate, Univariate,
    ALPHA_LABEL, EVALUATIONS_LABEL, ZETA_LABEL,
};
use crate::relation::{AllValues, RelationParameters, RelationSet};
use ark_ff::PrimeField;
use poly_commitment::{utils::powers, ProverTranscript, Transcript, TranscriptError};
use rayon::prelude::*;
use tracing::{debug, instrument};

/// What the prover side of the sumcheck leaves behind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SumcheckProverOutput<F> {
    /// `u_0, ..., u_{d-1}`
    pub challenge: Vec<F>,
    pub claimed_evaluations: ClaimedEvaluations<F>,
    /// The univariates sent in each round.
    pub round_univariates: Vec<Univariate<F>>,
}

pub struct SumcheckProver<'a, F> {
    relations: &'a RelationSet<F>,
    parameters: &'a RelationParameters<F>,
}

impl<'a, F: PrimeField> SumcheckProver<'a, F> {
    pub fn new(relations: &'a RelationSet<F>, parameters: &'a RelationParameters<F>) -> Self {
        Self {
            relations,
            parameters,
        }
    }

    /// Runs every round. `polynomials` holds the hypercube values of each
    /// column in schema order, followed by those of each shifted column; they
    /// are consumed by the folding.
    #[instrument(skip_all, fields(relations = self.relations.name()))]
    pub fn prove(
        &self,
        mut polynomials: Vec<Vec<F>>,
        transcript: &mut ProverTranscript,
    ) -> Result<SumcheckProverOutput<F>, TranscriptError> {
        let n = polynomials.first().map(|p| p.len()).unwrap_or(1);
        let multivariate_d = n.trailing_zeros() as usize;

        let alpha: F = transcript.get_challenge(ALPHA_LABEL);
        let zeta: F = transcript.get_challenge(ZETA_LABEL);
        let alphas = powers(alpha, self.relations.n_subrelations());
        let mut pow = PowUnivariate::new(zeta);

        let mut challenge = Vec::with_capacity(multivariate_d);
        let mut round_univariates = Vec::with_capacity(multivariate_d);
        for round in 0..multivariate_d {
            let univariate = self.compute_univariate(&polynomials, &pow, &alphas);
            transcript.send_field_elements(&univariate_label(round), &univariate.evaluations)?;
            let u: F = transcript.get_challenge(&challenge_label(round));

            fold(&mut polynomials, u);
            pow.partially_evaluate(u);
            challenge.push(u);
            round_univariates.push(univariate);
        }

        let n_unshifted = self.relations.schema().n_columns();
        let evaluations: Vec<F> = polynomials
            .iter()
            .map(|p| p.first().copied().unwrap_or_else(F::zero))
            .collect();
        transcript.send_field_elements(EVALUATIONS_LABEL, &evaluations)?;
        debug!(rounds = multivariate_d, "sumcheck done");

        Ok(SumcheckProverOutput {
            challenge,
            claimed_evaluations: ClaimedEvaluations {
                unshifted: evaluations[..n_unshifted].to_vec(),
                shifted: evaluations[n_unshifted..].to_vec(),
            },
            round_univariates,
        })
    }

    /// `S(X) = (1 + X (zeta_pow - 1)) * sum_j c * zeta_pow_sqr^j * sum_s
    /// alpha^s R_s(edge_j(X))`, on `0..L`. Edge `j` is the pair of rows
    /// `(2j, 2j + 1)` of the current polynomials.
    fn compute_univariate(
        &self,
        polynomials: &[Vec<F>],
        pow: &PowUnivariate<F>,
        alphas: &[F],
    ) -> Univariate<F> {
        let length = self.relations.batched_univariate_length();
        let n_unshifted = self.relations.schema().n_columns();
        let n_edges = polynomials.first().map(|p| p.len() / 2).unwrap_or(0);
        let edge_scalings = powers(pow.zeta_pow_sqr, n_edges);

        let mut univariate = (0..n_edges)
            .into_par_iter()
            .map(|j| {
                let scaling = pow.partial_evaluation_constant * edge_scalings[j];
                let extended: Vec<Univariate<F>> = polynomials
                    .iter()
                    .map(|p| Univariate::extend_edge(p[2 * j], p[2 * j + 1], length))
                    .collect();
                let mut values = vec![F::zero(); polynomials.len()];
                let evaluations = (0..length)
                    .map(|k| {
                        for (v, e) in values.iter_mut().zip(&extended) {
                            *v = e.evaluations[k];
                        }
                        self.relations.accumulate(
                            AllValues {
                                unshifted: &values[..n_unshifted],
                                shifted: &values[n_unshifted..],
                            },
                            self.parameters,
                            alphas,
                            scaling,
                        )
                    })
                    .collect();
                Univariate::new(evaluations)
            })
            .reduce(
                || Univariate::zero(length),
                |mut acc, u| {
                    acc += &u;
                    acc
                },
            );

        for (k, evaluation) in univariate.evaluations.iter_mut().enumerate() {
            *evaluation *= pow.univariate_eval(F::from(k as u64));
        }
        univariate
    }
}

/// Binds the lowest variable of every polynomial to `u`:
/// `p'[j] = p[2j] + u (p[2j + 1] - p[2j])`.
fn fold<F: PrimeField>(polynomials: &mut [Vec<F>], u: F) {
    polynomials.par_iter_mut().for_each(|p| {
        *p = p
            .chunks(2)
            .map(|pair| pair[0] + u * (pair[1] - pair[0]))
            .collect();
    });
}
