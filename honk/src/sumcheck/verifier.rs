use super::{
    challenge_label, univariate_label, ClaimedEvaluations, PowUnivariate, SumcheckOutput,
    Univariate, ALPHA_LABEL, EVALUATIONS_LABEL, ZETA_LABEL,
};
use crate::relation::{AllValues, RelationParameters, RelationSet};
use ark_ff::PrimeField;
use poly_commitment::{utils::powers, Transcript, VerifierTranscript};
use tracing::{debug, instrument, warn};

pub struct SumcheckVerifier<'a, F> {
    relations: &'a RelationSet<F>,
    parameters: &'a RelationParameters<F>,
    multivariate_d: usize,
}

impl<'a, F: PrimeField> SumcheckVerifier<'a, F> {
    pub fn new(
        relations: &'a RelationSet<F>,
        parameters: &'a RelationParameters<F>,
        multivariate_d: usize,
    ) -> Self {
        Self {
            relations,
            parameters,
            multivariate_d,
        }
    }

    /// Reads the round univariates and the claimed evaluations, checking
    /// `S_i(0) + S_i(1)` against the running target and the last target
    /// against the relations at the claimed evaluations.
    ///
    /// A failed check does not stop the reading, so that the rest of the
    /// proof stays aligned with the transcript. A proof too short to be read
    /// gives `verified: None`.
    #[instrument(skip_all, fields(relations = self.relations.name(), d = self.multivariate_d))]
    pub fn verify(&self, transcript: &mut VerifierTranscript) -> SumcheckOutput<F> {
        let length = self.relations.batched_univariate_length();
        let alpha: F = transcript.get_challenge(ALPHA_LABEL);
        let zeta: F = transcript.get_challenge(ZETA_LABEL);
        let alphas = powers(alpha, self.relations.n_subrelations());
        let mut pow = PowUnivariate::new(zeta);

        let mut verified = true;
        let mut target = F::zero();
        let mut challenge = Vec::with_capacity(self.multivariate_d);
        for round in 0..self.multivariate_d {
            let evaluations =
                match transcript.receive_field_elements(&univariate_label(round), length) {
                    Ok(evaluations) => evaluations,
                    Err(e) => {
                        warn!(round, error = %e, "could not read the round univariate");
                        return Self::malformed(challenge);
                    }
                };
            let univariate = Univariate::new(evaluations);
            if univariate.sum_over_hypercube() != target {
                warn!(round, "round univariate does not sum to the target");
                verified = false;
            }
            let u: F = transcript.get_challenge(&challenge_label(round));
            target = univariate.evaluate(u);
            pow.partially_evaluate(u);
            challenge.push(u);
        }

        let schema = self.relations.schema();
        let evaluations =
            match transcript.receive_field_elements::<F>(EVALUATIONS_LABEL, schema.n_evaluations()) {
                Ok(evaluations) => evaluations,
                Err(e) => {
                    warn!(error = %e, "could not read the claimed evaluations");
                    return Self::malformed(challenge);
                }
            };
        let claimed_evaluations = ClaimedEvaluations {
            unshifted: evaluations[..schema.n_columns()].to_vec(),
            shifted: evaluations[schema.n_columns()..].to_vec(),
        };

        let full_honk_relation_purported_value = self.relations.accumulate(
            AllValues {
                unshifted: &claimed_evaluations.unshifted,
                shifted: &claimed_evaluations.shifted,
            },
            self.parameters,
            &alphas,
            pow.partial_evaluation_constant,
        );
        if full_honk_relation_purported_value != target {
            warn!("relations at the claimed evaluations do not match the last round");
            verified = false;
        }
        debug!(verified, "sumcheck checked");

        SumcheckOutput {
            challenge,
            claimed_evaluations,
            verified: Some(verified),
        }
    }

    fn malformed(challenge: Vec<F>) -> SumcheckOutput<F> {
        SumcheckOutput {
            challenge,
            claimed_evaluations: ClaimedEvaluations::default(),
            verified: None,
        }
    }
}
