//! Relation sets: the constraints every row of a trace must satisfy.

use crate::{
    columns::{Column, ColumnSchema},
    error::SetupError,
    expr::{ColumnEnvironment, CurrOrNext, Variable, E},
};
use ark_ff::{Field, PrimeField};
use poly_commitment::Transcript;

/// One polynomial constraint with its declared length, i.e. its degree plus
/// one. The length sizes the sumcheck round univariates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subrelation<F> {
    pub name: String,
    pub expr: E<F>,
    pub length: usize,
}

impl<F: Field> Subrelation<F> {
    pub fn new(name: impl Into<String>, expr: E<F>, length: usize) -> Self {
        Self {
            name: name.into(),
            expr,
            length,
        }
    }
}

/// Challenges drawn after the column commitments and shared by every
/// evaluation of the relations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RelationParameters<F> {
    pub challenges: Vec<F>,
}

impl<F: PrimeField> RelationParameters<F> {
    /// Draws one challenge per label, in declared order.
    pub fn draw<T: Transcript>(transcript: &mut T, labels: &[String]) -> Self {
        Self {
            challenges: transcript.get_challenges(labels),
        }
    }
}

/// Values of every column on a row (or at a point) and of every shifted
/// column on the next one.
#[derive(Clone, Copy, Debug)]
pub struct AllValues<'a, F> {
    pub unshifted: &'a [F],
    pub shifted: &'a [F],
}

struct RelationEnv<'a, F> {
    values: AllValues<'a, F>,
    schema: &'a ColumnSchema,
    parameters: &'a RelationParameters<F>,
}

impl<F: Field> ColumnEnvironment<F> for RelationEnv<'_, F> {
    fn cell(&self, var: Variable) -> F {
        match var.row {
            CurrOrNext::Curr => self.values.unshifted[var.col.index()],
            CurrOrNext::Next => {
                // Checked when the relation set is built.
                let k = self.schema.shift_position(var.col).unwrap_or_default();
                self.values.shifted[k]
            }
        }
    }

    fn challenge(&self, index: usize) -> F {
        self.parameters.challenges[index]
    }
}

/// A fixed, ordered set of subrelations over a column schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelationSet<F> {
    name: String,
    schema: ColumnSchema,
    subrelations: Vec<Subrelation<F>>,
    challenge_labels: Vec<String>,
}

impl<F: PrimeField> RelationSet<F> {
    /// Validates the subrelations against the schema: declared lengths cover
    /// the degrees, every next-row read targets a shifted column and every
    /// relation parameter is declared.
    pub fn new(
        name: impl Into<String>,
        schema: ColumnSchema,
        subrelations: Vec<Subrelation<F>>,
        challenge_labels: Vec<String>,
    ) -> Result<Self, SetupError> {
        for sub in &subrelations {
            let required = sub.expr.degree() + 1;
            if sub.length < required {
                return Err(SetupError::SubrelationTooLong {
                    name: sub.name.clone(),
                    declared: sub.length,
                    required,
                });
            }
            for var in sub.expr.variables() {
                if !schema.contains(var.col) {
                    return Err(SetupError::UnknownColumn {
                        name: sub.name.clone(),
                        index: var.col.index(),
                    });
                }
                if var.row == CurrOrNext::Next && schema.shift_position(var.col).is_none() {
                    return Err(SetupError::UnshiftedNextReference {
                        name: sub.name.clone(),
                        column: schema.name(var.col).unwrap_or_default().to_string(),
                    });
                }
            }
            if let Some(index) = sub.expr.max_challenge() {
                if index >= challenge_labels.len() {
                    return Err(SetupError::UnknownChallenge {
                        name: sub.name.clone(),
                        index,
                        declared: challenge_labels.len(),
                    });
                }
            }
        }
        Ok(Self {
            name: name.into(),
            schema,
            subrelations,
            challenge_labels,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn subrelations(&self) -> &[Subrelation<F>] {
        &self.subrelations
    }

    pub fn n_subrelations(&self) -> usize {
        self.subrelations.len()
    }

    pub fn challenge_labels(&self) -> &[String] {
        &self.challenge_labels
    }

    pub fn max_subrelation_length(&self) -> usize {
        self.subrelations
            .iter()
            .map(|s| s.length)
            .max()
            .unwrap_or(1)
    }

    /// Number of evaluations of a sumcheck round univariate: one more than the
    /// longest subrelation, for the gate separator factor.
    pub fn batched_univariate_length(&self) -> usize {
        self.max_subrelation_length() + 1
    }

    /// `scaling_factor * subrelation(values)` for every subrelation, in order.
    pub fn evaluate(
        &self,
        values: AllValues<'_, F>,
        parameters: &RelationParameters<F>,
        scaling_factor: F,
    ) -> Vec<F> {
        let env = RelationEnv {
            values,
            schema: &self.schema,
            parameters,
        };
        self.subrelations
            .iter()
            .map(|sub| sub.expr.evaluate(&env) * scaling_factor)
            .collect()
    }

    /// `sum_s alphas[s] * scaling_factor * subrelation_s(values)`
    pub fn accumulate(
        &self,
        values: AllValues<'_, F>,
        parameters: &RelationParameters<F>,
        alphas: &[F],
        scaling_factor: F,
    ) -> F {
        self.evaluate(values, parameters, scaling_factor)
            .into_iter()
            .zip(alphas)
            .fold(F::zero(), |acc, (v, alpha)| acc + v * alpha)
    }

    /// Evaluates the subrelations on a trace row, reading the shifted columns
    /// on `next_row`.
    pub fn evaluate_rows(
        &self,
        row: &[F],
        next_row: &[F],
        parameters: &RelationParameters<F>,
        scaling_factor: F,
    ) -> Vec<F> {
        let shifted: Vec<F> = self
            .schema
            .to_be_shifted()
            .iter()
            .map(|col: &Column| next_row[col.index()])
            .collect();
        self.evaluate(
            AllValues {
                unshifted: row,
                shifted: &shifted,
            },
            parameters,
            scaling_factor,
        )
    }
}
