use super::{AvmMiniColumn, AVM_MINI};
use crate::{
    columns::ColumnIndexer,
    error::SetupError,
    expr::{curr_cell, next_cell, E},
    relation::{RelationSet, Subrelation},
};
use ark_ff::PrimeField;

const SUBRELATION_LENGTH: usize = 6;

fn curr<F: PrimeField>(col: AvmMiniColumn) -> E<F> {
    curr_cell(col.to_column())
}

fn next<F: PrimeField>(col: AvmMiniColumn) -> E<F> {
    next_cell(col.to_column())
}

fn boolean<F: PrimeField>(x: E<F>) -> E<F> {
    x.clone() * (E::one() - x)
}

/// The six subrelations of the AVM mini trace. None of them uses relation
/// parameters.
pub fn relations<F: PrimeField>() -> Result<RelationSet<F>, SetupError> {
    use AvmMiniColumn::*;

    let one = E::<F>::one;
    let inter_idx = curr::<F>(InterIdx);
    let not_first = one() - curr(First);
    let not_last_access = one() - curr(MLastAccess);

    let subrelations = vec![
        Subrelation::new("subop_boolean", boolean(curr(Subop)), SUBRELATION_LENGTH),
        Subrelation::new(
            "inter_idx_range",
            inter_idx.clone()
                * (one() - inter_idx.clone())
                * (E::constant(F::from(2u64)) - inter_idx),
            SUBRELATION_LENGTH,
        ),
        Subrelation::new(
            "m_last_access_boolean",
            boolean(curr(MLastAccess)),
            SUBRELATION_LENGTH,
        ),
        Subrelation::new("m_rw_boolean", boolean(curr(MRw)), SUBRELATION_LENGTH),
        // Same address until the last access to it.
        Subrelation::new(
            "m_addr_continuity",
            not_first.clone() * not_last_access.clone() * (next(MAddr) - curr(MAddr)),
            SUBRELATION_LENGTH,
        ),
        // A read sees the value of the previous access.
        Subrelation::new(
            "m_val_read_consistency",
            not_first
                * (one() - curr(Last))
                * not_last_access
                * (one() - next(MRw))
                * (next(MVal) - curr(MVal)),
            SUBRELATION_LENGTH,
        ),
    ];

    RelationSet::new(AVM_MINI, AvmMiniColumn::schema()?, subrelations, vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Fp;

    #[test]
    fn six_subrelations_of_length_six() {
        let relations = relations::<Fp>().unwrap();
        assert_eq!(relations.n_subrelations(), 6);
        assert_eq!(relations.max_subrelation_length(), 6);
        assert_eq!(relations.batched_univariate_length(), 7);
        assert!(relations.challenge_labels().is_empty());
        let degrees: Vec<usize> = relations
            .subrelations()
            .iter()
            .map(|s| s.expr.degree())
            .collect();
        assert_eq!(degrees, vec![2, 3, 2, 2, 3, 5]);
    }
}
