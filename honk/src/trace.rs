//! The arithmetized witness: rows of field elements, stored by column.
//!
//! The shifted view of a column is `shift(c)[i] = c[i + 1]` with
//! `shift(c)[n - 1] = 0`. Shifted columns must be zero on row 0, so that the
//! shift is exactly the univariate `c(X) / X` used when opening.

use crate::{
    columns::Column,
    error::SetupError,
    relation::{RelationParameters, RelationSet},
    MIN_CIRCUIT_SIZE,
};
use ark_ff::PrimeField;
use rayon::prelude::*;
use std::fmt;

/// One row of the trace, one value per column in schema order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row<F>(pub Vec<F>);

impl<F: PrimeField> Row<F> {
    pub fn zero(width: usize) -> Self {
        Row(vec![F::zero(); width])
    }
}

/// The first subrelation found not to vanish.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsatisfiedConstraint {
    pub row: usize,
    pub subrelation: usize,
    pub name: String,
}

impl fmt::Display for UnsatisfiedConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "subrelation {} ({}) fails on row {}",
            self.subrelation, self.name, self.row
        )
    }
}

/// A finalized trace: every column has the same power-of-two length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace<F> {
    columns: Vec<Vec<F>>,
}

impl<F: PrimeField> Trace<F> {
    /// Transposes `rows` into columns. `rows.len()` must be a power of two of
    /// at least 2 and every row must have `width` values.
    pub fn from_rows(rows: Vec<Row<F>>, width: usize) -> Result<Self, SetupError> {
        let n = rows.len();
        if n < MIN_CIRCUIT_SIZE || !n.is_power_of_two() {
            return Err(SetupError::InvalidCircuitSize(n));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.0.len() != width) {
            return Err(SetupError::RowWidthMismatch {
                row: i,
                width: row.0.len(),
                expected: width,
            });
        }
        let columns = (0..width)
            .into_par_iter()
            .map(|c| rows.iter().map(|row| row.0[c]).collect::<Vec<F>>())
            .collect();
        Ok(Self { columns })
    }

    pub fn circuit_size(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Vec<F>] {
        &self.columns
    }

    pub fn column(&self, col: Column) -> &[F] {
        &self.columns[col.index()]
    }

    /// `c[1..]` followed by a zero.
    pub fn shifted(&self, col: Column) -> Vec<F> {
        let column = self.column(col);
        let mut shifted = Vec::with_capacity(column.len());
        shifted.extend_from_slice(&column[1..]);
        shifted.push(F::zero());
        shifted
    }

    pub fn row(&self, i: usize) -> Vec<F> {
        self.columns.iter().map(|c| c[i]).collect()
    }

    /// Values of row `i + 1`, or zeros past the last row.
    fn next_row(&self, i: usize) -> Vec<F> {
        if i + 1 < self.circuit_size() {
            self.row(i + 1)
        } else {
            vec![F::zero(); self.width()]
        }
    }

    /// Checks every subrelation on every row and reports the first failure.
    pub fn check(
        &self,
        relations: &RelationSet<F>,
        parameters: &RelationParameters<F>,
    ) -> Result<(), UnsatisfiedConstraint> {
        let failure = (0..self.circuit_size()).into_par_iter().find_map_first(|i| {
            let row = self.row(i);
            let next_row = self.next_row(i);
            relations
                .evaluate_rows(&row, &next_row, parameters, F::one())
                .iter()
                .position(|v| !v.is_zero())
                .map(|s| UnsatisfiedConstraint {
                    row: i,
                    subrelation: s,
                    name: relations.subrelations()[s].name.clone(),
                })
        });
        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// The first shifted column that is not zero on row 0, if any.
    pub fn first_unshiftable(&self, relations: &RelationSet<F>) -> Option<Column> {
        relations
            .schema()
            .to_be_shifted()
            .iter()
            .find(|col| !self.column(**col)[0].is_zero())
            .copied()
    }
}
