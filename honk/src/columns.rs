use crate::error::SetupError;

/// Describe a generic indexed column of the trace.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
pub enum Column {
    Relation(usize),
}

impl Column {
    pub fn index(&self) -> usize {
        match self {
            Column::Relation(i) => *i,
        }
    }
}

/// A datatype expressing a generalized column, but with potentially
/// more convenient interface than a bare column.
pub trait ColumnIndexer: Copy {
    /// Number of columns the indexer ranges over.
    const N_COL: usize;

    fn to_column(self) -> Column;

    /// Name used as transcript label for the column commitment.
    fn name(self) -> &'static str;
}

/// The columns of a constraint system: their names, in wire order, and the
/// subset whose next-row values are read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnSchema {
    names: Vec<String>,
    to_be_shifted: Vec<Column>,
    /// For each column, its position in `to_be_shifted`.
    shift_positions: Vec<Option<usize>>,
}

impl ColumnSchema {
    /// Every shifted column must be in the schema, and listed once.
    pub fn new(names: Vec<String>, to_be_shifted: Vec<Column>) -> Result<Self, SetupError> {
        let mut shift_positions = vec![None; names.len()];
        for (k, col) in to_be_shifted.iter().enumerate() {
            let slot = shift_positions
                .get_mut(col.index())
                .ok_or(SetupError::UnknownShiftedColumn(col.index()))?;
            if slot.is_some() {
                return Err(SetupError::DuplicateShiftedColumn(
                    names[col.index()].clone(),
                ));
            }
            *slot = Some(k);
        }
        Ok(Self {
            names,
            to_be_shifted,
            shift_positions,
        })
    }

    /// Builds the schema of an indexer whose variants are listed in wire
    /// order.
    pub fn from_indexer<C: ColumnIndexer>(
        columns: &[C],
        to_be_shifted: &[C],
    ) -> Result<Self, SetupError> {
        Self::new(
            columns.iter().map(|c| c.name().to_string()).collect(),
            to_be_shifted.iter().map(|c| c.to_column()).collect(),
        )
    }

    pub fn n_columns(&self) -> usize {
        self.names.len()
    }

    pub fn n_shifted(&self) -> usize {
        self.to_be_shifted.len()
    }

    /// Number of claimed evaluations: every column, then every shifted one.
    pub fn n_evaluations(&self) -> usize {
        self.n_columns() + self.n_shifted()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, col: Column) -> Option<&str> {
        self.names.get(col.index()).map(|s| s.as_str())
    }

    pub fn to_be_shifted(&self) -> &[Column] {
        &self.to_be_shifted
    }

    pub fn shift_position(&self, col: Column) -> Option<usize> {
        self.shift_positions.get(col.index()).copied().flatten()
    }

    pub fn contains(&self, col: Column) -> bool {
        col.index() < self.names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["a".into(), "b".into(), "c".into()]
    }

    #[test]
    fn shift_positions_follow_the_declared_order() {
        let schema =
            ColumnSchema::new(names(), vec![Column::Relation(2), Column::Relation(0)]).unwrap();
        assert_eq!(schema.shift_position(Column::Relation(2)), Some(0));
        assert_eq!(schema.shift_position(Column::Relation(0)), Some(1));
        assert_eq!(schema.shift_position(Column::Relation(1)), None);
        assert_eq!(schema.n_evaluations(), 5);
    }

    #[test]
    fn shifted_columns_must_exist_and_be_listed_once() {
        assert_eq!(
            ColumnSchema::new(names(), vec![Column::Relation(3)]),
            Err(SetupError::UnknownShiftedColumn(3))
        );
        assert_eq!(
            ColumnSchema::new(names(), vec![Column::Relation(1), Column::Relation(1)]),
            Err(SetupError::DuplicateShiftedColumn("b".into()))
        );
    }
}
