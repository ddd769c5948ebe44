use super::{relations, AvmMiniColumn, AVM_MINI_CIRCUIT_SIZE, N_AVM_MINI_COLUMNS};
use crate::{
    error::SetupError,
    relation::RelationParameters,
    trace::{Row, Trace},
};
use ark_ff::PrimeField;
use std::ops::{Index, IndexMut};
use tracing::{debug, warn};

impl<F> Index<AvmMiniColumn> for Row<F> {
    type Output = F;

    fn index(&self, col: AvmMiniColumn) -> &F {
        &self.0[col as usize]
    }
}

impl<F> IndexMut<AvmMiniColumn> for Row<F> {
    fn index_mut(&mut self, col: AvmMiniColumn) -> &mut F {
        &mut self.0[col as usize]
    }
}

/// One access of the memory trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryAccess {
    pub clk: u64,
    pub addr: u64,
    pub val: u64,
    pub last_access: bool,
    pub write: bool,
}

impl MemoryAccess {
    fn to_row<F: PrimeField>(self) -> Row<F> {
        let mut row = Row::zero(N_AVM_MINI_COLUMNS);
        row[AvmMiniColumn::MClk] = F::from(self.clk);
        row[AvmMiniColumn::MAddr] = F::from(self.addr);
        row[AvmMiniColumn::MVal] = F::from(self.val);
        row[AvmMiniColumn::MLastAccess] = F::from(self.last_access);
        row[AvmMiniColumn::MRw] = F::from(self.write);
        row
    }
}

const fn access(clk: u64, addr: u64, val: u64, last_access: bool, write: bool) -> MemoryAccess {
    MemoryAccess {
        clk,
        addr,
        val,
        last_access,
        write,
    }
}

/// Memory accesses of [AvmMiniTraceBuilder::build_circuit], sorted by
/// address then clock. Address 2 is written, read, then written on its last
/// access; address 5 is read, written, then read on its last access.
pub const MEMORY_ACCESSES: [MemoryAccess; 6] = [
    access(5, 2, 23, false, true),
    access(8, 2, 23, false, false),
    access(17, 2, 15, true, true),
    access(2, 5, 0, false, false),
    access(24, 5, 7, false, true),
    access(32, 5, 7, true, false),
];

/// Builds AVM mini traces row by row.
#[derive(Clone, Debug, Default)]
pub struct AvmMiniTraceBuilder<F> {
    rows: Vec<Row<F>>,
}

impl<F: PrimeField> AvmMiniTraceBuilder<F> {
    pub fn new() -> Self {
        Self { rows: vec![] }
    }

    pub fn rows(&self) -> &[Row<F>] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row<F>] {
        &mut self.rows
    }

    /// Fills the builder with a memory trace over addresses 2 and 5.
    ///
    /// Row 0 only carries `first`, as the shifted columns must be zero there.
    /// Rows 1 to 6 hold [MEMORY_ACCESSES], row 6 carries `last` and the rest
    /// of the [AVM_MINI_CIRCUIT_SIZE] rows are zero.
    pub fn build_circuit(&mut self) {
        self.rows.clear();

        let mut first = Row::zero(N_AVM_MINI_COLUMNS);
        first[AvmMiniColumn::First] = F::one();
        self.rows.push(first);

        self.rows
            .extend(MEMORY_ACCESSES.iter().map(|access| access.to_row()));
        if let Some(row) = self.rows.last_mut() {
            row[AvmMiniColumn::Last] = F::one();
        }

        self.rows
            .resize(AVM_MINI_CIRCUIT_SIZE, Row::zero(N_AVM_MINI_COLUMNS));
        debug!(rows = self.rows.len(), "built circuit");
    }

    /// The rows as a trace.
    pub fn trace(&self) -> Result<Trace<F>, SetupError> {
        Trace::from_rows(self.rows.clone(), N_AVM_MINI_COLUMNS)
    }

    /// Whether every subrelation vanishes on every row. The first failure is
    /// logged.
    pub fn check_circuit(&self) -> Result<bool, SetupError> {
        let relations = relations::<F>()?;
        let trace = self.trace()?;
        match trace.check(&relations, &RelationParameters::default()) {
            Ok(()) => Ok(true),
            Err(unsatisfied) => {
                warn!(%unsatisfied, "circuit check failed");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{columns::ColumnIndexer, Fp};
    use ark_ff::{One, Zero};

    #[test]
    fn the_built_circuit_is_satisfied() {
        let mut builder = AvmMiniTraceBuilder::<Fp>::new();
        builder.build_circuit();
        assert_eq!(builder.rows().len(), AVM_MINI_CIRCUIT_SIZE);
        assert_eq!(builder.rows()[6][AvmMiniColumn::Last], Fp::one());
        assert_eq!(builder.rows()[3][AvmMiniColumn::MVal], Fp::from(15u64));
        assert!(builder.check_circuit().unwrap());
    }

    #[test]
    fn a_read_of_a_stale_value_is_caught() {
        let mut builder = AvmMiniTraceBuilder::<Fp>::new();
        builder.build_circuit();
        // The read on row 2 must see the 23 written on row 1.
        builder.rows_mut()[2][AvmMiniColumn::MVal] = Fp::from(24u64);
        let trace = builder.trace().unwrap();
        let unsatisfied = trace
            .check(&relations().unwrap(), &RelationParameters::default())
            .unwrap_err();
        assert_eq!(unsatisfied.row, 1);
        assert_eq!(unsatisfied.name, "m_val_read_consistency");
        assert!(!builder.check_circuit().unwrap());
    }

    #[test]
    fn shifted_columns_are_zero_on_the_first_row() {
        let mut builder = AvmMiniTraceBuilder::<Fp>::new();
        builder.build_circuit();
        let trace = builder.trace().unwrap();
        assert_eq!(trace.first_unshiftable(&relations().unwrap()), None);
        assert!(trace.column(AvmMiniColumn::MVal.to_column())[0].is_zero());
    }
}
