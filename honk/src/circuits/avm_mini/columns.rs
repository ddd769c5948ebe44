use crate::{
    columns::{Column, ColumnIndexer, ColumnSchema},
    error::SetupError,
};

/// Number of columns of the AVM mini trace.
pub const N_AVM_MINI_COLUMNS: usize = 12;

/// Columns of the AVM mini trace, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AvmMiniColumn {
    Clk,
    Positive,
    /// Set on row 0 only.
    First,
    Subop,
    InterIdx,
    MemIdx,
    /// Set on the last populated row.
    Last,
    MClk,
    MAddr,
    MVal,
    /// Set on the last access to an address.
    MLastAccess,
    /// 1 for a write, 0 for a read.
    MRw,
}

impl AvmMiniColumn {
    pub const ALL: [AvmMiniColumn; N_AVM_MINI_COLUMNS] = [
        AvmMiniColumn::Clk,
        AvmMiniColumn::Positive,
        AvmMiniColumn::First,
        AvmMiniColumn::Subop,
        AvmMiniColumn::InterIdx,
        AvmMiniColumn::MemIdx,
        AvmMiniColumn::Last,
        AvmMiniColumn::MClk,
        AvmMiniColumn::MAddr,
        AvmMiniColumn::MVal,
        AvmMiniColumn::MLastAccess,
        AvmMiniColumn::MRw,
    ];

    /// Columns whose next-row value is read, in wire order.
    pub const TO_BE_SHIFTED: [AvmMiniColumn; 3] =
        [AvmMiniColumn::MVal, AvmMiniColumn::MRw, AvmMiniColumn::MAddr];

    pub fn schema() -> Result<ColumnSchema, SetupError> {
        ColumnSchema::from_indexer(&Self::ALL, &Self::TO_BE_SHIFTED)
    }
}

impl ColumnIndexer for AvmMiniColumn {
    const N_COL: usize = N_AVM_MINI_COLUMNS;

    fn to_column(self) -> Column {
        Column::Relation(self as usize)
    }

    fn name(self) -> &'static str {
        match self {
            AvmMiniColumn::Clk => "avmMini_clk",
            AvmMiniColumn::Positive => "avmMini_positive",
            AvmMiniColumn::First => "avmMini_first",
            AvmMiniColumn::Subop => "avmMini_subop",
            AvmMiniColumn::InterIdx => "avmMini_inter_idx",
            AvmMiniColumn::MemIdx => "avmMini_mem_idx",
            AvmMiniColumn::Last => "avmMini_last",
            AvmMiniColumn::MClk => "avmMini_m_clk",
            AvmMiniColumn::MAddr => "avmMini_m_addr",
            AvmMiniColumn::MVal => "avmMini_m_val",
            AvmMiniColumn::MLastAccess => "avmMini_m_lastAccess",
            AvmMiniColumn::MRw => "avmMini_m_rw",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_indexed_in_wire_order() {
        for (i, col) in AvmMiniColumn::ALL.iter().enumerate() {
            assert_eq!(col.to_column(), Column::Relation(i));
        }
        let schema = AvmMiniColumn::schema().unwrap();
        assert_eq!(schema.n_columns(), AvmMiniColumn::N_COL);
        assert_eq!(schema.n_evaluations(), 15);
        assert_eq!(
            schema.shift_position(AvmMiniColumn::MAddr.to_column()),
            Some(2)
        );
        assert_eq!(schema.name(AvmMiniColumn::MRw.to_column()), Some("avmMini_m_rw"));
    }
}
