//! A minimal VM memory trace: boolean flags and the consistency of values
//! between consecutive accesses to the same address.
//!
//! The memory part of the trace lists accesses sorted by address then clock.
//! Unless a row is the last access to its address, the next row accesses the
//! same address, and a read there sees the value of the current row.

pub mod columns;
pub mod constraints;
pub mod trace;

pub use columns::{AvmMiniColumn, N_AVM_MINI_COLUMNS};
pub use constraints::relations;
pub use trace::AvmMiniTraceBuilder;

/// Name of the relation set.
pub const AVM_MINI: &str = "avm_mini";

/// Number of rows of the traces built by [AvmMiniTraceBuilder].
pub const AVM_MINI_CIRCUIT_SIZE: usize = 256;
