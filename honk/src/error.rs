//! This module implements the [`ProverError`], [`VerifyError`] and
//! [`SetupError`] types.

use poly_commitment::error::{CommitmentError, TranscriptError};
use thiserror::Error;

/// Errors that can arise when creating a proof
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProverError {
    #[error("the trace has {0} rows but the proving key expects {1}")]
    CircuitSizeMismatch(usize, usize),

    #[error("the trace has {0} columns but the relation set declares {1}")]
    ColumnCountMismatch(usize, usize),

    #[error("the column {0} is shifted but is not zero on the first row")]
    ShiftedColumnNotZeroAtOrigin(String),

    #[error("the opening could not be computed: {0}")]
    Commitment(#[from] CommitmentError),

    #[error("the transcript could not be written: {0}")]
    Transcript(#[from] TranscriptError),

    #[error("the thread pool could not be built: {0}")]
    ThreadPool(String),
}

/// Errors that can arise when verifying a proof
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("the proof is for a circuit of size {0}, the verification key expects {1}")]
    CircuitSizeMismatch(u32, u32),

    #[error("the proof is malformed: {0}")]
    Transcript(#[from] TranscriptError),

    #[error("the sumcheck part of the proof is malformed")]
    MalformedSumcheck,

    #[error("the sumcheck did not verify")]
    SumcheckFailed,

    #[error("the opening proof failed to verify")]
    OpeningFailed,

    #[error("the proof has {0} bytes left after the last message")]
    TrailingBytes(usize),

    #[error("the challenge {0} is degenerate")]
    DegenerateChallenge(&'static str),

    #[error("the opening claims could not be reduced: {0}")]
    Commitment(CommitmentError),
}

impl From<CommitmentError> for VerifyError {
    fn from(e: CommitmentError) -> Self {
        match e {
            CommitmentError::Transcript(e) => VerifyError::Transcript(e),
            CommitmentError::DegenerateChallenge(label) => VerifyError::DegenerateChallenge(label),
            e => VerifyError::Commitment(e),
        }
    }
}

/// Errors that can arise when preparing a relation set, an index or a trace.
/// They signal a programming error, not a bad proof.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("the subrelation {name} declares length {declared} but its degree requires {required}")]
    SubrelationTooLong {
        name: String,
        declared: usize,
        required: usize,
    },

    #[error("the subrelation {name} reads the next row of {column}, which is not shifted")]
    UnshiftedNextReference { name: String, column: String },

    #[error("the subrelation {name} reads column {index}, outside of the schema")]
    UnknownColumn { name: String, index: usize },

    #[error("the subrelation {name} reads challenge {index}, only {declared} are declared")]
    UnknownChallenge {
        name: String,
        index: usize,
        declared: usize,
    },

    #[error("the shifted column {0} is outside of the schema")]
    UnknownShiftedColumn(usize),

    #[error("the column {0} is listed twice as shifted")]
    DuplicateShiftedColumn(String),

    #[error("the circuit size {0} is not a power of two of at least 2")]
    InvalidCircuitSize(usize),

    #[error("the SRS supports polynomials of {0} coefficients, the circuit needs {1}")]
    SrsTooSmall(usize, usize),

    #[error("the row {row} has {width} values, the schema declares {expected}")]
    RowWidthMismatch {
        row: usize,
        width: usize,
        expected: usize,
    },
}
