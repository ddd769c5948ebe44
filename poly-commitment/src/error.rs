use thiserror::Error;

/// Errors raised while reading or writing the Fiat-Shamir transcript.
///
/// The verifier side never panics on proof bytes: every short read or
/// non-canonical encoding ends up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("the proof ended while reading {label} ({remaining} bytes left)")]
    UnexpectedEnd { label: String, remaining: usize },
    #[error("the bytes of {label} are not a canonical encoding: {reason}")]
    Deserialization { label: String, reason: String },
    #[error("the message {label} could not be serialized: {reason}")]
    Serialization { label: String, reason: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommitmentError {
    #[error("the polynomial has {0} coefficients but the SRS only supports {1}")]
    PolynomialTooLarge(usize, usize),
    #[error("the multi-scalar multiplication received {0} bases and {1} scalars")]
    MsmLengthMismatch(usize, usize),
    #[error("the challenge {0} makes a required inversion impossible")]
    DegenerateChallenge(&'static str),
    #[error("a polynomial to be shifted does not vanish at the origin")]
    ShiftedPolynomialNotZeroAtOrigin,
    #[error("the multilinear evaluation point has {0} coordinates, expected {1}")]
    PointDimensionMismatch(usize, usize),
    #[error("the claimed evaluation does not match the polynomial")]
    IncorrectEvaluation,
    #[error("an opening reduction needs at least one claim")]
    NoClaims,
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
}
