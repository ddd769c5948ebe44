pub mod claim;
pub mod error;
pub mod gemini;
pub mod kzg;
pub mod serialization;
pub mod shplonk;
pub mod srs;
pub mod transcript;
pub mod utils;

pub use claim::{OpeningClaim, OpeningPair, ProverOpeningClaim};
pub use error::{CommitmentError, TranscriptError};
pub use transcript::{ProverTranscript, Transcript, VerifierTranscript};

use ark_ec::AffineRepr;

/// Scalar field of the curve a commitment scheme commits in.
pub type ScalarField<C> = <<C as CommitmentScheme>::Curve as AffineRepr>::ScalarField;

/// A univariate polynomial commitment scheme able to prove a single opening
/// claim through the transcript.
pub trait CommitmentScheme {
    /// Group the commitments live in.
    type Curve: AffineRepr;
    /// Public parameters, shared read-only by every proof session.
    type SRS: Send + Sync;

    /// Largest number of coefficients `commit` accepts.
    fn max_poly_size(srs: &Self::SRS) -> usize;

    /// Commits to the polynomial with the given coefficients (lowest degree
    /// first).
    fn commit(
        srs: &Self::SRS,
        coefficients: &[ScalarField<Self>],
    ) -> Result<Self::Curve, CommitmentError>;

    /// Writes the opening proof of `claim` into the transcript.
    fn open(
        srs: &Self::SRS,
        claim: &ProverOpeningClaim<ScalarField<Self>>,
        transcript: &mut ProverTranscript,
    ) -> Result<(), CommitmentError>;

    /// Reads the opening proof of `claim` and checks it. A malformed proof is
    /// an error, a well-formed proof that does not check is `Ok(false)`.
    fn verify(
        srs: &Self::SRS,
        claim: &OpeningClaim<Self::Curve>,
        transcript: &mut VerifierTranscript,
    ) -> Result<bool, TranscriptError>;
}
