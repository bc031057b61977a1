//! Error taxonomy for decoding, loading, and verification.
//!
//! Every failure mode that can cross the FFI boundary is one of these
//! variants; [`crate::status`] maps them onto the stable status codes. There
//! is deliberately no retry anywhere — verification is deterministic, so a
//! retry cannot change the outcome.

use crate::types::InputShape;
use thiserror::Error;

/// Structural failure while decoding one of the three wire envelopes.
///
/// The decoder is total: any byte string either decodes or fails with one of
/// these, without reading out of bounds and without returning a partial
/// structure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Fewer bytes than the structure requires.
    #[error("input too short: need {need} bytes, have {have}")]
    TooShort {
        /// Bytes required to make progress.
        need: usize,
        /// Bytes actually available.
        have: usize,
    },

    /// Envelope magic does not identify the expected input kind.
    #[error("bad magic {found:02x?}, expected {expected:02x?}")]
    BadMagic {
        /// Magic this decoder accepts.
        expected: [u8; 4],
        /// Magic actually present.
        found: [u8; 4],
    },

    /// Envelope wire version is not supported.
    #[error("unsupported wire version {found} (supported: {supported})")]
    BadVersion {
        /// Version found on the wire.
        found: u16,
        /// Newest version this decoder understands.
        supported: u16,
    },

    /// An internal length field disagrees with the bytes actually present.
    #[error("length mismatch: field claims {claimed} bytes, {actual} present")]
    LengthMismatch {
        /// Length claimed by the wire field.
        claimed: usize,
        /// Bytes actually present.
        actual: usize,
    },

    /// Public-input element count exceeds what the wire format admits.
    #[error("field count {count} exceeds wire maximum {max}")]
    UnsupportedFieldCount {
        /// Count found on the wire.
        count: u32,
        /// Hard wire-format ceiling.
        max: u32,
    },

    /// Public-input element width is not one of the supported widths.
    #[error("unsupported field width {width} (supported: 4, 8, 16, 32)")]
    UnsupportedFieldWidth {
        /// Width byte found on the wire.
        width: u8,
    },

    /// Image label bytes are not valid UTF-8 or exceed the wire bound.
    #[error("image label invalid (not UTF-8 or over the wire bound)")]
    BadLabel,
}

/// Failure while interpreting a decoded program image.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The image decoded structurally but is not a format we recognize.
    #[error("unrecognized program image format: {reason}")]
    UnrecognizedFormat {
        /// What specifically was unrecognizable.
        reason: &'static str,
    },

    /// Supplied public inputs do not match the shape the image declares.
    ///
    /// Distinct from a cryptographic failure: the proof was never checked.
    #[error("public input shape mismatch: image declares {expected}, got {got}")]
    ShapeMismatch {
        /// Shape the image declares.
        expected: InputShape,
        /// Shape of the supplied public inputs.
        got: InputShape,
    },
}

/// Top-level verification failure, one per pipeline stage.
///
/// The three `*Decode` variants keep the identity of the input that failed so
/// the status code can tell the caller which buffer was malformed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// The proof envelope failed to decode.
    #[error("malformed proof: {0}")]
    ProofDecode(#[source] DecodeError),

    /// The public-inputs envelope failed to decode.
    #[error("malformed public inputs: {0}")]
    PublicInputsDecode(#[source] DecodeError),

    /// The program-image envelope failed to decode.
    #[error("malformed program image: {0}")]
    ImageDecode(#[source] DecodeError),

    /// The image loader rejected the decoded image or the input shape.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A decoded quantity exceeds the configured verification budget.
    ///
    /// Raised before any transcript work runs, so adversarially large inputs
    /// cannot buy unbounded computation.
    #[error("verification budget exceeded: {what} = {got}, ceiling {max}")]
    BudgetExceeded {
        /// Which quantity blew the budget.
        what: &'static str,
        /// Decoded value.
        got: u64,
        /// Configured ceiling.
        max: u64,
    },

    /// The cryptographic check failed cleanly: the proof is not valid.
    #[error("proof rejected by cryptographic check")]
    Invalid,

    /// A structural inconsistency only detectable during verification.
    #[error("proof malformed at verification time: {0}")]
    Malformed(String),

    /// Defensive catch-all; the boundary fails closed on this.
    #[error("internal verifier error: {0}")]
    Internal(String),
}
