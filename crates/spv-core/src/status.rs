//! Stable FFI status codes and the error-to-status mapping.
//!
//! Only [`STATUS_OK`] means the proof was accepted. The distinct negative
//! codes exist purely for diagnostics; callers must treat *any* non-zero
//! status as "proof not accepted" and must not special-case individual
//! error codes in authorization decisions.

use crate::error::{LoadError, VerifyError};

/// Proof cryptographically valid.
pub const STATUS_OK: i32 = 0;
/// Proof envelope failed to decode.
pub const STATUS_MALFORMED_PROOF: i32 = -1;
/// Public-inputs envelope failed to decode.
pub const STATUS_MALFORMED_PUBLIC_INPUTS: i32 = -2;
/// Program-image envelope failed to decode or was unrecognizable.
pub const STATUS_MALFORMED_PROGRAM_IMAGE: i32 = -3;
/// Cryptographic check failed: proof invalid (or malformed late-stage).
pub const STATUS_PROOF_INVALID: i32 = -4;
/// Internal failure or boundary-contract violation.
pub const STATUS_INTERNAL_ERROR: i32 = -5;
/// Public inputs do not match the shape the image declares.
pub const STATUS_SHAPE_MISMATCH: i32 = -6;
/// Decoded input exceeds the verification budget.
pub const STATUS_BUDGET_EXCEEDED: i32 = -7;

/// Map a pipeline outcome onto the stable status code.
#[inline]
#[must_use]
pub fn status_code(outcome: &Result<(), VerifyError>) -> i32 {
    match outcome {
        Ok(()) => STATUS_OK,
        Err(e) => status_of_error(e),
    }
}

/// Map a [`VerifyError`] onto the stable status code.
#[must_use]
pub fn status_of_error(err: &VerifyError) -> i32 {
    match err {
        VerifyError::ProofDecode(_) => STATUS_MALFORMED_PROOF,
        VerifyError::PublicInputsDecode(_) => STATUS_MALFORMED_PUBLIC_INPUTS,
        VerifyError::ImageDecode(_)
        | VerifyError::Load(LoadError::UnrecognizedFormat { .. }) => {
            STATUS_MALFORMED_PROGRAM_IMAGE
        }
        VerifyError::Load(LoadError::ShapeMismatch { .. }) => STATUS_SHAPE_MISMATCH,
        VerifyError::BudgetExceeded { .. } => STATUS_BUDGET_EXCEEDED,
        // A late-stage structural inconsistency is still a rejected proof;
        // both classes share the crypto-failure code.
        VerifyError::Invalid | VerifyError::Malformed(_) => STATUS_PROOF_INVALID,
        VerifyError::Internal(_) => STATUS_INTERNAL_ERROR,
    }
}

/// Human-readable name for a status code (diagnostics only).
#[must_use]
pub const fn status_name(code: i32) -> &'static str {
    match code {
        STATUS_OK => "ok",
        STATUS_MALFORMED_PROOF => "malformed-proof",
        STATUS_MALFORMED_PUBLIC_INPUTS => "malformed-public-inputs",
        STATUS_MALFORMED_PROGRAM_IMAGE => "malformed-program-image",
        STATUS_PROOF_INVALID => "proof-invalid",
        STATUS_INTERNAL_ERROR => "internal-error",
        STATUS_SHAPE_MISMATCH => "shape-mismatch",
        STATUS_BUDGET_EXCEEDED => "budget-exceeded",
        _ => "unknown",
    }
}
