//! Backend abstraction for the cryptographic check.
//!
//! The proof-system math is a capability behind this trait, so the pipeline
//! (decode, load, shape, budget, dispatch) is separable from and testable
//! independently of whichever concrete proof system is plugged in.
//!
//! ## Contracts implementors should uphold
//! - `verify` runs only after the pipeline's structural, shape, and budget
//!   checks have passed; it may assume the inputs are well-formed.
//! - Failures are reported as [`VerifyError::Invalid`] (clean cryptographic
//!   rejection), [`VerifyError::Malformed`] (a structural inconsistency only
//!   detectable mid-verification), or [`VerifyError::Internal`]. Decode and
//!   budget classes belong to earlier stages and must not be raised here.
//! - Never panic on adversarial input; return `Err` instead.
//! - Deterministic and pure: same inputs, same outcome, no retries.

use crate::error::VerifyError;
use crate::types::{Proof, PublicInputs, VerificationKey};

/// The black-boxed cryptographic verifier capability.
///
/// Takes `&self` so hosts can carry per-instance parameters and tests can
/// instrument invocations (e.g., to assert the budget check fired first).
pub trait CryptoVerifier {
    /// Check `proof` against `inputs` under `vk`.
    ///
    /// # Errors
    /// `Invalid`, `Malformed`, or `Internal` per the module contract.
    fn verify(
        &self,
        proof: &Proof,
        inputs: &PublicInputs,
        vk: &VerificationKey,
    ) -> Result<(), VerifyError>;
}

impl<T: CryptoVerifier + ?Sized> CryptoVerifier for &T {
    fn verify(
        &self,
        proof: &Proof,
        inputs: &PublicInputs,
        vk: &VerificationKey,
    ) -> Result<(), VerifyError> {
        (**self).verify(proof, inputs, vk)
    }
}
