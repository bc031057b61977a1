//! spv-core — canonical types, errors, and status codes for the SPV verifier.
//!
//! This crate defines the **stable boundary** used across SPV crates:
//! - decoded input types (`Proof`, `PublicInputs`, `ProgramImage`, …),
//! - the error taxonomy (`DecodeError`, `LoadError`, `VerifyError`) and its
//!   mapping onto the FFI status codes,
//! - verification budget ceilings ([`Limits`]),
//! - the backend-agnostic [`CryptoVerifier`] seam, and
//! - [`ProofBundle`] JSON/CBOR file I/O for hosts that ship the three inputs
//!   as one artifact.
//!
//! Nothing in this crate touches raw pointers; the FFI layer reconstructs
//! slices once and everything below it works on `&[u8]` and owned types.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Small, explicit allowlist to keep docs readable and APIs ergonomic.
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::doc_markdown
)]

/// Backend seam: the black-boxed cryptographic check.
pub mod backend;
/// Proof bundle artifact (raw envelope sections + free-form metadata).
pub mod bundle;
/// Error taxonomy shared by the decoder, loader, and engine.
pub mod error;
/// JSON/CBOR helpers and auto-detecting read/write APIs for bundles.
pub mod io;
/// Budget ceilings enforced before any expensive verification work.
pub mod limits;
/// FFI status codes and the error-to-status mapping.
pub mod status;
/// Canonical decoded input types shared across the workspace.
pub mod types;

pub use backend::CryptoVerifier;
pub use bundle::{ProofBundle, ProtocolKind};
pub use error::{DecodeError, LoadError, VerifyError};
pub use limits::Limits;
pub use status::{status_code, status_name, status_of_error};
pub use types::{FieldWidth, InputShape, Proof, ProgramImage, PublicInputs, VerificationKey};

/// Commonly-used items for quick imports.
///
/// ```rust
/// use spv_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::backend::CryptoVerifier;
    pub use crate::bundle::ProofBundle;
    pub use crate::error::{DecodeError, LoadError, VerifyError};
    pub use crate::limits::Limits;
    pub use crate::status::status_code;
    pub use crate::types::*;
}
