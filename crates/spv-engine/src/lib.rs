//! spv-engine — verification pipeline and the transcript reference backend.
//!
//! The pipeline sequences the stages of a verification call, cheapest and
//! most discriminating first, terminal on failure:
//!
//! ```text
//! SizeBudget → Decode → Load (cached) → ShapeCheck → CountBudget → CryptoCheck
//! ```
//!
//! The cryptographic stage is the [`spv_core::CryptoVerifier`] seam; this
//! crate ships [`TranscriptVerifier`], which recomputes a domain-separated
//! Blake3 transcript over the verification key, public inputs, and segment
//! commitments and compares the squeezed tag. The matching [`seal`] attestor
//! produces valid proofs from a witness byte stream for tests and demos.
//!
//! Verification is synchronous, deterministic, and pure: no I/O, no retries,
//! no shared mutable state beyond an optional caller-supplied image cache.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

mod pipeline;
mod transcript;

pub use pipeline::{Pipeline, TranscriptPipeline};
pub use transcript::{seal, TranscriptVerifier, SEGMENT_CHUNK};
