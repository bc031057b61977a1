//! Proof bundle artifact shared between frontends (CLI, FFI hosts).
//!
//! A [`ProofBundle`] pins the protocol identity, the image digest the proof
//! is bound to, the raw proof and public-input envelope bytes, and a
//! free-form `meta` JSON value for lightweight diagnostics. The envelope
//! bytes are exactly what `verify_proof_ffi` accepts — a bundle is a way to
//! ship the call's inputs as one file, not a second wire format.
//!
//! ## Backward/forward compatibility
//! - No `#[serde(deny_unknown_fields)]`, so newer producers with extra
//!   fields remain readable by older consumers.
//! - Unknown protocol variants decode as [`ProtocolKind::Unknown`].
//! - Prefer adding new **optional** fields with `#[serde(default)]` over
//!   changing existing field types.

use serde::{Deserialize, Serialize};

/// Which proof protocol produced the bundled envelopes.
///
/// Marked `#[non_exhaustive]` to allow future variants without forcing
/// downstream exhaustive matches; unknown serialized variants decode as
/// [`ProtocolKind::Unknown`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolKind {
    /// Blake3-transcript protocol (the workspace's reference backend).
    Transcript,
    /// Catch-all for newer/unknown protocols when deserializing.
    #[serde(other)]
    Unknown,
}

/// Serialized verification inputs plus metadata.
///
/// `proof_bytes` and `public_input_bytes` are complete wire envelopes;
/// treat them as opaque blobs. `meta` is free-form JSON for diagnostics
/// (timings, parameter echoes) — if a value matters at runtime, promote it
/// into a stable, typed field instead of parsing `meta`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofBundle {
    /// Protocol that produced the proof.
    pub protocol: ProtocolKind,
    /// Content digest of the program image the proof is bound to.
    pub image_digest: [u8; 32],
    /// Complete proof envelope (wire bytes).
    pub proof_bytes: Vec<u8>,
    /// Complete public-inputs envelope (wire bytes).
    pub public_input_bytes: Vec<u8>,
    /// Free-form metadata for debugging/observability.
    ///
    /// Not required; omitted values deserialize as `Null`.
    #[serde(default)]
    pub meta: serde_json::Value,
}

impl ProofBundle {
    /// Construct a new [`ProofBundle`].
    #[inline]
    #[must_use]
    pub fn new(
        protocol: ProtocolKind,
        image_digest: [u8; 32],
        proof_bytes: Vec<u8>,
        public_input_bytes: Vec<u8>,
        meta: serde_json::Value,
    ) -> Self {
        Self {
            protocol,
            image_digest,
            proof_bytes,
            public_input_bytes,
            meta,
        }
    }

    /// The bundled proof envelope bytes.
    #[inline]
    #[must_use]
    pub fn proof(&self) -> &[u8] {
        &self.proof_bytes
    }

    /// The bundled public-inputs envelope bytes.
    #[inline]
    #[must_use]
    pub fn public_inputs(&self) -> &[u8] {
        &self.public_input_bytes
    }
}
