// crates/spv-crypto/src/lib.rs

//! Minimal crypto substrate: Blake3 transcript with a simple absorb/challenge API.
//!
//! ⚠️ **Security note:** This models a domain-separated random oracle using
//! Blake3 for the workspace's reference transcript protocol. It is scaffolding
//! for plumbing and tests, not a final protocol design.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]

use blake3::Hasher;
use std::io::Read;

/// Fixed domain prefix to seed transcripts.
const TRANSCRIPT_PREFIX: &[u8] = b"spv.transcript.v1";

/// Transcript interface used by the verification engine.
///
/// Implementations should apply domain separation for both absorbs and
/// challenges and be deterministic with respect to the transcript state.
pub trait Transcript {
    /// Add raw bytes under a label (domain-separated).
    fn absorb(&mut self, label: &str, bytes: &[u8]);

    /// Convenience: absorb an unsigned 64-bit value (LE).
    fn absorb_u64(&mut self, label: &str, x: u64) {
        self.absorb(label, &x.to_le_bytes());
    }

    /// Convenience: absorb an unsigned 32-bit value (LE).
    fn absorb_u32(&mut self, label: &str, x: u32) {
        self.absorb(label, &x.to_le_bytes());
    }

    /// Squeeze `n` bytes as a challenge under `label`.
    #[must_use]
    fn challenge_bytes(&mut self, label: &str, n: usize) -> Vec<u8>;
}

/// Blake3-based transcript.
///
/// Deterministic, domain-separated random-oracle model. **Do not** rely on
/// this exact construction for security-critical deployments.
#[derive(Clone, Debug)]
pub struct Blake3Transcript {
    st: Hasher,
}

impl Blake3Transcript {
    /// Create a new transcript with a domain separation prefix.
    #[must_use]
    pub fn new(domain_sep: &str) -> Self {
        let mut st = Hasher::new();
        // Seed with a fixed prefix and the domain string length+bytes.
        st.update(TRANSCRIPT_PREFIX);
        st.update(&(domain_sep.len() as u32).to_le_bytes());
        st.update(domain_sep.as_bytes());
        Self { st }
    }
}

impl Transcript for Blake3Transcript {
    fn absorb(&mut self, label: &str, bytes: &[u8]) {
        // Domain separation for each absorb:
        //   tag "absorb", label length+bytes, payload length+bytes.
        self.st.update(b"absorb");
        self.st.update(&(label.len() as u32).to_le_bytes());
        self.st.update(label.as_bytes());
        self.st.update(&(bytes.len() as u32).to_le_bytes());
        self.st.update(bytes);
    }

    fn challenge_bytes(&mut self, label: &str, n: usize) -> Vec<u8> {
        // Derive an XOF stream from current state + label.
        let mut st = self.st.clone();
        st.update(b"challenge");
        st.update(&(label.len() as u32).to_le_bytes());
        st.update(label.as_bytes());

        let mut rdr = st.finalize_xof();
        let mut out = vec![0u8; n];
        // `OutputReader` implements `Read` and is infallible for exact reads.
        #[allow(clippy::expect_used)]
        rdr.read_exact(&mut out)
            .expect("blake3::OutputReader should not fail");

        // Transcript forward progress after a challenge.
        self.st.update(b"after_challenge");
        self.st.update(&(label.len() as u32).to_le_bytes());
        self.st.update(label.as_bytes());

        out
    }
}
