//! Verification budget ceilings.
//!
//! The engine enforces these *before* the cryptographic stage so a malicious
//! proof cannot trigger unbounded work. Configuration travels as a plain
//! struct passed explicitly; there is no ambient/global configuration.

/// Hard ceilings applied to decoded inputs before any transcript work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Maximum raw proof envelope size in bytes.
    pub max_proof_bytes: usize,
    /// Maximum raw public-inputs envelope size in bytes.
    pub max_public_input_bytes: usize,
    /// Maximum raw program-image envelope size in bytes.
    pub max_image_bytes: usize,
    /// Maximum number of segment commitments a proof may carry.
    pub max_segments: u32,
    /// Maximum claimed execution length.
    pub max_claimed_steps: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_proof_bytes: 1 << 20,        // 1 MiB
            max_public_input_bytes: 64 << 10, // 64 KiB
            max_image_bytes: 16 << 20,       // 16 MiB
            max_segments: 4096,
            max_claimed_steps: 1 << 32,
        }
    }
}

impl Limits {
    /// Ceilings high enough to never trip; test-only convenience.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_proof_bytes: usize::MAX,
            max_public_input_bytes: usize::MAX,
            max_image_bytes: usize::MAX,
            max_segments: u32::MAX,
            max_claimed_steps: u64::MAX,
        }
    }
}
