//! Stage-sequenced verification pipeline.
//!
//! Each stage is terminal on failure and nothing is retried; the caller maps
//! the result onto a status code with [`spv_core::status_code`]. Size
//! ceilings apply to the raw envelopes *before* decoding (so an oversized
//! buffer cannot buy decode work either); count ceilings apply to decoded
//! quantities after the shape check, always before the cryptographic stage.

use std::sync::Arc;

use spv_core::{CryptoVerifier, Limits, VerificationKey, VerifyError};
use spv_image::{check_shape, image_digest, load_image, ImageCache};
use spv_wire::{decode_program_image, decode_proof, decode_public_inputs};
use tracing::{debug, warn};

use crate::transcript::TranscriptVerifier;

/// Verification pipeline over a pluggable cryptographic backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pipeline<C> {
    crypto: C,
    limits: Limits,
}

/// The pipeline wired to the workspace's transcript backend.
pub type TranscriptPipeline = Pipeline<TranscriptVerifier>;

impl<C: CryptoVerifier> Pipeline<C> {
    /// Pipeline with default [`Limits`].
    #[must_use]
    pub fn new(crypto: C) -> Self {
        Self {
            crypto,
            limits: Limits::default(),
        }
    }

    /// Pipeline with caller-chosen ceilings.
    #[must_use]
    pub const fn with_limits(crypto: C, limits: Limits) -> Self {
        Self { crypto, limits }
    }

    /// Configured ceilings.
    #[inline]
    #[must_use]
    pub const fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Run a full verification call over raw envelope bytes.
    ///
    /// `cache`, when supplied, is consulted by the content digest of
    /// `image_bytes`; a hit skips the image decode and load entirely.
    pub fn verify_bytes(
        &self,
        proof_bytes: &[u8],
        public_input_bytes: &[u8],
        image_bytes: &[u8],
        cache: Option<&ImageCache>,
    ) -> Result<(), VerifyError> {
        let outcome = self.run(proof_bytes, public_input_bytes, image_bytes, cache);
        if let Err(err) = &outcome {
            warn!(%err, "proof not accepted");
        }
        outcome
    }

    fn run(
        &self,
        proof_bytes: &[u8],
        public_input_bytes: &[u8],
        image_bytes: &[u8],
        cache: Option<&ImageCache>,
    ) -> Result<(), VerifyError> {
        // Raw-size budget: cheapest possible rejection of oversized input.
        check_size("proof_bytes", proof_bytes.len(), self.limits.max_proof_bytes)?;
        check_size(
            "public_input_bytes",
            public_input_bytes.len(),
            self.limits.max_public_input_bytes,
        )?;
        check_size("image_bytes", image_bytes.len(), self.limits.max_image_bytes)?;

        // Decode; each input's failure keeps its identity for the status code.
        let proof = decode_proof(proof_bytes).map_err(VerifyError::ProofDecode)?;
        let inputs =
            decode_public_inputs(public_input_bytes).map_err(VerifyError::PublicInputsDecode)?;
        debug!(
            segments = proof.segments.len(),
            claimed_steps = proof.claimed_steps,
            inputs = inputs.count(),
            "decoded proof and public inputs"
        );

        let vk = self.load_key(image_bytes, cache)?;

        // Shape before budget: a mismatch is a distinct, reportable class.
        check_shape(&vk, &inputs)?;

        // Decoded-quantity budget, always ahead of the cryptographic stage.
        if proof.segments.len() as u64 > u64::from(self.limits.max_segments) {
            return Err(VerifyError::BudgetExceeded {
                what: "segments",
                got: proof.segments.len() as u64,
                max: u64::from(self.limits.max_segments),
            });
        }
        if proof.claimed_steps > self.limits.max_claimed_steps {
            return Err(VerifyError::BudgetExceeded {
                what: "claimed_steps",
                got: proof.claimed_steps,
                max: self.limits.max_claimed_steps,
            });
        }

        debug!(image = %vk.label, "dispatching cryptographic check");
        self.crypto.verify(&proof, &inputs, &vk)
    }

    /// Load the verification key, through the cache when one is supplied.
    fn load_key(
        &self,
        image_bytes: &[u8],
        cache: Option<&ImageCache>,
    ) -> Result<Arc<VerificationKey>, VerifyError> {
        let Some(cache) = cache else {
            let decoded = decode_program_image(image_bytes).map_err(VerifyError::ImageDecode)?;
            return Ok(Arc::new(load_image(&decoded, image_bytes)?));
        };

        let digest = image_digest(image_bytes);
        if let Some(vk) = cache.get(&digest) {
            debug!("image cache hit");
            return Ok(vk);
        }
        // Build outside the lock; insert whole.
        let decoded = decode_program_image(image_bytes).map_err(VerifyError::ImageDecode)?;
        let vk = Arc::new(load_image(&decoded, image_bytes)?);
        cache.insert(digest, Arc::clone(&vk));
        debug!("image cache miss; loaded and cached");
        Ok(vk)
    }
}

fn check_size(what: &'static str, got: usize, max: usize) -> Result<(), VerifyError> {
    if got > max {
        return Err(VerifyError::BudgetExceeded {
            what,
            got: got as u64,
            max: max as u64,
        });
    }
    Ok(())
}
