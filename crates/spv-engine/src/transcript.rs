//! Transcript reference backend: recompute-and-compare verification.
//!
//! The "proof" is a 64-byte tag squeezed from a transcript that binds the
//! circuit commitment, the image content digest, the public inputs, the
//! claimed execution length, and the segment commitments. The verifier
//! rebuilds the same transcript and compares tags; the [`seal`] attestor is
//! the producing side.
//!
//! ⚠️ This is scaffolding in the spirit of a v0 protocol: it exercises the
//! whole pipeline deterministically but carries no cryptographic soundness.
//! A real proof system replaces [`TranscriptVerifier`] behind the
//! [`CryptoVerifier`] seam without touching the pipeline.

use spv_core::types::TAG_LEN;
use spv_core::{CryptoVerifier, Proof, PublicInputs, VerificationKey, VerifyError};
use spv_crypto::{Blake3Transcript, Transcript};
use tracing::debug;

/// Witness bytes per segment commitment.
pub const SEGMENT_CHUNK: usize = 64 * 1024;

/// Top-level protocol domain string.
const DS_DOMAIN: &str = "spv-attest/v1";
/// Segment leaf-hash domain prefix.
const DS_SEGMENT_LEAF: &[u8] = b"spv.segment.v1";

/// Segment commitment over one witness chunk.
fn segment_commitment(chunk: &[u8]) -> [u8; 32] {
    let mut h = blake3::Hasher::new();
    h.update(DS_SEGMENT_LEAF);
    h.update(chunk);
    *h.finalize().as_bytes()
}

/// Number of segments a well-formed proof carries for `steps` claimed steps.
const fn expected_segments(steps: u64) -> u64 {
    steps.div_ceil(SEGMENT_CHUNK as u64)
}

/// Rebuild the transcript and squeeze the tag both sides must agree on.
fn transcript_tag(
    vk: &VerificationKey,
    inputs: &PublicInputs,
    claimed_steps: u64,
    segments: &[[u8; 32]],
) -> [u8; TAG_LEN] {
    let mut tr = Blake3Transcript::new(DS_DOMAIN);
    tr.absorb("circuit", &vk.circuit_commitment);
    tr.absorb("image", &vk.image_digest);
    tr.absorb_u32("input_width", u32::from(inputs.width as u8));
    tr.absorb_u32("input_count", inputs.count());
    tr.absorb("inputs", &inputs.data);
    tr.absorb_u64("steps", claimed_steps);
    tr.absorb_u32("n_segments", segments.len() as u32);
    for seg in segments {
        tr.absorb("segment", seg);
    }
    let bytes = tr.challenge_bytes("tag", TAG_LEN);
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&bytes);
    tag
}

/// Reference attestor: produce a proof the transcript verifier accepts.
///
/// `trace` is the witness byte stream; each [`SEGMENT_CHUNK`] chunk becomes
/// one segment commitment and `claimed_steps` is the trace length.
#[must_use]
pub fn seal(vk: &VerificationKey, inputs: &PublicInputs, trace: &[u8]) -> Proof {
    let segments: Vec<[u8; 32]> = trace.chunks(SEGMENT_CHUNK).map(segment_commitment).collect();
    let claimed_steps = trace.len() as u64;
    let tag = transcript_tag(vk, inputs, claimed_steps, &segments);
    Proof {
        image_digest: vk.image_digest,
        claimed_steps,
        segments,
        tag,
    }
}

/// The transcript protocol's [`CryptoVerifier`] implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct TranscriptVerifier;

impl CryptoVerifier for TranscriptVerifier {
    fn verify(
        &self,
        proof: &Proof,
        inputs: &PublicInputs,
        vk: &VerificationKey,
    ) -> Result<(), VerifyError> {
        // The proof attests to some program; if it is not this one, the
        // encoding is fine and the attestation simply does not apply.
        if proof.image_digest != vk.image_digest {
            debug!("proof bound to a different image digest");
            return Err(VerifyError::Invalid);
        }

        // Late-stage structural consistency: segment count must agree with
        // the claimed execution length.
        let expected = expected_segments(proof.claimed_steps);
        if proof.segments.len() as u64 != expected {
            return Err(VerifyError::Malformed(format!(
                "segment count {} disagrees with claimed steps {} (expected {expected})",
                proof.segments.len(),
                proof.claimed_steps,
            )));
        }

        let want = transcript_tag(vk, inputs, proof.claimed_steps, &proof.segments);
        if want == proof.tag {
            Ok(())
        } else {
            Err(VerifyError::Invalid)
        }
    }
}
