//! Envelope encoders.
//!
//! These exist for the reference attestor, the CLI, and tests — the verifier
//! itself never encodes. Encoders are total too: structurally impossible
//! values (oversized vectors, non-conforming labels) fail instead of
//! producing envelopes the decoder would reject.

use crate::{write_envelope, IMAGE_MAGIC, INPUTS_MAGIC, MAX_LABEL_LEN, MAX_WIRE_FIELD_COUNT, PROOF_MAGIC};
use spv_core::types::TAG_LEN;
use spv_core::{DecodeError, ProgramImage, Proof, PublicInputs};

/// Encode a proof into its wire envelope.
pub fn encode_proof(proof: &Proof) -> Result<Vec<u8>, DecodeError> {
    let n_segments = u32::try_from(proof.segments.len()).map_err(|_| {
        DecodeError::LengthMismatch {
            claimed: proof.segments.len(),
            actual: u32::MAX as usize,
        }
    })?;

    let mut payload = Vec::with_capacity(32 + 8 + 4 + proof.segments.len() * 32 + 4 + TAG_LEN);
    payload.extend_from_slice(&proof.image_digest);
    payload.extend_from_slice(&proof.claimed_steps.to_le_bytes());
    payload.extend_from_slice(&n_segments.to_le_bytes());
    for seg in &proof.segments {
        payload.extend_from_slice(seg);
    }
    payload.extend_from_slice(&(TAG_LEN as u32).to_le_bytes());
    payload.extend_from_slice(&proof.tag);

    write_envelope(PROOF_MAGIC, &payload)
}

/// Encode public inputs into their wire envelope.
///
/// Fails if `data` is not a whole number of `width`-sized elements or the
/// element count exceeds the wire ceiling.
pub fn encode_public_inputs(inputs: &PublicInputs) -> Result<Vec<u8>, DecodeError> {
    let width = inputs.width.bytes();
    if inputs.data.len() % width != 0 {
        return Err(DecodeError::LengthMismatch {
            claimed: inputs.data.len(),
            actual: (inputs.data.len() / width) * width,
        });
    }
    let count = (inputs.data.len() / width) as u32;
    if count > MAX_WIRE_FIELD_COUNT {
        return Err(DecodeError::UnsupportedFieldCount {
            count,
            max: MAX_WIRE_FIELD_COUNT,
        });
    }

    let mut payload = Vec::with_capacity(1 + 4 + inputs.data.len());
    payload.push(inputs.width as u8);
    payload.extend_from_slice(&count.to_le_bytes());
    payload.extend_from_slice(&inputs.data);

    write_envelope(INPUTS_MAGIC, &payload)
}

/// Encode a program image into its wire envelope.
///
/// Fails if the label exceeds [`MAX_LABEL_LEN`] bytes.
pub fn encode_program_image(image: &ProgramImage) -> Result<Vec<u8>, DecodeError> {
    if image.label.len() > MAX_LABEL_LEN {
        return Err(DecodeError::BadLabel);
    }

    let mut payload = Vec::with_capacity(32 + 4 + 1 + 2 + image.label.len());
    payload.extend_from_slice(&image.circuit_commitment);
    payload.extend_from_slice(&image.input_count.to_le_bytes());
    payload.push(image.input_width);
    payload.extend_from_slice(&(image.label.len() as u16).to_le_bytes());
    payload.extend_from_slice(image.label.as_bytes());

    write_envelope(IMAGE_MAGIC, &payload)
}
