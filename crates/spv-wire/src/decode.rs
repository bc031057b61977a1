//! Total decoders for the three wire envelopes.
//!
//! Each decoder validates the envelope header, then walks the payload with a
//! bounds-checked cursor, checking every internal length field against the
//! remaining bytes before allocating and requiring exact consumption.

use crate::cursor::Cursor;
use crate::{read_envelope, IMAGE_MAGIC, INPUTS_MAGIC, MAX_LABEL_LEN, MAX_WIRE_FIELD_COUNT, PROOF_MAGIC};
use spv_core::types::TAG_LEN;
use spv_core::{DecodeError, FieldWidth, ProgramImage, Proof, PublicInputs};

/// Decode a proof envelope.
pub fn decode_proof(bytes: &[u8]) -> Result<Proof, DecodeError> {
    let payload = read_envelope(bytes, PROOF_MAGIC)?;
    let mut c = Cursor::new(payload);

    let image_digest = c.array::<32>()?;
    let claimed_steps = c.u64_le()?;

    let n_segments = c.u32_le()?;
    // Validate the claimed vector size against the bytes actually present
    // before allocating anything. u64 math so the multiply cannot wrap.
    let needed = u64::from(n_segments) * 32;
    if (c.remaining() as u64) < needed {
        return Err(DecodeError::TooShort {
            need: usize::try_from(needed).unwrap_or(usize::MAX),
            have: c.remaining(),
        });
    }
    let mut segments = Vec::with_capacity(n_segments as usize);
    for _ in 0..n_segments {
        segments.push(c.array::<32>()?);
    }

    let tag_len = c.u32_le()? as usize;
    if tag_len != TAG_LEN {
        return Err(DecodeError::LengthMismatch {
            claimed: tag_len,
            actual: TAG_LEN,
        });
    }
    let tag = c.array::<TAG_LEN>()?;

    c.finish()?;
    Ok(Proof {
        image_digest,
        claimed_steps,
        segments,
        tag,
    })
}

/// Decode a public-inputs envelope.
pub fn decode_public_inputs(bytes: &[u8]) -> Result<PublicInputs, DecodeError> {
    let payload = read_envelope(bytes, INPUTS_MAGIC)?;
    let mut c = Cursor::new(payload);

    let raw_width = c.u8()?;
    let width = FieldWidth::from_u8(raw_width)
        .ok_or(DecodeError::UnsupportedFieldWidth { width: raw_width })?;

    let count = c.u32_le()?;
    if count > MAX_WIRE_FIELD_COUNT {
        return Err(DecodeError::UnsupportedFieldCount {
            count,
            max: MAX_WIRE_FIELD_COUNT,
        });
    }

    let needed = count as usize * width.bytes();
    let data = c.take(needed)?.to_vec();

    c.finish()?;
    Ok(PublicInputs { width, data })
}

/// Decode a program-image envelope.
pub fn decode_program_image(bytes: &[u8]) -> Result<ProgramImage, DecodeError> {
    let payload = read_envelope(bytes, IMAGE_MAGIC)?;
    let mut c = Cursor::new(payload);

    let circuit_commitment = c.array::<32>()?;
    let input_count = c.u32_le()?;
    let input_width = c.u8()?;

    let label_len = c.u16_le()? as usize;
    if label_len > MAX_LABEL_LEN {
        return Err(DecodeError::BadLabel);
    }
    let label_bytes = c.take(label_len)?;
    let label = std::str::from_utf8(label_bytes)
        .map_err(|_| DecodeError::BadLabel)?
        .to_owned();

    c.finish()?;
    Ok(ProgramImage {
        circuit_commitment,
        input_count,
        input_width,
        label,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode_program_image, encode_proof, encode_public_inputs};
    use spv_core::types::TAG_LEN;

    fn sample_proof() -> Proof {
        Proof {
            image_digest: [0xaa; 32],
            claimed_steps: 1024,
            segments: vec![[1u8; 32], [2u8; 32]],
            tag: [7u8; TAG_LEN],
        }
    }

    #[test]
    fn proof_roundtrip() {
        let p = sample_proof();
        let bytes = encode_proof(&p).unwrap();
        assert_eq!(decode_proof(&bytes).unwrap(), p);
    }

    #[test]
    fn proof_truncation_is_too_short() {
        let bytes = encode_proof(&sample_proof()).unwrap();
        for cut in [0, 1, 9, 10, 11, bytes.len() - 1] {
            let err = decode_proof(&bytes[..cut]).unwrap_err();
            assert!(
                matches!(err, DecodeError::TooShort { .. }),
                "cut at {cut}: {err}"
            );
        }
    }

    #[test]
    fn proof_oversized_segment_count_fails_before_allocating() {
        // Claim u32::MAX segments with only a handful of payload bytes.
        let mut payload = Vec::new();
        payload.extend_from_slice(&[0u8; 32]);
        payload.extend_from_slice(&0u64.to_le_bytes());
        payload.extend_from_slice(&u32::MAX.to_le_bytes());
        let bytes = crate::write_envelope(crate::PROOF_MAGIC, &payload).unwrap();
        let err = decode_proof(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::TooShort { .. }));
    }

    #[test]
    fn proof_wrong_tag_len_is_length_mismatch() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&[0u8; 32]);
        payload.extend_from_slice(&0u64.to_le_bytes());
        payload.extend_from_slice(&0u32.to_le_bytes());
        payload.extend_from_slice(&32u32.to_le_bytes());
        payload.extend_from_slice(&[0u8; 32]);
        let bytes = crate::write_envelope(crate::PROOF_MAGIC, &payload).unwrap();
        let err = decode_proof(&bytes).unwrap_err();
        assert_eq!(
            err,
            DecodeError::LengthMismatch {
                claimed: 32,
                actual: TAG_LEN,
            }
        );
    }

    #[test]
    fn inputs_roundtrip_and_width_check() {
        let pi = PublicInputs {
            width: FieldWidth::W8,
            data: vec![9u8; 16],
        };
        let bytes = encode_public_inputs(&pi).unwrap();
        assert_eq!(decode_public_inputs(&bytes).unwrap(), pi);

        // Corrupt the width byte (first payload byte).
        let mut bad = bytes;
        bad[crate::HEADER_LEN] = 5;
        let err = decode_public_inputs(&bad).unwrap_err();
        assert_eq!(err, DecodeError::UnsupportedFieldWidth { width: 5 });
    }

    #[test]
    fn inputs_count_ceiling_is_enforced() {
        let mut payload = Vec::new();
        payload.push(4u8);
        payload.extend_from_slice(&(MAX_WIRE_FIELD_COUNT + 1).to_le_bytes());
        let bytes = crate::write_envelope(crate::INPUTS_MAGIC, &payload).unwrap();
        let err = decode_public_inputs(&bytes).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnsupportedFieldCount {
                count: MAX_WIRE_FIELD_COUNT + 1,
                max: MAX_WIRE_FIELD_COUNT,
            }
        );
    }

    #[test]
    fn image_roundtrip_and_label_checks() {
        let img = ProgramImage {
            circuit_commitment: [0x42; 32],
            input_count: 3,
            input_width: 32,
            label: "fibonacci".to_owned(),
        };
        let bytes = encode_program_image(&img).unwrap();
        assert_eq!(decode_program_image(&bytes).unwrap(), img);
    }

    #[test]
    fn image_non_utf8_label_is_rejected() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&[0u8; 32]);
        payload.extend_from_slice(&1u32.to_le_bytes());
        payload.push(32);
        payload.extend_from_slice(&2u16.to_le_bytes());
        payload.extend_from_slice(&[0xff, 0xfe]);
        let bytes = crate::write_envelope(crate::IMAGE_MAGIC, &payload).unwrap();
        assert_eq!(decode_program_image(&bytes).unwrap_err(), DecodeError::BadLabel);
    }

    #[test]
    fn empty_input_is_too_short_for_all_decoders() {
        assert!(matches!(
            decode_proof(&[]).unwrap_err(),
            DecodeError::TooShort { .. }
        ));
        assert!(matches!(
            decode_public_inputs(&[]).unwrap_err(),
            DecodeError::TooShort { .. }
        ));
        assert!(matches!(
            decode_program_image(&[]).unwrap_err(),
            DecodeError::TooShort { .. }
        ));
    }
}
