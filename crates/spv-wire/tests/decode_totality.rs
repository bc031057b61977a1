//! Totality of the wire decoders.
//!
//! For *any* byte string — empty, truncated, or random — every decoder must
//! return a structured error or a valid value, never panic, and mutations of
//! well-formed envelopes must stay in that contract too.

use proptest::prelude::*;
use spv_core::types::TAG_LEN;
use spv_core::{FieldWidth, ProgramImage, Proof, PublicInputs};
use spv_wire::{
    decode_program_image, decode_proof, decode_public_inputs, encode_program_image, encode_proof,
    encode_public_inputs,
};

proptest! {
    #[test]
    fn random_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let _ = decode_proof(&bytes);
        let _ = decode_public_inputs(&bytes);
        let _ = decode_program_image(&bytes);
    }

    #[test]
    fn truncations_of_a_valid_proof_never_panic(
        n_segments in 0usize..8,
        cut_frac in 0.0f64..1.0,
    ) {
        let proof = Proof {
            image_digest: [5u8; 32],
            claimed_steps: 99,
            segments: vec![[3u8; 32]; n_segments],
            tag: [1u8; TAG_LEN],
        };
        let bytes = encode_proof(&proof).unwrap();
        let cut = (bytes.len() as f64 * cut_frac) as usize;
        if cut < bytes.len() {
            prop_assert!(decode_proof(&bytes[..cut]).is_err());
        }
    }

    #[test]
    fn single_byte_corruptions_never_panic(
        pos in 0usize..200,
        delta in 1u8..=255,
    ) {
        let proof = Proof {
            image_digest: [5u8; 32],
            claimed_steps: 7,
            segments: vec![[9u8; 32]; 2],
            tag: [2u8; TAG_LEN],
        };
        let mut bytes = encode_proof(&proof).unwrap();
        let idx = pos % bytes.len();
        bytes[idx] = bytes[idx].wrapping_add(delta);
        // Either it still decodes (corruption hit a commitment byte) or it
        // fails with a structured error; both are fine, panics are not.
        let _ = decode_proof(&bytes);
    }

    #[test]
    fn inputs_roundtrip_for_all_widths(
        raw_width in prop::sample::select(vec![4u8, 8, 16, 32]),
        count in 0usize..32,
        fill in any::<u8>(),
    ) {
        let width = FieldWidth::from_u8(raw_width).unwrap();
        let pi = PublicInputs {
            width,
            data: vec![fill; count * width.bytes()],
        };
        let bytes = encode_public_inputs(&pi).unwrap();
        prop_assert_eq!(decode_public_inputs(&bytes).unwrap(), pi);
    }

    #[test]
    fn image_roundtrip_with_arbitrary_labels(
        label in "[a-z0-9 _-]{0,64}",
        input_count in any::<u32>(),
        input_width in any::<u8>(),
    ) {
        let img = ProgramImage {
            circuit_commitment: [0x11; 32],
            input_count,
            input_width,
            label,
        };
        let bytes = encode_program_image(&img).unwrap();
        prop_assert_eq!(decode_program_image(&bytes).unwrap(), img);
    }
}
