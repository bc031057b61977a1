//! spv-wire — total decoder/encoder for the three SPV wire envelopes.
//!
//! Every input crossing the FFI boundary is an *envelope*: a fixed 10-byte
//! header followed by a fixed-layout little-endian payload.
//!
//! ```text
//! magic   : 4 bytes   "SPRF" (proof) | "SPIN" (public inputs) | "SPIM" (image)
//! version : u16 LE    currently 1
//! len     : u32 LE    payload byte count; must equal the remaining bytes
//! payload : len bytes
//! ```
//!
//! Payload layouts:
//!
//! ```text
//! proof   : image_digest[32] ‖ claimed_steps u64 ‖ n_segments u32
//!           ‖ n_segments × 32 ‖ tag_len u32 (= 64) ‖ tag[64]
//! inputs  : width u8 ‖ count u32 ‖ count × width bytes
//! image   : circuit_commitment[32] ‖ input_count u32 ‖ input_width u8
//!           ‖ label_len u16 ‖ label (UTF-8, ≤ 64 bytes)
//! ```
//!
//! The decoders are **total**: every byte string either decodes to a valid
//! structure or fails with a specific [`DecodeError`], never reads out of
//! bounds, and never returns a partial structure. Every internal length
//! field is validated against the remaining bytes *before* any allocation,
//! and the payload must be consumed exactly (trailing bytes are an error).

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

mod cursor;
/// Envelope and payload decoders.
pub mod decode;
/// Envelope and payload encoders (tests, attestor, CLI).
pub mod encode;

pub use decode::{decode_program_image, decode_proof, decode_public_inputs};
pub use encode::{encode_program_image, encode_proof, encode_public_inputs};

use spv_core::DecodeError;

/// Current wire version for all three envelopes.
pub const WIRE_VERSION: u16 = 1;

/// Envelope header size: magic + version + payload length.
pub const HEADER_LEN: usize = 10;

/// Proof envelope magic.
pub const PROOF_MAGIC: [u8; 4] = *b"SPRF";
/// Public-inputs envelope magic.
pub const INPUTS_MAGIC: [u8; 4] = *b"SPIN";
/// Program-image envelope magic.
pub const IMAGE_MAGIC: [u8; 4] = *b"SPIM";

/// Hard wire-format ceiling on public-input element count.
///
/// This is a *format* bound, not the verification budget; [`spv_core::Limits`]
/// may be (and usually is) tighter.
pub const MAX_WIRE_FIELD_COUNT: u32 = 65_536;

/// Maximum image label length in bytes.
pub const MAX_LABEL_LEN: usize = 64;

/// Split an envelope into its exactly-sized payload after header checks.
fn read_envelope(bytes: &[u8], expected_magic: [u8; 4]) -> Result<&[u8], DecodeError> {
    let mut c = cursor::Cursor::new(bytes);
    let magic: [u8; 4] = c.array::<4>()?;
    if magic != expected_magic {
        return Err(DecodeError::BadMagic {
            expected: expected_magic,
            found: magic,
        });
    }
    let version = c.u16_le()?;
    if version != WIRE_VERSION {
        return Err(DecodeError::BadVersion {
            found: version,
            supported: WIRE_VERSION,
        });
    }
    let len = c.u32_le()? as usize;
    let rest = c.rest();
    if rest.len() < len {
        return Err(DecodeError::TooShort {
            need: len,
            have: rest.len(),
        });
    }
    if rest.len() > len {
        return Err(DecodeError::LengthMismatch {
            claimed: len,
            actual: rest.len(),
        });
    }
    Ok(rest)
}

/// Frame a payload into an envelope with the given magic.
fn write_envelope(magic: [u8; 4], payload: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let len = u32::try_from(payload.len()).map_err(|_| DecodeError::LengthMismatch {
        claimed: payload.len(),
        actual: u32::MAX as usize,
    })?;
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(&magic);
    out.extend_from_slice(&WIRE_VERSION.to_le_bytes());
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}
