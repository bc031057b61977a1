//! Canonical decoded input types used across the SPV workspace.
//!
//! These are the in-memory forms the wire decoder produces and the engine
//! consumes. All of them are immutable once constructed and scoped to a
//! single verification call; nothing here retains caller memory.

use std::fmt;

/// Transcript tag length in bytes (two 32-byte squeezes).
pub const TAG_LEN: usize = 64;

/// Width in bytes of one public-input field element.
///
/// The wire format only admits these four widths; anything else fails the
/// decoder with `UnsupportedFieldWidth`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FieldWidth {
    /// 4-byte elements.
    W4 = 4,
    /// 8-byte elements.
    W8 = 8,
    /// 16-byte elements.
    W16 = 16,
    /// 32-byte elements (full field elements of common SNARK curves).
    W32 = 32,
}

impl FieldWidth {
    /// Parse a raw width byte. Returns `None` for unsupported widths.
    #[inline]
    #[must_use]
    pub const fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            4 => Some(Self::W4),
            8 => Some(Self::W8),
            16 => Some(Self::W16),
            32 => Some(Self::W32),
            _ => None,
        }
    }

    /// Width in bytes.
    #[inline]
    #[must_use]
    pub const fn bytes(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FieldWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}B", *self as u8)
    }
}

/// Shape of a public-input sequence: element count and element width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputShape {
    /// Number of field elements.
    pub count: u32,
    /// Width of each element.
    pub width: FieldWidth,
}

impl InputShape {
    /// Construct a shape.
    #[inline]
    #[must_use]
    pub const fn new(count: u32, width: FieldWidth) -> Self {
        Self { count, width }
    }

    /// Total byte length of a flat encoding of this shape.
    #[inline]
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        self.count as usize * self.width.bytes()
    }
}

impl fmt::Display for InputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.count, self.width)
    }
}

/// Decoded succinct proof.
///
/// **Invariants** (enforced by the wire decoder, never re-checked here):
/// - `segments` length matched the byte count consumed on the wire.
/// - `tag` is exactly [`TAG_LEN`] bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proof {
    /// Content digest of the program image this proof attests to.
    pub image_digest: [u8; 32],
    /// Claimed execution length; budget-checked before any transcript work.
    pub claimed_steps: u64,
    /// Segment commitments over the execution witness, in order.
    pub segments: Vec<[u8; 32]>,
    /// Transcript tag the verifier recomputes and compares.
    pub tag: [u8; TAG_LEN],
}

/// Decoded ordered public-input sequence.
///
/// `data` is the flat little-endian concatenation of `count()` elements of
/// `width` bytes each; the decoder guarantees the length divides evenly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicInputs {
    /// Element width.
    pub width: FieldWidth,
    /// Flat element bytes, `count() * width.bytes()` long.
    pub data: Vec<u8>,
}

impl PublicInputs {
    /// Number of elements.
    #[inline]
    #[must_use]
    pub fn count(&self) -> u32 {
        (self.data.len() / self.width.bytes()) as u32
    }

    /// Shape of this sequence.
    #[inline]
    #[must_use]
    pub fn shape(&self) -> InputShape {
        InputShape::new(self.count(), self.width)
    }

    /// Iterate over the elements as byte slices.
    pub fn elements(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.width.bytes())
    }
}

/// Decoded program image (circuit descriptor).
///
/// The raw width byte is kept as-is; the loader is the authority on whether
/// the declared shape is recognizable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramImage {
    /// Commitment to the circuit/program the proof must attest to.
    pub circuit_commitment: [u8; 32],
    /// Declared public-input element count.
    pub input_count: u32,
    /// Declared public-input element width (raw; validated by the loader).
    pub input_width: u8,
    /// Short human-readable label (UTF-8, bounded on the wire).
    pub label: String,
}

/// Parameters the engine needs to check a proof against a program image.
///
/// Built by the image loader; cache entries hand these out behind `Arc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationKey {
    /// Blake3 digest of the raw image bytes (content address).
    pub image_digest: [u8; 32],
    /// Circuit commitment carried by the image.
    pub circuit_commitment: [u8; 32],
    /// Public-input shape the image declares.
    pub shape: InputShape,
    /// Image label, echoed for diagnostics.
    pub label: String,
}
