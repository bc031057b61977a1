//! spv-ffi: the exported C ABI for the SPV verifier.
//!
//! A single entry point, [`verify_proof_ffi`], takes three caller-owned
//! `(pointer, u32 length)` buffers — proof, public inputs, program image —
//! and returns a stable `i32` status code. The safety contract of this layer:
//!
//! - **No unwinding or undefined behavior crosses the boundary.** The whole
//!   call runs under `catch_unwind`; a panic anywhere below maps to
//!   [`STATUS_INTERNAL_ERROR`].
//! - A null pointer with a nonzero length is a boundary-contract violation
//!   and yields [`STATUS_INTERNAL_ERROR`] without dereferencing anything.
//! - A null pointer with length zero is an empty input; empty inputs are
//!   shorter than the envelope header and deterministically yield that
//!   input's malformed status.
//! - Buffers are read-only for the duration of the call and never retained.
//!
//! Callers must treat **any** non-zero status as "proof not accepted"; the
//! distinct negative codes are diagnostics only. The matching C declarations
//! ship in `include/spv.h`.

#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::missing_errors_doc)]

use std::panic::{catch_unwind, AssertUnwindSafe};

use once_cell::sync::Lazy;
use spv_core::status::{
    STATUS_INTERNAL_ERROR, STATUS_MALFORMED_PROGRAM_IMAGE, STATUS_MALFORMED_PROOF,
    STATUS_MALFORMED_PUBLIC_INPUTS,
};
use spv_core::status_code;
use spv_engine::{Pipeline, TranscriptVerifier};
use spv_image::ImageCache;

pub use spv_core::status::{
    status_name, STATUS_BUDGET_EXCEEDED, STATUS_OK, STATUS_PROOF_INVALID, STATUS_SHAPE_MISMATCH,
};

/// Stable ABI contract version (bump on breaking C ABI changes).
///
/// This is **not** the crate semver; it only changes when the C ABI changes
/// in a backward-incompatible way.
pub const SPV_FFI_ABI_VERSION: u32 = 1;

/// Fixed envelope header size; anything shorter cannot be a valid input.
const MIN_ENVELOPE_LEN: usize = spv_wire::HEADER_LEN;

/// Process-wide cache of loaded program images.
///
/// Lifecycle: initialized lazily on the first verification, bounded at
/// [`IMAGE_CACHE_CAPACITY`] entries with LRU eviction, lives until process
/// exit. Shared by all concurrent calls; see `spv_image::cache` for the
/// locking discipline.
static IMAGE_CACHE: Lazy<ImageCache> = Lazy::new(|| ImageCache::with_capacity(IMAGE_CACHE_CAPACITY));

/// Capacity of the process-wide image cache.
pub const IMAGE_CACHE_CAPACITY: usize = 32;

/// Reconstruct a caller buffer, or `None` on a boundary-contract violation.
fn caller_slice<'a>(ptr: *const u8, len: u32) -> Option<&'a [u8]> {
    if len == 0 {
        // `from_raw_parts` is UB for null even at length zero; an empty
        // input never touches the pointer.
        return Some(&[]);
    }
    if ptr.is_null() {
        return None;
    }
    // Safety: the caller guarantees `ptr` is valid for `len` read-only bytes
    // for the duration of this call (the documented FFI contract); len > 0
    // and ptr is non-null here.
    Some(unsafe { std::slice::from_raw_parts(ptr, len as usize) })
}

fn inner_verify(
    proof_bytes: *const u8,
    proof_len: u32,
    public_inputs_bytes: *const u8,
    public_inputs_len: u32,
    elf_bytes: *const u8,
    elf_len: u32,
) -> i32 {
    let Some(proof) = caller_slice(proof_bytes, proof_len) else {
        return STATUS_INTERNAL_ERROR;
    };
    let Some(inputs) = caller_slice(public_inputs_bytes, public_inputs_len) else {
        return STATUS_INTERNAL_ERROR;
    };
    let Some(image) = caller_slice(elf_bytes, elf_len) else {
        return STATUS_INTERNAL_ERROR;
    };

    // Reject structurally impossible inputs before the decoder runs. The
    // decoder would agree (TooShort), so the statuses stay identical.
    if proof.len() < MIN_ENVELOPE_LEN {
        return STATUS_MALFORMED_PROOF;
    }
    if inputs.len() < MIN_ENVELOPE_LEN {
        return STATUS_MALFORMED_PUBLIC_INPUTS;
    }
    if image.len() < MIN_ENVELOPE_LEN {
        return STATUS_MALFORMED_PROGRAM_IMAGE;
    }

    let pipeline = Pipeline::new(TranscriptVerifier);
    status_code(&pipeline.verify_bytes(proof, inputs, image, Some(&IMAGE_CACHE)))
}

/// Verify a proof against public inputs and a program image.
///
/// See the crate docs for the full boundary contract. Returns `0` if and
/// only if the proof is valid; negative codes partition the failure classes
/// (`include/spv.h` lists them).
#[no_mangle]
pub extern "C" fn verify_proof_ffi(
    proof_bytes: *const u8,
    proof_len: u32,
    public_inputs_bytes: *const u8,
    public_inputs_len: u32,
    elf_bytes: *const u8,
    elf_len: u32,
) -> i32 {
    let result = catch_unwind(AssertUnwindSafe(|| {
        inner_verify(
            proof_bytes,
            proof_len,
            public_inputs_bytes,
            public_inputs_len,
            elf_bytes,
            elf_len,
        )
    }));
    result.unwrap_or(STATUS_INTERNAL_ERROR)
}

/// Return the stable ABI contract version.
#[no_mangle]
pub extern "C" fn spv_abi_version() -> u32 {
    SPV_FFI_ABI_VERSION
}
