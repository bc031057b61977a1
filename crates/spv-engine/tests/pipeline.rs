//! End-to-end pipeline behavior: acceptance, rejection classes, budget
//! ordering, caching, and determinism.

use std::sync::atomic::{AtomicUsize, Ordering};

use spv_core::{
    status_code, status_of_error, CryptoVerifier, FieldWidth, Limits, ProgramImage, Proof,
    PublicInputs, VerificationKey, VerifyError,
};
use spv_core::status::{
    STATUS_BUDGET_EXCEEDED, STATUS_MALFORMED_PROGRAM_IMAGE, STATUS_OK, STATUS_PROOF_INVALID,
    STATUS_SHAPE_MISMATCH,
};
use spv_engine::{seal, Pipeline, TranscriptVerifier};
use spv_image::{image_digest, load_image, ImageCache};
use spv_wire::{encode_program_image, encode_proof, encode_public_inputs};

/// A fixed (image, inputs, proof) triple the transcript backend accepts.
struct Fixture {
    proof_bytes: Vec<u8>,
    input_bytes: Vec<u8>,
    image_bytes: Vec<u8>,
}

fn fixture() -> Fixture {
    let image = ProgramImage {
        circuit_commitment: [0x5a; 32],
        input_count: 2,
        input_width: 8,
        label: "fibonacci".to_owned(),
    };
    let image_bytes = encode_program_image(&image).unwrap();

    let inputs = PublicInputs {
        width: FieldWidth::W8,
        data: [13u64.to_le_bytes(), 21u64.to_le_bytes()].concat(),
    };
    let input_bytes = encode_public_inputs(&inputs).unwrap();

    let vk = load_image(&image, &image_bytes).unwrap();
    let proof = seal(&vk, &inputs, b"execution trace of the fibonacci guest");
    let proof_bytes = encode_proof(&proof).unwrap();

    Fixture {
        proof_bytes,
        input_bytes,
        image_bytes,
    }
}

#[test]
fn known_valid_triple_is_accepted() {
    let f = fixture();
    let pipeline = Pipeline::new(TranscriptVerifier);
    let out = pipeline.verify_bytes(&f.proof_bytes, &f.input_bytes, &f.image_bytes, None);
    assert_eq!(status_code(&out), STATUS_OK);
}

#[test]
fn repeated_calls_are_deterministic() {
    let f = fixture();
    let pipeline = Pipeline::new(TranscriptVerifier);
    let first = status_code(&pipeline.verify_bytes(
        &f.proof_bytes,
        &f.input_bytes,
        &f.image_bytes,
        None,
    ));
    for _ in 0..5 {
        let again = status_code(&pipeline.verify_bytes(
            &f.proof_bytes,
            &f.input_bytes,
            &f.image_bytes,
            None,
        ));
        assert_eq!(again, first);
    }
}

#[test]
fn every_payload_bit_flip_is_rejected() {
    let f = fixture();
    let pipeline = Pipeline::new(TranscriptVerifier);
    // Flip one bit at a spread of positions past the header; every flip must
    // flip the verdict, whatever error class it lands in.
    let len = f.proof_bytes.len();
    for pos in (10..len).step_by(7) {
        let mut tampered = f.proof_bytes.clone();
        tampered[pos] ^= 1 << (pos % 8);
        let out = pipeline.verify_bytes(&tampered, &f.input_bytes, &f.image_bytes, None);
        assert_ne!(
            status_code(&out),
            STATUS_OK,
            "bit flip at byte {pos} went unnoticed"
        );
    }
}

#[test]
fn tag_tampering_is_a_clean_crypto_failure() {
    let f = fixture();
    let pipeline = Pipeline::new(TranscriptVerifier);
    // The tag is the last TAG_LEN bytes of the envelope; flipping there keeps
    // the encoding valid and fails only the cryptographic comparison.
    let mut tampered = f.proof_bytes.clone();
    let last = tampered.len() - 1;
    tampered[last] ^= 0x80;
    let out = pipeline.verify_bytes(&tampered, &f.input_bytes, &f.image_bytes, None);
    assert_eq!(status_code(&out), STATUS_PROOF_INVALID);
}

#[test]
fn shape_mismatch_is_not_a_crypto_failure() {
    let f = fixture();
    let pipeline = Pipeline::new(TranscriptVerifier);

    // One element instead of the declared two.
    let short = PublicInputs {
        width: FieldWidth::W8,
        data: 13u64.to_le_bytes().to_vec(),
    };
    let short_bytes = encode_public_inputs(&short).unwrap();

    let out = pipeline.verify_bytes(&f.proof_bytes, &short_bytes, &f.image_bytes, None);
    let err = out.unwrap_err();
    assert_eq!(status_of_error(&err), STATUS_SHAPE_MISMATCH);
}

#[test]
fn unrecognized_image_is_a_malformed_image() {
    let f = fixture();
    let pipeline = Pipeline::new(TranscriptVerifier);

    let bad_image = ProgramImage {
        circuit_commitment: [0u8; 32], // null commitment
        input_count: 2,
        input_width: 8,
        label: String::new(),
    };
    let bad_bytes = encode_program_image(&bad_image).unwrap();

    let out = pipeline.verify_bytes(&f.proof_bytes, &f.input_bytes, &bad_bytes, None);
    assert_eq!(status_code(&out), STATUS_MALFORMED_PROGRAM_IMAGE);
}

/// Backend wrapper that counts invocations of the cryptographic stage.
#[derive(Default)]
struct CountingVerifier {
    calls: AtomicUsize,
}

impl CryptoVerifier for CountingVerifier {
    fn verify(
        &self,
        _proof: &Proof,
        _inputs: &PublicInputs,
        _vk: &VerificationKey,
    ) -> Result<(), VerifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn budget_rejection_happens_before_the_crypto_stage() {
    let f = fixture();
    let counting = CountingVerifier::default();
    let limits = Limits {
        max_claimed_steps: 1, // fixture trace is far longer
        ..Limits::default()
    };

    let strict = Pipeline::with_limits(&counting, limits);
    let out = strict.verify_bytes(&f.proof_bytes, &f.input_bytes, &f.image_bytes, None);
    assert_eq!(status_code(&out), STATUS_BUDGET_EXCEEDED);
    assert!(matches!(
        out.unwrap_err(),
        VerifyError::BudgetExceeded {
            what: "claimed_steps",
            ..
        }
    ));
    // The expensive stage never ran.
    assert_eq!(counting.calls.load(Ordering::SeqCst), 0);

    // Same inputs under generous limits do reach the backend.
    let generous = Pipeline::new(&counting);
    let out = generous.verify_bytes(&f.proof_bytes, &f.input_bytes, &f.image_bytes, None);
    assert!(out.is_ok());
    assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn oversized_raw_proof_is_rejected_before_decode_and_crypto() {
    let f = fixture();
    let counting = CountingVerifier::default();
    let limits = Limits {
        max_proof_bytes: 8,
        ..Limits::default()
    };
    let pipeline = Pipeline::with_limits(&counting, limits);
    let out = pipeline.verify_bytes(&f.proof_bytes, &f.input_bytes, &f.image_bytes, None);
    assert_eq!(status_code(&out), STATUS_BUDGET_EXCEEDED);
    assert_eq!(counting.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn cache_is_populated_and_hit() {
    let f = fixture();
    let cache = ImageCache::with_capacity(8);
    let pipeline = Pipeline::new(TranscriptVerifier);

    assert!(cache.is_empty());
    let first = pipeline.verify_bytes(&f.proof_bytes, &f.input_bytes, &f.image_bytes, Some(&cache));
    assert!(first.is_ok());
    assert_eq!(cache.len(), 1);
    assert!(cache.get(&image_digest(&f.image_bytes)).is_some());

    // Second call hits the cache and still accepts.
    let second =
        pipeline.verify_bytes(&f.proof_bytes, &f.input_bytes, &f.image_bytes, Some(&cache));
    assert!(second.is_ok());
    assert_eq!(cache.len(), 1);
}
