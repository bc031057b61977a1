// crates/spv-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use spv_core::io::write_bundle_auto;
use spv_core::{status_code, status_name, ProofBundle, ProtocolKind, PublicInputs};
use spv_crypto::{Blake3Transcript, Transcript};
use spv_engine::{seal, Pipeline, TranscriptVerifier};
use spv_image::load_image;
use spv_wire::{
    decode_program_image, decode_proof, decode_public_inputs, encode_program_image, encode_proof,
    encode_public_inputs, IMAGE_MAGIC, INPUTS_MAGIC, PROOF_MAGIC,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "spv-cli",
    about = "SPV verifier host CLI",
    long_about = "SPV verifier host CLI.\n\nPack program images, produce reference attestations, and verify proof/input/image triples with the same pipeline the C ABI exposes.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Build a program-image envelope from a circuit seed and declared shape
    PackImage {
        /// Seed string the circuit commitment is derived from
        #[arg(long, default_value = "spv-demo")]
        seed: String,

        /// Declared public-input element count
        #[arg(long, default_value_t = 1)]
        input_count: u32,

        /// Declared public-input element width in bytes (4, 8, 16, or 32)
        #[arg(long, default_value_t = 32)]
        input_width: u8,

        /// Short human-readable label (≤ 64 bytes)
        #[arg(long, default_value = "demo")]
        label: String,

        /// Output path for the image envelope
        #[arg(long, default_value = "image.bin")]
        out: PathBuf,
    },

    /// Produce a reference attestation for an image over a witness trace
    Attest {
        /// Path to the program-image envelope
        #[arg(long)]
        image: PathBuf,

        /// Path to flat public-input bytes (element width from the image)
        #[arg(long)]
        inputs: Option<PathBuf>,

        /// Path to the witness trace bytes (defaults to empty)
        #[arg(long)]
        trace: Option<PathBuf>,

        /// Output path for the proof envelope
        #[arg(long, default_value = "proof.bin")]
        out: PathBuf,

        /// Output path for the public-inputs envelope
        #[arg(long, default_value = "inputs.bin")]
        inputs_out: PathBuf,

        /// Optional bundle output (CBOR/JSON by extension)
        #[arg(long)]
        bundle: Option<PathBuf>,
    },

    /// Verify a proof/inputs/image triple; exit code 0 only on acceptance
    Verify {
        /// Path to the proof envelope
        #[arg(long)]
        proof: PathBuf,

        /// Path to the public-inputs envelope
        #[arg(long)]
        inputs: PathBuf,

        /// Path to the program-image envelope
        #[arg(long)]
        image: PathBuf,
    },

    /// Decode any envelope and print a JSON summary
    Inspect {
        /// Path to a proof, public-inputs, or image envelope
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::PackImage {
            seed,
            input_count,
            input_width,
            label,
            out,
        } => pack_image(&seed, input_count, input_width, label, &out),

        Cmd::Attest {
            image,
            inputs,
            trace,
            out,
            inputs_out,
            bundle,
        } => attest(&image, inputs.as_deref(), trace.as_deref(), &out, &inputs_out, bundle.as_deref()),

        Cmd::Verify {
            proof,
            inputs,
            image,
        } => verify(&proof, &inputs, &image),

        Cmd::Inspect { file } => inspect(&file),
    }
}

/// Initialize tracing with an env-driven filter (default INFO).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false).with_level(true).compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Ensure the parent directory for a file exists.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating parent directory {}", dir.display()))?;
        }
    }
    Ok(())
}

fn pack_image(seed: &str, input_count: u32, input_width: u8, label: String, out: &Path) -> Result<()> {
    // Derive the circuit commitment from the seed through the same
    // transcript substrate the protocol uses.
    let mut tr = Blake3Transcript::new("spv-circuit/v1");
    tr.absorb("seed", seed.as_bytes());
    let commitment_bytes = tr.challenge_bytes("commitment", 32);
    let mut circuit_commitment = [0u8; 32];
    circuit_commitment.copy_from_slice(&commitment_bytes);

    let image = spv_core::ProgramImage {
        circuit_commitment,
        input_count,
        input_width,
        label,
    };
    let bytes =
        encode_program_image(&image).with_context(|| "encoding program image envelope")?;

    // Fail now, not at verify time, if the declared shape is unloadable.
    load_image(&image, &bytes).with_context(|| "image does not load as a verification key")?;

    ensure_parent_dir(out)?;
    fs::write(out, &bytes).with_context(|| format!("write {}", out.display()))?;

    info!(count = input_count, width = input_width, "packed image");
    println!(
        "Packed image '{}' ({}x{}B inputs) → {}",
        image.label,
        input_count,
        input_width,
        out.display()
    );
    Ok(())
}

fn attest(
    image_path: &Path,
    inputs_path: Option<&Path>,
    trace_path: Option<&Path>,
    out: &Path,
    inputs_out: &Path,
    bundle: Option<&Path>,
) -> Result<()> {
    let image_bytes =
        fs::read(image_path).with_context(|| format!("read {}", image_path.display()))?;
    let decoded = decode_program_image(&image_bytes)
        .with_context(|| format!("decode image envelope {}", image_path.display()))?;
    let vk = load_image(&decoded, &image_bytes).with_context(|| "load verification key")?;

    let input_data = match inputs_path {
        Some(p) => fs::read(p).with_context(|| format!("read {}", p.display()))?,
        None => Vec::new(),
    };
    let width = vk.shape.width;
    if input_data.len() % width.bytes() != 0 {
        bail!(
            "input bytes ({}) are not a whole number of {width} elements",
            input_data.len()
        );
    }
    let inputs = PublicInputs {
        width,
        data: input_data,
    };
    if inputs.shape() != vk.shape {
        bail!(
            "inputs have shape {}, image declares {}",
            inputs.shape(),
            vk.shape
        );
    }

    let trace = match trace_path {
        Some(p) => fs::read(p).with_context(|| format!("read {}", p.display()))?,
        None => Vec::new(),
    };

    info!(
        trace_len = trace.len(),
        inputs = inputs.count(),
        "sealing attestation"
    );
    let proof = seal(&vk, &inputs, &trace);
    let proof_bytes = encode_proof(&proof).with_context(|| "encoding proof envelope")?;
    let input_bytes = encode_public_inputs(&inputs).with_context(|| "encoding inputs envelope")?;

    ensure_parent_dir(out)?;
    fs::write(out, &proof_bytes).with_context(|| format!("write {}", out.display()))?;
    ensure_parent_dir(inputs_out)?;
    fs::write(inputs_out, &input_bytes)
        .with_context(|| format!("write {}", inputs_out.display()))?;

    if let Some(bundle_path) = bundle {
        let b = ProofBundle::new(
            ProtocolKind::Transcript,
            vk.image_digest,
            proof_bytes.clone(),
            input_bytes,
            serde_json::json!({
                "label": vk.label,
                "trace_len": trace.len(),
            }),
        );
        write_bundle_auto(bundle_path, &b)
            .with_context(|| format!("write bundle {}", bundle_path.display()))?;
    }

    println!(
        "Attested '{}' ({} segments, {} steps) → {}",
        vk.label,
        proof.segments.len(),
        proof.claimed_steps,
        out.display()
    );
    Ok(())
}

fn verify(proof: &Path, inputs: &Path, image: &Path) -> Result<()> {
    let proof_bytes = fs::read(proof).with_context(|| format!("read {}", proof.display()))?;
    let input_bytes = fs::read(inputs).with_context(|| format!("read {}", inputs.display()))?;
    let image_bytes = fs::read(image).with_context(|| format!("read {}", image.display()))?;

    let pipeline = Pipeline::new(TranscriptVerifier);
    let outcome = pipeline.verify_bytes(&proof_bytes, &input_bytes, &image_bytes, None);
    let status = status_code(&outcome);

    if let Err(err) = outcome {
        bail!("proof not accepted: {err} [{} ({status})]", status_name(status));
    }
    println!("OK: proof accepted [{} ({status})]", status_name(status));
    Ok(())
}

fn inspect(file: &Path) -> Result<()> {
    let bytes = fs::read(file).with_context(|| format!("read {}", file.display()))?;
    if bytes.len() < 4 {
        bail!("{} is too short to carry an envelope magic", file.display());
    }

    let magic: [u8; 4] = [bytes[0], bytes[1], bytes[2], bytes[3]];
    let summary = match magic {
        PROOF_MAGIC => {
            let p = decode_proof(&bytes).with_context(|| "decode proof envelope")?;
            serde_json::json!({
                "kind": "proof",
                "image_digest": hex::encode(p.image_digest),
                "claimed_steps": p.claimed_steps,
                "segments": p.segments.len(),
            })
        }
        INPUTS_MAGIC => {
            let pi = decode_public_inputs(&bytes).with_context(|| "decode inputs envelope")?;
            serde_json::json!({
                "kind": "public-inputs",
                "width": pi.width.bytes(),
                "count": pi.count(),
            })
        }
        IMAGE_MAGIC => {
            let img = decode_program_image(&bytes).with_context(|| "decode image envelope")?;
            serde_json::json!({
                "kind": "program-image",
                "label": img.label,
                "circuit_commitment": hex::encode(img.circuit_commitment),
                "input_count": img.input_count,
                "input_width": img.input_width,
            })
        }
        other => bail!("unrecognized envelope magic {other:02x?}"),
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
