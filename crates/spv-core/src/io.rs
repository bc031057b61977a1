//! Serialization helpers for [`ProofBundle`] files.
//!
//! JSON and CBOR read/write utilities with extension-based auto-detection.
//! Unknown/missing extensions are rejected for reads and default to JSON
//! for writes.
//!
//! Extras:
//! - In-memory CBOR helpers: [`to_cbor`] / [`from_cbor`]

use crate::bundle::ProofBundle;
use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Cursor};
use std::path::Path;

/// Ensure the parent directory for a file exists (no-op if none).
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating parent directory {}", dir.display()))?;
        }
    }
    Ok(())
}

/// Lower-cased file extension, if any.
fn ext_lower(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Read a [`ProofBundle`] from **JSON**.
pub fn read_bundle_json<P: AsRef<Path>>(path: P) -> Result<ProofBundle> {
    let path_ref = path.as_ref();
    let f = File::open(path_ref).with_context(|| format!("open {}", path_ref.display()))?;
    let rdr = BufReader::new(f);
    let v: ProofBundle =
        serde_json::from_reader(rdr).with_context(|| "deserialize JSON proof bundle")?;
    Ok(v)
}

/// Write a [`ProofBundle`] to **JSON** (pretty).
pub fn write_bundle_json<P: AsRef<Path>>(path: P, v: &ProofBundle) -> Result<()> {
    let path_ref = path.as_ref();
    ensure_parent_dir(path_ref)?;
    let f = File::create(path_ref).with_context(|| format!("create {}", path_ref.display()))?;
    let w = BufWriter::new(f);
    serde_json::to_writer_pretty(w, v).with_context(|| "serialize JSON proof bundle")?;
    Ok(())
}

/// Read a [`ProofBundle`] from **CBOR**.
pub fn read_bundle_cbor<P: AsRef<Path>>(path: P) -> Result<ProofBundle> {
    let path_ref = path.as_ref();
    let f = File::open(path_ref).with_context(|| format!("open {}", path_ref.display()))?;
    let mut rdr = BufReader::new(f);
    let v: ProofBundle =
        ciborium::de::from_reader(&mut rdr).with_context(|| "deserialize CBOR proof bundle")?;
    Ok(v)
}

/// Write a [`ProofBundle`] to **CBOR**.
pub fn write_bundle_cbor<P: AsRef<Path>>(path: P, v: &ProofBundle) -> Result<()> {
    let path_ref = path.as_ref();
    ensure_parent_dir(path_ref)?;
    let f = File::create(path_ref).with_context(|| format!("create {}", path_ref.display()))?;
    let mut w = BufWriter::new(f);
    ciborium::ser::into_writer(v, &mut w).with_context(|| "serialize CBOR proof bundle")?;
    Ok(())
}

/// Auto-detect read by extension `.json` / `.cbor` (case-insensitive).
pub fn read_bundle_auto<P: AsRef<Path>>(path: P) -> Result<ProofBundle> {
    match ext_lower(path.as_ref()).as_deref() {
        Some("json") => read_bundle_json(path),
        Some("cbor") => read_bundle_cbor(path),
        Some(other) => Err(anyhow!(
            "unsupported bundle extension: {} (supported: .json, .cbor)",
            other
        )),
        None => Err(anyhow!("path has no extension (expected .json or .cbor)")),
    }
}

/// Auto-detect write (defaults to **JSON** if unknown or missing).
pub fn write_bundle_auto<P: AsRef<Path>>(path: P, v: &ProofBundle) -> Result<()> {
    match ext_lower(path.as_ref()).as_deref() {
        Some("cbor") => write_bundle_cbor(path, v),
        _ => write_bundle_json(path, v),
    }
}

/// Serialize any `T: Serialize` to **CBOR bytes** using `ciborium`.
pub fn to_cbor<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    ciborium::ser::into_writer(value, &mut buf).with_context(|| "serialize CBOR (to_cbor)")?;
    Ok(buf)
}

/// Deserialize any `T: DeserializeOwned` from **CBOR bytes** using `ciborium`.
pub fn from_cbor<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut cur = Cursor::new(bytes);
    let v = ciborium::de::from_reader(&mut cur).with_context(|| "deserialize CBOR (from_cbor)")?;
    Ok(v)
}
