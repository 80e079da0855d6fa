//! Site directory assembler.
//!
//! Writes rendered documents, the stylesheet and `manifest.json` into the
//! output directory. Each file is written to a temp name and renamed into
//! place; nothing is rolled back if a later step fails.

use std::path::Path;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

use dexgen_shared::{CURRENT_SCHEMA_VERSION, DexError, PageEntry, Result, SiteManifest};

/// Name of the manifest file at the site root.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Values recorded in the manifest alongside the page list.
#[derive(Debug, Clone)]
pub struct ManifestInfo {
    pub title: String,
    pub tool_version: String,
    /// Number of record pages.
    pub page_count: usize,
}

/// Create the output directory if it does not exist.
pub fn prepare_output_dir(output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir).map_err(|e| DexError::io(output_dir, e))?;
    debug!(path = %output_dir.display(), "output directory ready");
    Ok(())
}

/// Write one document and return its manifest entry.
pub fn write_document(output_dir: &Path, file: &str, content: &str) -> Result<PageEntry> {
    let target = output_dir.join(file);
    let temp = output_dir.join(format!(".{file}.tmp"));

    std::fs::write(&temp, content).map_err(|e| DexError::io(&temp, e))?;
    std::fs::rename(&temp, &target).map_err(|e| DexError::io(&target, e))?;

    debug!(file, size = content.len(), "wrote document");

    Ok(PageEntry {
        file: file.to_string(),
        sha256: sha256_hex(content.as_bytes()),
        size_bytes: content.len(),
    })
}

/// Copy `source` into the site as `file`, or write `fallback` when no
/// source is configured.
pub fn write_stylesheet(
    output_dir: &Path,
    file: &str,
    source: Option<&Path>,
    fallback: &str,
) -> Result<PageEntry> {
    match source {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|e| DexError::io(path, e))?;
            debug!(source = %path.display(), "copying stylesheet");
            write_document(output_dir, file, &content)
        }
        None => write_document(output_dir, file, fallback),
    }
}

/// Write `manifest.json` listing every written document.
#[instrument(skip_all, fields(pages = pages.len()))]
pub fn write_manifest(
    output_dir: &Path,
    info: &ManifestInfo,
    pages: Vec<PageEntry>,
) -> Result<SiteManifest> {
    let manifest = SiteManifest {
        schema_version: CURRENT_SCHEMA_VERSION,
        title: info.title.clone(),
        tool_version: info.tool_version.clone(),
        generated_at: Utc::now(),
        page_count: info.page_count,
        pages,
    };
    write_json(&output_dir.join(MANIFEST_FILE), &manifest)?;

    info!(
        page_count = manifest.page_count,
        files = manifest.pages.len(),
        "manifest written"
    );
    Ok(manifest)
}

/// Read back a previously written manifest.
pub fn read_manifest(output_dir: &Path) -> Result<SiteManifest> {
    let path = output_dir.join(MANIFEST_FILE);
    let content = std::fs::read_to_string(&path).map_err(|e| DexError::io(&path, e))?;
    let manifest: SiteManifest = serde_json::from_str(&content)
        .map_err(|e| DexError::validation(format!("invalid {MANIFEST_FILE}: {e}")))?;

    if manifest.schema_version != CURRENT_SCHEMA_VERSION {
        return Err(DexError::validation(format!(
            "unsupported schema_version: {} (expected {})",
            manifest.schema_version, CURRENT_SCHEMA_VERSION
        )));
    }
    Ok(manifest)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Write a JSON file (pretty-printed).
fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| DexError::validation(format!("JSON serialization failed: {e}")))?;
    std::fs::write(path, json).map_err(|e| DexError::io(path, e))?;
    debug!(path = %path.display(), "wrote JSON file");
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
