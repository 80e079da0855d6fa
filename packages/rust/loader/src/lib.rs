//! Record database loader.
//!
//! Walks a database directory for `*.yaml` record files, parses each into a
//! [`Record`](dexgen_shared::Record), and tags it with its output file key.
//! Loading is all-or-nothing: the first unreadable or malformed file aborts.

mod parser;

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use dexgen_shared::{DexError, LoadedRecord, Result};

pub use parser::file_key;

/// Extension of record files.
const RECORD_EXTENSION: &str = "yaml";

/// Recursively list every record file under `db_dir`, sorted by path.
pub fn discover_record_files(db_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![db_dir.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = std::fs::read_dir(&dir).map_err(|e| DexError::io(&dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| DexError::io(&dir, e))?;
            let path = entry.path();
            // Does not follow symlinks, so a linked directory is never entered.
            let file_type = entry.file_type().map_err(|e| DexError::io(&path, e))?;
            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_symlink() && path.is_dir() {
                debug!(path = %path.display(), "skipping symlinked directory");
            } else if path.extension().is_some_and(|ext| ext == RECORD_EXTENSION) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Load and parse every record under `db_dir`, in path order.
#[instrument(skip_all, fields(db_dir = %db_dir.display()))]
pub fn load_records(db_dir: &Path) -> Result<Vec<LoadedRecord>> {
    let files = discover_record_files(db_dir)?;
    debug!(files = files.len(), "record files discovered");

    let mut records = Vec::with_capacity(files.len());
    for path in files {
        records.push(load_record(&path)?);
    }

    info!(records = records.len(), "records loaded");
    Ok(records)
}

/// Load a single record file.
pub fn load_record(path: &Path) -> Result<LoadedRecord> {
    let content = std::fs::read_to_string(path).map_err(|e| DexError::io(path, e))?;
    let record = parser::parse_record(path, &content)?;
    let file_key = file_key(path)?;

    debug!(name = %record.name, index = record.index, %file_key, "parsed record");

    Ok(LoadedRecord {
        record,
        source: path.to_path_buf(),
        file_key,
    })
}
