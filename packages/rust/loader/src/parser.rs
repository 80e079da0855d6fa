//! Record file parser.
//!
//! A record file is a single YAML mapping:
//! - Required: `name`, `index`, `category`, `types`, `stats`
//! - Optional: `evolutions` (`{pokemon: {name}, method: {...}}` entries),
//!   `transformations` (`{name, types, stats, condition}` entries)

use std::path::Path;

use dexgen_shared::{DexError, Record, Result};

/// Number of characters of the category directory kept in a file key.
const CATEGORY_PREFIX_LEN: usize = 2;

/// Parse the contents of one record file.
pub(crate) fn parse_record(path: &Path, content: &str) -> Result<Record> {
    serde_yaml::from_str(content).map_err(|e| DexError::parse(path, e.to_string()))
}

/// Derive the output stem for a record file: the first two characters of its
/// parent directory name followed by the file stem.
///
/// `db/pokemon/kanto/bulbasaur.yaml` → `kabulbasaur`
pub fn file_key(path: &Path) -> Result<String> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| DexError::parse(path, "record file has no usable name"))?;

    let prefix: String = path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|s| s.to_str())
        .map(|dir| dir.chars().take(CATEGORY_PREFIX_LEN).collect())
        .unwrap_or_default();

    Ok(format!("{prefix}{stem}"))
}
