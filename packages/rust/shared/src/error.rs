//! Error types for dexgen.
//!
//! Library crates use [`DexError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all dexgen operations.
#[derive(Debug, thiserror::Error)]
pub enum DexError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A record file could not be parsed into a [`crate::Record`].
    #[error("malformed record {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The loaded record set violates a dataset-wide invariant
    /// (dense ordinals, unique names).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// An evolution edge names a record that was never loaded.
    #[error("dangling evolution reference: no record named {name:?}")]
    DanglingReference { name: String },

    /// A resolved family cannot be laid out as a single-base tree.
    #[error("family shape error: {message}")]
    FamilyShape { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DexError>;

impl DexError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error for the record file at `path`.
    pub fn parse(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a dangling-reference error for an unknown record name.
    pub fn dangling(name: impl Into<String>) -> Self {
        Self::DanglingReference { name: name.into() }
    }

    /// Create a family shape error from any displayable message.
    pub fn family_shape(msg: impl Into<String>) -> Self {
        Self::FamilyShape {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = DexError::config("missing db_dir");
        assert_eq!(err.to_string(), "config error: missing db_dir");

        let err = DexError::dangling("Missingno");
        assert!(err.to_string().contains("\"Missingno\""));

        let err = DexError::parse("db/pokemon/kanto/x.yaml", "missing field `index`");
        assert!(err.to_string().contains("x.yaml"));
        assert!(err.to_string().contains("missing field `index`"));
    }
}
