//! Error types for the configuration manager.
//!
//! Responsibilities:
//! - Define error variants for option lookup, value validation, and snapshot decoding.
//! - Provide conversion from lower-level errors (`FormatError`, `std::io::Error`).
//!
//! Does NOT handle:
//! - Restoring state after a failed scope body (scope exit is infallible, see `scope.rs`).
//!
//! Invariants:
//! - Every error is raised synchronously by the call that triggers it.
//! - `InvalidValue` always names the offending value so callers can report it verbatim.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by option lookup, setters, and snapshot load/save.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The option name is not part of the recognized option set.
    #[error("unknown config option: '{0}'")]
    UnknownOption(String),

    /// The value is outside the option's validated domain.
    ///
    /// `what` describes the domain (e.g. "table format name") so the rendered
    /// message reads `invalid table format name: 'NOPE'`.
    #[error("invalid {what}: '{value}'")]
    InvalidValue { what: &'static str, value: String },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("failed to encode Config: {0}")]
    Encode(serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid(what: &'static str, value: impl ToString) -> Self {
        ConfigError::InvalidValue {
            what,
            value: value.to_string(),
        }
    }
}

/// Errors raised while decoding a saved snapshot.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The payload handed to `load` is not a decodable snapshot.
    #[error("invalid Config string: {source}")]
    InvalidString { source: serde_json::Error },

    /// The file handed to `load_from_file` could not be read or decoded.
    ///
    /// `source` carries the underlying read or parse failure.
    #[error("invalid Config file: {}", path.display())]
    InvalidFile {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The payload contains a key outside the recognized set.
    #[error("unrecognized key in Config payload: '{0}'")]
    UnknownKey(String),
}
