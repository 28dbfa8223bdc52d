//! Error types for the composition system.
//!
//! Rendering never produces these: an unresolvable variant value simply
//! contributes no classes. Errors only come from loading composition sheets
//! and from explicit validation.

use std::path::PathBuf;

/// Result type alias for composition operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or validating compositions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A composition sheet could not be parsed.
    #[error("Failed to parse {format} composition sheet: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    /// File I/O error.
    #[error("Failed to read composition sheet '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A sheet reference (`@name`) points at an entry that doesn't exist.
    #[error("Composition sheet has no entry named '{name}'")]
    UnknownEntry { name: String },

    /// Sheet entries reference each other in a loop.
    #[error("Cycle detected in composition sheet: {}", path.join(" -> "))]
    BaseCycle { path: Vec<String> },

    /// A default variant names a variant or value that was never declared.
    #[error("Default variant '{variant}' = '{value}' does not match any declared variant value")]
    UnknownDefault { variant: String, value: String },
}

impl Error {
    /// Create a parse error.
    pub fn parse(format: &'static str, message: impl Into<String>) -> Self {
        Self::Parse {
            format,
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an unknown entry error.
    pub fn unknown_entry(name: impl Into<String>) -> Self {
        Self::UnknownEntry { name: name.into() }
    }

    /// Create an unknown default error.
    pub fn unknown_default(variant: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownDefault {
            variant: variant.into(),
            value: value.into(),
        }
    }
}
