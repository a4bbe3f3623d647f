//! Error types for configuration file handling.

use std::path::PathBuf;

use thiserror::Error;

/// Syntax or value error in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct ParseError {
    /// 1-based line number
    pub line: usize,
    /// What is wrong with the line
    pub reason: String,
}

impl ParseError {
    /// Creates a parse error for the given 1-based line.
    #[must_use]
    pub fn new(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfError {
    /// Failed to read a configuration file.
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        /// Path to the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a configuration file.
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        /// Path to the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a configuration file.
    #[error("Failed to parse '{}': {source}", path.display())]
    Parse {
        /// Path to the file
        path: PathBuf,
        /// Location and reason
        #[source]
        source: ParseError,
    },
}
