//! Application execution logic.
//!
//! Resolves the configuration directory and carries out the requested query
//! or configuration changes.

use std::path::PathBuf;

use thiserror::Error;

use nutconf::conf::ConfFiles;
use nutconf::defaults;
use nutconf::options::ValidatedOptions;
use nutconf::writer::{ConfWriter, WriteError};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The configuration directory does not exist.
    #[error("Configuration directory {} isn't available", .0.display())]
    MissingDirectory(PathBuf),

    /// Failed to update the configuration files.
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// What an invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Configuration changes (if any) were applied.
    Applied,
    /// `--is-configured` was answered.
    Configured(bool),
}

/// Returns the configuration directory selected by `--local`, or the system one.
pub fn conf_dir(options: &ValidatedOptions) -> PathBuf {
    options
        .local()
        .map_or_else(|| PathBuf::from(defaults::CONF_DIR), PathBuf::from)
}

/// Executes one invocation with already validated options.
///
/// `--is-configured` is a pure query: when given, nothing is written.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration directory does not exist
/// - A configuration file cannot be read, parsed or written
/// - A monitor or listen specification carries an unparsable number
pub fn execute<F: ConfFiles>(options: &ValidatedOptions, files: &F) -> Result<Outcome, RunError> {
    let dir = conf_dir(options);

    if !files.exists(&dir) {
        return Err(RunError::MissingDirectory(dir));
    }

    tracing::debug!("Using configuration directory {}", dir.display());
    let writer = ConfWriter::new(files, dir);

    if options.is_configured() {
        return Ok(Outcome::Configured(writer.is_configured()?));
    }

    writer.apply(options)?;

    Ok(Outcome::Applied)
}
