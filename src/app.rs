//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and diagnostic reporting
//! that support the main entry point.

use nutconf::options::ValidatedOptions;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Invalid command line, or `--is-configured` answered "false" (exit code 1).
    pub const FAILURE: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - missing directory, unreadable or unwritable file, etc.
    ///
    /// Runtime failures never share code 1 with command-line errors or a
    /// negative `--is-configured` answer.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Renders every problem with the command line, one per line.
#[must_use]
pub fn diagnostics_report(options: &ValidatedOptions) -> String {
    options
        .diagnostics()
        .map(|diagnostic| format!("{diagnostic}\n"))
        .collect()
}

/// Sets up the tracing subscriber for logging.
///
/// Defaults to warnings only; `RUST_LOG` raises the level.
pub fn setup_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
