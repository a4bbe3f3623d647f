//! Error types for typed option accessors.

use thiserror::Error;

/// Contract violation when reading validated options.
///
/// These never describe user input mistakes; those are reported as
/// [`Diagnostic`](super::Diagnostic)s.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// Requested a monitor beyond the number of validated monitors.
    #[error("Monitor index {index} out of range ({count} monitor(s) specified)")]
    MonitorIndex {
        /// Requested index
        index: usize,
        /// Number of validated monitors
        count: usize,
    },
}

/// Mode keyword outside the closed set of [`NutMode`](super::NutMode)s.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown NUT mode: \"{0}\"")]
pub struct UnknownMode(pub String);
