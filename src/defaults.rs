//! Default values.
//!
//! Centralized constants to avoid magic values scattered across the codebase.

/// System configuration directory, used unless `--local` is given.
pub const CONF_DIR: &str = "/etc/nut";
