//! nutconf: Network UPS Tools configuration editor
//!
//! A library for turning `nutconf` command-line options into validated,
//! typed configuration intents and applying them to the NUT configuration
//! files (`nut.conf`, `upsmon.conf`, `upsd.conf`, `ups.conf`).

pub mod conf;
pub mod defaults;
pub mod options;
pub mod usage;
pub mod writer;
