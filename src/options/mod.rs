//! Command-line option layer for `nutconf`.
//!
//! This module provides:
//! - A generic multi-value option tokenizer ([`OptionStore`])
//! - The `nutconf` option validator ([`ValidatedOptions`])
//! - Typed specifications ([`MonitorSpec`], [`ListenSpec`], [`DeviceSpec`], [`NutMode`])
//!
//! # Repeated options
//!
//! Each occurrence of an option keeps its own argument list, in command-line
//! order. `--set-device ups1 usbhid-ups auto --set-device ups2 snmp-ups host`
//! yields two independent occurrences of `set-device`.
//!
//! # Set vs. add
//!
//! The repeatable families (`monitor`, `listen`, `device`) come in a "set"
//! variant that replaces existing entries and an "add" variant that keeps
//! them. Mixing both variants of one family is an error.

mod error;
mod store;
mod validated;


pub use error::{OptionsError, UnknownMode};
pub use store::{Arguments, Dash, OptionStore, Token};
pub use validated::{
    DeviceSpec, Diagnostic, Family, ListenSpec, MONITOR_FIELDS, MonitorSpec, NutMode, OptionMode,
    ValidatedOptions, Variant, VariantCounts,
};
