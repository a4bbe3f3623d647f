//! NUT configuration files.
//!
//! This module provides:
//! - Models of the files `nutconf` edits ([`NutConf`], [`UpsmonConf`], [`UpsdConf`], [`UpsConf`])
//! - The [`ConfFile`] parse/render contract they share
//! - Filesystem access ([`ConfFiles`], [`LocalFiles`])
//!
//! Lines the models do not interpret (comments, blank lines, other
//! directives) are kept verbatim, so editing one directive does not disturb
//! the rest of a hand-written file.

mod error;
mod files;
mod lexer;
mod nut;
mod ups;
mod upsd;
mod upsmon;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use error::{ConfError, ParseError};
pub use files::{ConfFiles, LocalFiles};
pub use lexer::{fits_line, quote, words};
pub use nut::NutConf;
pub use ups::{Setting, UpsConf};
pub use upsd::{Listen, UpsdConf};
pub use upsmon::{Monitor, MonitorRole, UpsmonConf, split_host_port};

#[cfg(test)]
pub use files::mock;

/// A configuration file model.
pub trait ConfFile: Default {
    /// File name inside the configuration directory.
    const FILE_NAME: &'static str;

    /// Parses the file content.
    ///
    /// # Errors
    ///
    /// Returns the first malformed line.
    fn parse(content: &str) -> Result<Self, ParseError>;

    /// Renders the model back to file content.
    fn render(&self) -> String;
}

/// One line of a directive-based configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<T> {
    /// A directive the model interprets
    Directive(T),
    /// Any other line, kept as written
    Verbatim(String),
}

/// Parses `content` line by line, turning recognized lines into directives.
///
/// `directive` returns `Ok(None)` for lines it does not interpret.
fn parse_lines<T>(
    content: &str,
    mut directive: impl FnMut(&[String]) -> Result<Option<T>, String>,
) -> Result<Vec<Line<T>>, ParseError> {
    content
        .lines()
        .enumerate()
        .map(|(index, raw)| {
            let line = index + 1;
            let words = words(raw).map_err(|reason| ParseError::new(line, reason))?;

            Ok(match directive(&words).map_err(|reason| ParseError::new(line, reason))? {
                Some(value) => Line::Directive(value),
                None => Line::Verbatim(raw.to_string()),
            })
        })
        .collect()
}

/// Renders lines, one per row, with a trailing newline.
fn render_lines<T>(lines: &[Line<T>], directive: impl Fn(&T) -> String) -> String {
    lines
        .iter()
        .map(|line| match line {
            Line::Directive(value) => directive(value),
            Line::Verbatim(raw) => raw.clone(),
        })
        .fold(String::new(), |mut out, row| {
            out.push_str(&row);
            out.push('\n');
            out
        })
}
