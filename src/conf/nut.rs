//! `nut.conf`: the NUT operating mode.

use crate::options::NutMode;

use super::{ConfFile, Line, ParseError, parse_lines, render_lines};

const MODE_PREFIX: &str = "MODE=";

/// Model of `nut.conf`.
///
/// Only the `MODE=` assignment is interpreted; the file is otherwise a shell
/// fragment and is kept as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NutConf {
    lines: Vec<Line<String>>,
}

impl NutConf {
    /// Raw value of the last `MODE=` assignment.
    #[must_use]
    pub fn mode_value(&self) -> Option<&str> {
        self.lines.iter().rev().find_map(|line| match line {
            Line::Directive(value) => Some(value.as_str()),
            Line::Verbatim(_) => None,
        })
    }

    /// The configured mode, if set to a known value.
    #[must_use]
    pub fn mode(&self) -> Option<NutMode> {
        self.mode_value().and_then(|value| value.parse().ok())
    }

    /// Sets the mode, replacing the first assignment and dropping any others.
    pub fn set_mode(&mut self, mode: NutMode) {
        let value = mode.as_str().to_string();
        let mut replaced = false;

        self.lines.retain_mut(|line| match line {
            Line::Directive(existing) if !replaced => {
                existing.clone_from(&value);
                replaced = true;
                true
            }
            Line::Directive(_) => false,
            Line::Verbatim(_) => true,
        });

        if !replaced {
            self.lines.push(Line::Directive(value));
        }
    }

    /// Returns `true` if a known mode other than `none` is set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.mode().is_some_and(|mode| mode != NutMode::None)
    }
}

impl ConfFile for NutConf {
    const FILE_NAME: &'static str = "nut.conf";

    fn parse(content: &str) -> Result<Self, ParseError> {
        let lines = parse_lines(content, |words| {
            Ok(match words {
                [assignment] => assignment.strip_prefix(MODE_PREFIX).map(ToString::to_string),
                _ => None,
            })
        })?;

        Ok(Self { lines })
    }

    fn render(&self) -> String {
        render_lines(&self.lines, |value| format!("{MODE_PREFIX}{value}"))
    }
}
