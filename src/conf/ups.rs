//! `ups.conf`: UPS device definitions.
//!
//! The file is a list of `[id]` sections holding `key = value` settings (or
//! bare flags). Lines before the first section form the global section.

use std::fmt;

use super::{ConfFile, Line, ParseError, fits_line, quote, words};

/// A `key = value` setting or a bare `key` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    /// Setting name
    pub key: String,
    /// Value; `None` for flags
    pub value: Option<String>,
}

impl Setting {
    fn parse(raw: &str) -> Result<Option<Self>, String> {
        if let Some((key, value)) = split_assignment(raw) {
            let key = single_word(key)
                .ok_or_else(|| format!("invalid setting name \"{}\"", key.trim()))?;
            let value = match words(value)?.as_slice() {
                [] => String::new(),
                [value] => value.clone(),
                _ => return Err(format!("value of \"{key}\" must be quoted")),
            };

            return Ok(Some(Self {
                key,
                value: Some(value),
            }));
        }

        match words(raw)?.as_slice() {
            [] => Ok(None),
            [flag] => Ok(Some(Self {
                key: flag.clone(),
                value: None,
            })),
            _ => Err("expected \"key = value\"".to_string()),
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} = {}", self.key, quote(value)),
            None => f.write_str(&self.key),
        }
    }
}

/// Splits at the first `=` that precedes any quote or comment.
fn split_assignment(raw: &str) -> Option<(&str, &str)> {
    for (index, c) in raw.char_indices() {
        match c {
            '=' => return Some((&raw[..index], &raw[index + 1..])),
            '"' | '#' => return None,
            _ => {}
        }
    }

    None
}

fn single_word(raw: &str) -> Option<String> {
    match words(raw).ok()?.as_slice() {
        [word] => Some(word.clone()),
        _ => None,
    }
}

/// Parses a `[name]` section header.
fn section_header(raw: &str) -> Option<String> {
    match words(raw).ok()?.as_slice() {
        [word] => {
            let name = word.strip_prefix('[')?.strip_suffix(']')?;
            Some(name.trim().to_string())
        }
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    name: String,
    lines: Vec<Line<Setting>>,
}

/// Model of `ups.conf`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpsConf {
    global: Vec<Line<Setting>>,
    sections: Vec<Section>,
}

impl UpsConf {
    /// Returns `true` if `id` renders as a `[id]` header that parses back to `id`.
    #[must_use]
    pub fn is_device_name(id: &str) -> bool {
        fits_line(id) && quote(id) == id && !id.contains(['[', ']'])
    }

    /// Device identifiers, in file order.
    pub fn devices(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|section| section.name.as_str())
    }

    /// Value of `key` in device `id`. Flags yield an empty string.
    #[must_use]
    pub fn get(&self, id: &str, key: &str) -> Option<&str> {
        self.section(id)?
            .lines
            .iter()
            .rev()
            .find_map(|line| match line {
                Line::Directive(setting) if setting.key == key => {
                    Some(setting.value.as_deref().unwrap_or_default())
                }
                _ => None,
            })
    }

    /// Value of a global setting.
    #[cfg(test)]
    pub(crate) fn global(&self, key: &str) -> Option<&str> {
        self.global.iter().rev().find_map(|line| match line {
            Line::Directive(setting) if setting.key == key => {
                Some(setting.value.as_deref().unwrap_or_default())
            }
            _ => None,
        })
    }

    /// Sets `key = value` in device `id`, creating the device if needed.
    pub fn set(&mut self, id: &str, key: &str, value: &str) {
        let section = self.section_mut(id);

        let existing = section.lines.iter_mut().find_map(|line| match line {
            Line::Directive(setting) if setting.key == key => Some(setting),
            _ => None,
        });

        if let Some(setting) = existing {
            setting.value = Some(value.to_string());
            return;
        }

        let position = section
            .lines
            .iter()
            .rposition(|line| matches!(line, Line::Directive(_)))
            .map_or(0, |index| index + 1);

        section.lines.insert(
            position,
            Line::Directive(Setting {
                key: key.to_string(),
                value: Some(value.to_string()),
            }),
        );
    }

    /// Sets the driver of device `id`.
    pub fn set_driver(&mut self, id: &str, driver: &str) {
        self.set(id, "driver", driver);
    }

    /// Sets the port of device `id`.
    pub fn set_port(&mut self, id: &str, port: &str) {
        self.set(id, "port", port);
    }

    /// Sets the description of device `id`.
    pub fn set_description(&mut self, id: &str, description: &str) {
        self.set(id, "desc", description);
    }

    /// Removes every device, keeping the global section.
    pub fn clear_devices(&mut self) {
        self.sections.clear();
    }

    fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name == id)
    }

    fn section_mut(&mut self, id: &str) -> &mut Section {
        let index = match self.sections.iter().position(|section| section.name == id) {
            Some(index) => index,
            None => {
                self.sections.push(Section {
                    name: id.to_string(),
                    lines: Vec::new(),
                });
                self.sections.len() - 1
            }
        };

        &mut self.sections[index]
    }
}

impl ConfFile for UpsConf {
    const FILE_NAME: &'static str = "ups.conf";

    fn parse(content: &str) -> Result<Self, ParseError> {
        let mut conf = Self::default();

        for (index, raw) in content.lines().enumerate() {
            if let Some(name) = section_header(raw) {
                conf.sections.push(Section {
                    name,
                    lines: Vec::new(),
                });
                continue;
            }

            let setting =
                Setting::parse(raw).map_err(|reason| ParseError::new(index + 1, reason))?;

            let line = match setting {
                Some(setting) => Line::Directive(setting),
                None => Line::Verbatim(raw.to_string()),
            };

            match conf.sections.last_mut() {
                Some(section) => section.lines.push(line),
                None => conf.global.push(line),
            }
        }

        Ok(conf)
    }

    fn render(&self) -> String {
        let mut out = String::new();

        for line in &self.global {
            push_line(&mut out, "", line);
        }

        for section in &self.sections {
            // Keep sections visually apart
            if !out.is_empty() && !out.ends_with("\n\n") {
                out.push('\n');
            }

            out.push('[');
            out.push_str(&section.name);
            out.push_str("]\n");

            for line in &section.lines {
                push_line(&mut out, "\t", line);
            }
        }

        out
    }
}

/// Renders one line; settings get `indent`, verbatim lines stay as written.
fn push_line(out: &mut String, indent: &str, line: &Line<Setting>) {
    match line {
        Line::Directive(setting) => {
            out.push_str(indent);
            out.push_str(&setting.to_string());
        }
        Line::Verbatim(raw) => out.push_str(raw),
    }
    out.push('\n');
}
