//! `upsd.conf`: addresses the NUT daemon listens on.

use std::fmt;

use super::{ConfFile, Line, ParseError, parse_lines, quote, render_lines};

const LISTEN: &str = "LISTEN";

/// One `LISTEN` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listen {
    /// Address to bind
    pub address: String,
    /// Port; `None` means the daemon default
    pub port: Option<u16>,
}

impl fmt::Display for Listen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{LISTEN} {}", quote(&self.address))?;

        if let Some(port) = self.port {
            write!(f, " {port}")?;
        }

        Ok(())
    }
}

/// Model of `upsd.conf`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpsdConf {
    lines: Vec<Line<Listen>>,
}

impl UpsdConf {
    /// Listen addresses, in file order.
    pub fn listens(&self) -> impl Iterator<Item = &Listen> {
        self.lines.iter().filter_map(|line| match line {
            Line::Directive(listen) => Some(listen),
            Line::Verbatim(_) => None,
        })
    }

    /// Removes every `LISTEN` directive.
    pub fn clear_listens(&mut self) {
        self.lines.retain(|line| matches!(line, Line::Verbatim(_)));
    }

    /// Appends a `LISTEN` directive.
    pub fn add_listen(&mut self, listen: Listen) {
        self.lines.push(Line::Directive(listen));
    }
}

impl ConfFile for UpsdConf {
    const FILE_NAME: &'static str = "upsd.conf";

    fn parse(content: &str) -> Result<Self, ParseError> {
        let lines = parse_lines(content, |words| match words {
            [keyword, address] if keyword == LISTEN => Ok(Some(Listen {
                address: address.clone(),
                port: None,
            })),
            [keyword, address, port] if keyword == LISTEN => Ok(Some(Listen {
                address: address.clone(),
                port: Some(
                    port.parse()
                        .map_err(|_| format!("invalid port \"{port}\""))?,
                ),
            })),
            [keyword, ..] if keyword == LISTEN => {
                Err(format!("{LISTEN} requires an address and an optional port"))
            }
            _ => Ok(None),
        })?;

        Ok(Self { lines })
    }

    fn render(&self) -> String {
        render_lines(&self.lines, ToString::to_string)
    }
}
