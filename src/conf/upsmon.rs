//! `upsmon.conf`: monitored UPS systems.

use std::fmt;

use super::{ConfFile, Line, ParseError, parse_lines, quote, render_lines};

const MONITOR: &str = "MONITOR";

/// Whether `upsmon` manages the UPS power (master) or only follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorRole {
    /// Directly attached; shuts down last
    Master,
    /// Powered by the UPS, but not attached
    Slave,
}

impl MonitorRole {
    /// Parses a role keyword, accepting the newer primary/secondary names.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "master" | "primary" => Some(Self::Master),
            "slave" | "secondary" => Some(Self::Slave),
            _ => None,
        }
    }

    /// Returns the keyword written to `upsmon.conf`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Master => "master",
            Self::Slave => "slave",
        }
    }
}

impl fmt::Display for MonitorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `MONITOR` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monitor {
    /// UPS name on the remote `upsd`
    pub ups: String,
    /// Host running `upsd`
    pub host: String,
    /// `upsd` port; `None` means the default
    pub port: Option<u16>,
    /// Number of power supplies this UPS feeds
    pub power_value: u32,
    /// `upsd` username
    pub username: String,
    /// `upsd` password
    pub password: String,
    /// Monitoring role
    pub role: MonitorRole,
}

impl Monitor {
    fn from_words(words: &[String]) -> Result<Self, String> {
        let [system, power_value, username, password, role] = words else {
            return Err(format!(
                "{MONITOR} requires 5 fields, got {}",
                words.len()
            ));
        };

        let (ups, host_port) = system
            .split_once('@')
            .ok_or_else(|| format!("invalid system \"{system}\": expected <ups>@<host>"))?;
        let (host, port) = split_host_port(host_port)
            .ok_or_else(|| format!("invalid port in \"{system}\""))?;

        Ok(Self {
            ups: ups.to_string(),
            host: host.to_string(),
            port,
            power_value: power_value
                .parse()
                .map_err(|_| format!("invalid power value \"{power_value}\""))?,
            username: username.clone(),
            password: password.clone(),
            role: MonitorRole::from_keyword(role)
                .ok_or_else(|| format!("invalid monitor role \"{role}\""))?,
        })
    }

    /// Returns `<ups>@<host>[:<port>]`.
    #[must_use]
    pub fn system(&self) -> String {
        match self.port {
            Some(port) => format!("{}@{}:{port}", self.ups, self.host),
            None => format!("{}@{}", self.ups, self.host),
        }
    }
}

impl fmt::Display for Monitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{MONITOR} {} {} {} {} {}",
            quote(&self.system()),
            self.power_value,
            quote(&self.username),
            quote(&self.password),
            self.role
        )
    }
}

/// Splits `host[:port]` at the last colon.
///
/// Returns `None` if a port is present but is not a valid port number.
///
/// # Example
///
/// ```
/// use nutconf::conf::split_host_port;
///
/// assert_eq!(split_host_port("ups.lan:3493"), Some(("ups.lan", Some(3493))));
/// assert_eq!(split_host_port("ups.lan"), Some(("ups.lan", None)));
/// assert_eq!(split_host_port("ups.lan:http"), None);
/// ```
#[must_use]
pub fn split_host_port(host_port: &str) -> Option<(&str, Option<u16>)> {
    match host_port.rsplit_once(':') {
        Some((host, port)) => port.parse().ok().map(|port| (host, Some(port))),
        None => Some((host_port, None)),
    }
}

/// Model of `upsmon.conf`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpsmonConf {
    lines: Vec<Line<Monitor>>,
}

impl UpsmonConf {
    /// Monitors, in file order.
    pub fn monitors(&self) -> impl Iterator<Item = &Monitor> {
        self.lines.iter().filter_map(|line| match line {
            Line::Directive(monitor) => Some(monitor),
            Line::Verbatim(_) => None,
        })
    }

    /// Removes every `MONITOR` directive.
    pub fn clear_monitors(&mut self) {
        self.lines.retain(|line| matches!(line, Line::Verbatim(_)));
    }

    /// Appends a `MONITOR` directive.
    pub fn add_monitor(&mut self, monitor: Monitor) {
        self.lines.push(Line::Directive(monitor));
    }
}

impl ConfFile for UpsmonConf {
    const FILE_NAME: &'static str = "upsmon.conf";

    fn parse(content: &str) -> Result<Self, ParseError> {
        let lines = parse_lines(content, |words| match words {
            [keyword, fields @ ..] if keyword == MONITOR => Monitor::from_words(fields).map(Some),
            _ => Ok(None),
        })?;

        Ok(Self { lines })
    }

    fn render(&self) -> String {
        render_lines(&self.lines, ToString::to_string)
    }
}
