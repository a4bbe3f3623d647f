//! Help text.

use crate::defaults;
use crate::options::NutMode;

/// Option descriptions, one row per line.
const OPTIONS: &[&str] = &[
    "    --help                        Display this help and exit",
    "    --autoconfigure               Perform autoconfiguration",
    "    --is-configured               Checks whether NUT is configured",
    "    --local <directory>           Sets configuration directory",
    "    --system                      Sets configuration directory to the system default",
    "    --mode <NUT mode>             Sets NUT mode (see below)",
    "    --set-monitor <spec>          Configures one monitor (see below)",
    "                                  All existing entries are removed; however, it may be",
    "                                  specified multiple times to set multiple entries",
    "    --add-monitor <spec>          Same as --set-monitor, but keeps existing entries",
    "                                  The two options are mutually exclusive",
    "    --set-listen <addr> [<port>]  Configures one listen address for the NUT daemon",
    "                                  All existing entries are removed; however, it may be",
    "                                  specified multiple times to set multiple entries",
    "    --add-listen <addr> [<port>]  Same as --set-listen, but keeps existing entries",
    "                                  The two options are mutually exclusive",
    "    --set-device <spec>           Configures one UPS device (see below)",
    "                                  All existing devices are removed; however, it may be",
    "                                  specified multiple times to set multiple devices",
    "    --add-device <spec>           Same as --set-device, but keeps existing devices",
    "                                  The two options are mutually exclusive",
];

const SPECS: &[&str] = &[
    "Monitor is specified by the following sequence:",
    "    <ups_ID> <host>[:<port>] <power_value> <user> <passwd> (\"master\"|\"slave\")",
    "UPS device is specified by the following sequence:",
    "    <ups_ID> <driver> <port> [<description>]",
];

/// Renders the full usage text for the program invoked as `bin`.
#[must_use]
pub fn text(bin: &str) -> String {
    let mut out = format!("Usage: {bin} [OPTIONS]\n\nOPTIONS:\n");

    for line in OPTIONS {
        out.push_str(line);
        out.push('\n');
    }

    let modes: Vec<_> = NutMode::ALL.iter().map(|mode| mode.as_str()).collect();
    out.push_str(&format!(
        "\nSystem configuration directory: {}\nNUT modes: {}\n",
        defaults::CONF_DIR,
        modes.join(", ")
    ));

    for line in SPECS {
        out.push_str(line);
        out.push('\n');
    }

    out
}
