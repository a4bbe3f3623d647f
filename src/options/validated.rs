//! Validated `nutconf` options.
//!
//! Interprets the double-dash options of an [`OptionStore`] against the fixed
//! `nutconf` vocabulary. Validation never stops early: every unknown option,
//! arity or value problem, stray argument and set/add conflict is collected
//! so that a single invocation reports all of them together.

use std::fmt;
use std::str::FromStr;

use super::error::{OptionsError, UnknownMode};
use super::store::{Dash, OptionStore};

/// Number of positional fields in a monitor specification.
pub const MONITOR_FIELDS: usize = 6;

/// NUT operating mode, as accepted by `--mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NutMode {
    /// Local UPS, local clients only
    Standalone,
    /// Local UPS, serving network clients
    Netserver,
    /// Monitoring a remote server
    Netclient,
    /// Controlled by an external manager
    Controlled,
    /// Manually configured
    Manual,
    /// NUT disabled
    None,
}

impl NutMode {
    /// All modes, in documentation order.
    pub const ALL: [Self; 6] = [
        Self::Standalone,
        Self::Netserver,
        Self::Netclient,
        Self::Controlled,
        Self::Manual,
        Self::None,
    ];

    /// Returns the mode keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standalone => "standalone",
            Self::Netserver => "netserver",
            Self::Netclient => "netclient",
            Self::Controlled => "controlled",
            Self::Manual => "manual",
            Self::None => "none",
        }
    }
}

impl fmt::Display for NutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NutMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}

/// Monitor specification borrowed from the validated options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorSpec<'a> {
    /// UPS identifier
    pub ups: &'a str,
    /// `host[:port]`
    pub host_port: &'a str,
    /// Power value (unparsed)
    pub power_value: &'a str,
    /// Username
    pub user: &'a str,
    /// Password
    pub password: &'a str,
    /// `master` or `slave`
    pub role: &'a str,
}

impl<'a> MonitorSpec<'a> {
    fn from_fields(fields: &'a [String]) -> Self {
        debug_assert_eq!(fields.len(), MONITOR_FIELDS);

        Self {
            ups: &fields[0],
            host_port: &fields[1],
            power_value: &fields[2],
            user: &fields[3],
            password: &fields[4],
            role: &fields[5],
        }
    }
}

/// Listen address specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenSpec {
    /// Address to listen on
    pub address: String,
    /// Port (unparsed); `None` means the daemon default
    pub port: Option<String>,
}

/// UPS device specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSpec {
    /// Device (section) identifier
    pub id: String,
    /// Driver name
    pub driver: String,
    /// Driver port
    pub port: String,
    /// Optional human-readable description
    pub description: Option<String>,
}

/// Repeatable option family with "set" and "add" variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// `--set-monitor` / `--add-monitor`
    Monitor,
    /// `--set-listen` / `--add-listen`
    Listen,
    /// `--set-device` / `--add-device`
    Device,
}

impl Family {
    /// All families.
    pub const ALL: [Self; 3] = [Self::Monitor, Self::Listen, Self::Device];

    /// Returns the family suffix used in option names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monitor => "monitor",
            Self::Listen => "listen",
            Self::Device => "device",
        }
    }
}

/// Variant of a repeatable option family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Replaces existing entries
    Set,
    /// Keeps existing entries
    Add,
}

impl Variant {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Add => "add",
        }
    }
}

/// Occurrence counters of one family, per variant.
///
/// Every occurrence counts, including malformed ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariantCounts {
    /// Number of "set" occurrences
    pub set: usize,
    /// Number of "add" occurrences
    pub add: usize,
}

impl VariantCounts {
    const fn bump(&mut self, variant: Variant) {
        match variant {
            Variant::Set => self.set += 1,
            Variant::Add => self.add += 1,
        }
    }

    /// Error message if both variants were used.
    fn exclusion_error(self, family: Family) -> Option<String> {
        let family = family.as_str();

        (self.set > 0 && self.add > 0).then(|| {
            format!("--set-{family} and --add-{family} options can't both be specified")
        })
    }
}

/// How an option was used on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMode<'a> {
    /// Option not given
    NotSpecified,
    /// Option given without arguments
    Getter,
    /// Option given with arguments
    Setter(&'a [String]),
}

impl<'a> OptionMode<'a> {
    /// Resolves the mode of the `order`-th occurrence of a double-dash option.
    #[must_use]
    pub fn of(store: &'a OptionStore, name: &str, order: usize) -> Self {
        match store.get(Dash::Double, name, order) {
            None => Self::NotSpecified,
            Some([]) => Self::Getter,
            Some(args) => Self::Setter(args),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Flag {
    Help,
    Autoconfigure,
    IsConfigured,
    System,
}

#[derive(Debug, Clone, Copy)]
enum KnownOption {
    Flag(Flag),
    Local,
    Mode,
    Repeatable(Family, Variant),
}

impl KnownOption {
    fn from_name(name: &str) -> Option<Self> {
        let option = match name {
            "help" => Self::Flag(Flag::Help),
            "autoconfigure" => Self::Flag(Flag::Autoconfigure),
            "is-configured" => Self::Flag(Flag::IsConfigured),
            "system" => Self::Flag(Flag::System),
            "local" => Self::Local,
            "mode" => Self::Mode,
            "set-monitor" => Self::Repeatable(Family::Monitor, Variant::Set),
            "add-monitor" => Self::Repeatable(Family::Monitor, Variant::Add),
            "set-listen" => Self::Repeatable(Family::Listen, Variant::Set),
            "add-listen" => Self::Repeatable(Family::Listen, Variant::Add),
            "set-device" => Self::Repeatable(Family::Device, Variant::Set),
            "add-device" => Self::Repeatable(Family::Device, Variant::Add),
            _ => return None,
        };

        Some(option)
    }
}

/// A single problem found while validating options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic<'a> {
    /// Option outside the known vocabulary (with its dashes)
    UnknownOption(&'a str),
    /// Arity, value, duplicate or exclusion problem
    OptionError(&'a str),
    /// Argument not attached to any option
    UnexpectedArgument(&'a str),
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOption(opt) => write!(f, "Unknown option: {opt}"),
            Self::OptionError(error) => write!(f, "Option error: {error}"),
            Self::UnexpectedArgument(arg) => write!(f, "Unexpected argument: {arg}"),
        }
    }
}

/// Fully validated `nutconf` options.
///
/// Built in a single pass from an [`OptionStore`]; read-only afterwards.
///
/// # Example
///
/// ```
/// use nutconf::options::{Family, NutMode, ValidatedOptions};
///
/// let options = ValidatedOptions::parse([
///     "--mode", "netserver",
///     "--add-listen", "0.0.0.0", "3493",
/// ]);
///
/// assert!(options.valid());
/// assert_eq!(options.mode(), Some(NutMode::Netserver));
/// assert!(options.keep_existing(Family::Listen));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct ValidatedOptions {
    valid: bool,
    help: bool,
    autoconfigure: bool,
    is_configured: bool,
    system: bool,
    local: Option<String>,
    mode: Option<NutMode>,
    /// Flat monitor fields, `MONITOR_FIELDS` per monitor
    monitors: Vec<String>,
    listen_addrs: Vec<ListenSpec>,
    devices: Vec<DeviceSpec>,
    monitor_counts: VariantCounts,
    listen_counts: VariantCounts,
    device_counts: VariantCounts,
    unknown: Vec<String>,
    errors: Vec<String>,
    free: Vec<String>,
}

impl ValidatedOptions {
    /// Validates the options held by `store`.
    #[must_use]
    pub fn from_store(store: &OptionStore) -> Self {
        let mut options = Self::default();

        // No single-dash options are recognized
        options.unknown.extend(
            store
                .names(Dash::Single)
                .map(|name| format!("{}{name}", Dash::Single.prefix())),
        );

        for name in store.names(Dash::Double) {
            match KnownOption::from_name(name) {
                Some(KnownOption::Flag(flag)) => options.take_flag(store, name, flag),
                Some(KnownOption::Local) => options.take_local(store),
                Some(KnownOption::Mode) => options.take_mode(store),
                Some(KnownOption::Repeatable(family, variant)) => {
                    options.take_repeatable(store, family, variant);
                }
                None => options
                    .unknown
                    .push(format!("{}{name}", Dash::Double.prefix())),
            }
        }

        // Help is honoured with either prefix, even though `-help` is unknown
        options.help = store.exists_any("help");
        options.free = store.free_arguments().to_vec();
        options.valid =
            options.unknown.is_empty() && options.errors.is_empty() && options.free.is_empty();

        for family in Family::ALL {
            if let Some(error) = options.counts(family).exclusion_error(family) {
                options.errors.push(error);
                options.valid = false;
            }
        }

        options
    }

    /// Tokenizes and validates `tokens` (program name excluded).
    pub fn parse<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self::from_store(&OptionStore::parse(tokens))
    }

    /// Tokenizes and validates the process arguments.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_store(&OptionStore::from_env())
    }

    fn take_flag(&mut self, store: &OptionStore, name: &str, flag: Flag) {
        let field = match flag {
            Flag::Help => &mut self.help,
            Flag::Autoconfigure => &mut self.autoconfigure,
            Flag::IsConfigured => &mut self.is_configured,
            Flag::System => &mut self.system,
        };
        *field = true;

        self.push_duplicates(name, store.count(Dash::Double, name));
    }

    fn take_local(&mut self, store: &OptionStore) {
        self.local = self
            .single_value(
                store,
                "local",
                "Only one directory may be specified with the --local option",
            )
            .map(ToString::to_string);
    }

    fn take_mode(&mut self, store: &OptionStore) {
        let Some(value) =
            self.single_value(store, "mode", "Only one argument allowed for the --mode option")
        else {
            return;
        };

        match value.parse::<NutMode>() {
            Ok(mode) => self.mode = Some(mode),
            Err(e) => self.errors.push(e.to_string()),
        }
    }

    /// Validates a setter-only option taking exactly one argument.
    ///
    /// Returns the argument only if the option was given exactly once with
    /// exactly one argument.
    fn single_value<'s>(
        &mut self,
        store: &'s OptionStore,
        name: &str,
        too_many: &str,
    ) -> Option<&'s str> {
        let value = match OptionMode::of(store, name, 0) {
            OptionMode::NotSpecified => return None,
            OptionMode::Getter => {
                self.errors.push(format!("--{name} option requires an argument"));
                None
            }
            OptionMode::Setter([value]) => Some(value.as_str()),
            OptionMode::Setter(_) => {
                self.errors.push(too_many.to_string());
                None
            }
        };

        let count = store.count(Dash::Double, name);
        self.push_duplicates(name, count);

        if count > 1 { None } else { value }
    }

    fn push_duplicates(&mut self, name: &str, count: usize) {
        for _ in 1..count {
            self.errors
                .push(format!("--{name} option specified more than once"));
        }
    }

    fn take_repeatable(&mut self, store: &OptionStore, family: Family, variant: Variant) {
        let name = format!("{}-{}", variant.as_str(), family.as_str());

        for order in 0..store.count(Dash::Double, &name) {
            match OptionMode::of(store, &name, order) {
                OptionMode::Setter(args) => self.take_spec(family, &name, args),
                OptionMode::Getter | OptionMode::NotSpecified => {
                    self.errors.push(format!("--{name} option requires arguments"));
                }
            }

            self.counts_mut(family).bump(variant);
        }
    }

    fn take_spec(&mut self, family: Family, name: &str, args: &[String]) {
        match family {
            Family::Monitor => {
                if args.len() == MONITOR_FIELDS {
                    self.monitors.extend_from_slice(args);
                } else {
                    self.errors.push(format!(
                        "--{name} option requires exactly {MONITOR_FIELDS} arguments"
                    ));
                }
            }
            Family::Listen => match args {
                [address] | [address, _] => self.listen_addrs.push(ListenSpec {
                    address: address.clone(),
                    port: args.get(1).filter(|port| !port.is_empty()).cloned(),
                }),
                _ => self
                    .errors
                    .push(format!("--{name} option requires 1 or 2 arguments")),
            },
            Family::Device => match args {
                [id, driver, port, rest @ ..] if rest.len() <= 1 => self.devices.push(DeviceSpec {
                    id: id.clone(),
                    driver: driver.clone(),
                    port: port.clone(),
                    description: rest.first().filter(|desc| !desc.is_empty()).cloned(),
                }),
                [_, _, _, ..] => {
                    self.errors
                        .push(format!("--{name} option takes at most 4 arguments"));
                    self.errors
                        .push("    (perhaps you need to quote description?)".to_string());
                }
                _ => self
                    .errors
                    .push(format!("--{name} option requires at least 3 arguments")),
            },
        }
    }

    const fn counts_mut(&mut self, family: Family) -> &mut VariantCounts {
        match family {
            Family::Monitor => &mut self.monitor_counts,
            Family::Listen => &mut self.listen_counts,
            Family::Device => &mut self.device_counts,
        }
    }

    /// Returns `true` if there were no unknown options, no option errors,
    /// no stray arguments and no set/add conflicts.
    #[must_use]
    pub const fn valid(&self) -> bool {
        self.valid
    }

    /// `--help` (or `-help`) was given.
    ///
    /// Independent of [`valid`](Self::valid): help wins over any other problem.
    #[must_use]
    pub const fn help(&self) -> bool {
        self.help
    }

    /// `--autoconfigure` was given.
    #[must_use]
    pub const fn autoconfigure(&self) -> bool {
        self.autoconfigure
    }

    /// `--is-configured` was given.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.is_configured
    }

    /// `--system` was given.
    #[must_use]
    pub const fn system(&self) -> bool {
        self.system
    }

    /// `--local` directory, if validly given.
    #[must_use]
    pub fn local(&self) -> Option<&str> {
        self.local.as_deref()
    }

    /// `--mode` value, if validly given.
    #[must_use]
    pub const fn mode(&self) -> Option<NutMode> {
        self.mode
    }

    /// Number of validated monitor specifications.
    #[must_use]
    pub fn monitor_count(&self) -> usize {
        self.monitors.len() / MONITOR_FIELDS
    }

    /// Returns the `index`-th monitor specification.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::MonitorIndex`] if `index >= monitor_count()`.
    pub fn monitor(&self, index: usize) -> Result<MonitorSpec<'_>, OptionsError> {
        let count = self.monitor_count();

        if index >= count {
            return Err(OptionsError::MonitorIndex { index, count });
        }

        let base = index * MONITOR_FIELDS;

        Ok(MonitorSpec::from_fields(
            &self.monitors[base..base + MONITOR_FIELDS],
        ))
    }

    /// Iterates over all validated monitor specifications, in order.
    pub fn monitors(&self) -> impl Iterator<Item = MonitorSpec<'_>> {
        self.monitors
            .chunks_exact(MONITOR_FIELDS)
            .map(MonitorSpec::from_fields)
    }

    /// Validated listen addresses, in order.
    #[must_use]
    pub fn listen_addrs(&self) -> &[ListenSpec] {
        &self.listen_addrs
    }

    /// Validated devices, in order.
    #[must_use]
    pub fn devices(&self) -> &[DeviceSpec] {
        &self.devices
    }

    /// Occurrence counters of `family`.
    #[must_use]
    pub const fn counts(&self, family: Family) -> VariantCounts {
        match family {
            Family::Monitor => self.monitor_counts,
            Family::Listen => self.listen_counts,
            Family::Device => self.device_counts,
        }
    }

    /// Whether existing entries of `family` are kept (the "add" variant was used).
    #[must_use]
    pub const fn keep_existing(&self, family: Family) -> bool {
        self.counts(family).add > 0
    }

    /// Unknown options, with their dashes.
    #[must_use]
    pub fn unknown(&self) -> &[String] {
        &self.unknown
    }

    /// Option error messages.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Arguments attached to no option.
    #[must_use]
    pub fn free_arguments(&self) -> &[String] {
        &self.free
    }

    /// All problems: unknown options, then option errors, then stray arguments.
    pub fn diagnostics(&self) -> impl Iterator<Item = Diagnostic<'_>> {
        let unknown = self.unknown.iter().map(|o| Diagnostic::UnknownOption(o));
        let errors = self.errors.iter().map(|e| Diagnostic::OptionError(e));
        let free = self.free.iter().map(|a| Diagnostic::UnexpectedArgument(a));

        unknown.chain(errors).chain(free)
    }
}
