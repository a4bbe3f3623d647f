//! Generic multi-value command-line option store.
//!
//! Tokenizes an argument vector into single-dash options, double-dash options
//! and free arguments. Every option occurrence owns its own argument list, so
//! the same option may be given several times with independent arguments.

use std::collections::BTreeMap;

/// Arguments attached to one option occurrence (or the free arguments).
pub type Arguments = Vec<String>;

/// Option name to its occurrences, in command-line order.
type OptionMap = BTreeMap<String, Vec<Arguments>>;

/// Option prefix style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dash {
    /// `-name`
    Single,
    /// `--name`
    Double,
}

impl Dash {
    /// Returns the prefix as written on the command line.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Single => "-",
            Self::Double => "--",
        }
    }
}

/// Classification of a single command-line token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Argument of the currently open option (or a free argument).
    Argument(&'a str),
    /// Opens a new option with the given name.
    Option(Dash, &'a str),
    /// Bare `--`: closes the open option.
    Separator,
}

impl<'a> Token<'a> {
    /// Classifies a raw token.
    ///
    /// - empty, `-`, and anything not starting with `-` are arguments
    /// - `-x...` opens a single-dash option
    /// - `--` alone is a separator
    /// - `--x...` opens a double-dash option
    /// - three or more leading dashes make a literal argument
    #[must_use]
    pub fn classify(raw: &'a str) -> Self {
        let bytes = raw.as_bytes();

        if bytes.len() < 2 || bytes[0] != b'-' {
            return Self::Argument(raw);
        }

        if bytes[1] != b'-' {
            return Self::Option(Dash::Single, &raw[1..]);
        }

        match bytes.get(2) {
            None => Self::Separator,
            Some(b'-') => Self::Argument(raw),
            Some(_) => Self::Option(Dash::Double, &raw[2..]),
        }
    }
}

/// Immutable store of parsed command-line options.
///
/// # Example
///
/// ```
/// use nutconf::options::{Dash, OptionStore};
///
/// let store = OptionStore::parse(["--opt", "a", "b", "--opt", "x", "--", "free"]);
///
/// assert_eq!(store.count(Dash::Double, "opt"), 2);
/// assert_eq!(store.get(Dash::Double, "opt", 1), Some(&["x".to_string()][..]));
/// assert_eq!(store.free_arguments(), ["free"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionStore {
    single: OptionMap,
    double: OptionMap,
    free: Arguments,
}

impl OptionStore {
    /// Builds the store from tokens that exclude the program name.
    pub fn parse<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut store = Self::default();
        let mut open: Option<(Dash, String)> = None;

        for raw in tokens {
            match Token::classify(raw.as_ref()) {
                Token::Argument(arg) => store.push_argument(open.as_ref(), arg),
                Token::Option(dash, name) => {
                    store.map_mut(dash).entry(name.to_string()).or_default().push(Vec::new());
                    open = Some((dash, name.to_string()));
                }
                Token::Separator => open = None,
            }
        }

        store
    }

    /// Builds the store from the process arguments, skipping the program name.
    ///
    /// Non-UTF-8 arguments are converted lossily.
    #[must_use]
    pub fn from_env() -> Self {
        Self::parse(
            std::env::args_os()
                .skip(1)
                .map(|arg| arg.to_string_lossy().into_owned()),
        )
    }

    fn push_argument(&mut self, open: Option<&(Dash, String)>, arg: &str) {
        let target = match open {
            Some((dash, name)) => self
                .map_mut(*dash)
                .get_mut(name)
                .and_then(|occurrences| occurrences.last_mut()),
            None => None,
        };

        match target {
            Some(args) => args.push(arg.to_string()),
            None => self.free.push(arg.to_string()),
        }
    }

    const fn map(&self, dash: Dash) -> &OptionMap {
        match dash {
            Dash::Single => &self.single,
            Dash::Double => &self.double,
        }
    }

    const fn map_mut(&mut self, dash: Dash) -> &mut OptionMap {
        match dash {
            Dash::Single => &mut self.single,
            Dash::Double => &mut self.double,
        }
    }

    /// Number of occurrences of `name` in the given bucket.
    #[must_use]
    pub fn count(&self, dash: Dash, name: &str) -> usize {
        self.map(dash).get(name).map_or(0, Vec::len)
    }

    /// Number of occurrences of `name`, single- and double-dash combined.
    #[must_use]
    pub fn count_any(&self, name: &str) -> usize {
        self.count(Dash::Single, name) + self.count(Dash::Double, name)
    }

    /// Returns `true` if `name` was given at least once in the given bucket.
    #[must_use]
    pub fn exists(&self, dash: Dash, name: &str) -> bool {
        self.count(dash, name) > 0
    }

    /// Returns `true` if `name` was given with either prefix.
    #[must_use]
    pub fn exists_any(&self, name: &str) -> bool {
        self.count_any(name) > 0
    }

    /// Arguments of the `order`-th (0-based) occurrence of `name`.
    ///
    /// Returns `None` if fewer than `order + 1` occurrences exist.
    #[must_use]
    pub fn get(&self, dash: Dash, name: &str, order: usize) -> Option<&[String]> {
        self.map(dash)
            .get(name)
            .and_then(|occurrences| occurrences.get(order))
            .map(Vec::as_slice)
    }

    /// Distinct option names seen in the given bucket, sorted.
    pub fn names(&self, dash: Dash) -> impl Iterator<Item = &str> {
        self.map(dash).keys().map(String::as_str)
    }

    /// Arguments attached to no option.
    #[must_use]
    pub fn free_arguments(&self) -> &[String] {
        &self.free
    }

    /// Total number of option occurrences plus their arguments, per bucket.
    ///
    /// Used to check that no token is lost during tokenization.
    #[cfg(test)]
    pub(crate) fn token_count(&self, dash: Dash) -> usize {
        self.map(dash)
            .values()
            .flatten()
            .map(|args| 1 + args.len())
            .sum()
    }
}
