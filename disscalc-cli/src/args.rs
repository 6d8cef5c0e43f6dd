//! Splitting of raw command-line arguments into flags and their values.
//!
//! Terminology:
//! - An *argument* is a single raw string passed to the program.
//! - A *flag* is an argument starting with one or two dashes, e.g. `-p` or `--start=1.5`.
//! - A *value* belongs to a flag, e.g. `value` in `-k value` or `--key=value`.
//! - An *option* is a flag together with all of its values.
//!
//! Short flags (`-k`) take all following arguments up to the next flag as their values. Long flags (`--key` or
//! `--key=value`) take at most one value which must be attached with `=`. Arguments that do not belong to any flag are
//! reported as invalid options.

/// A single flag occurrence and the values following it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedOption<'a> {
    /// Name of the flag including its dashes, e.g. `-k` in `-k value` or `--key` in `--key=value`.
    pub flag: &'a str,

    /// Values listed after the flag, e.g. `1` and `2` in `-a 1 2`.
    pub values: Vec<&'a str>,

    /// Set if `flag` is not formatted as a flag at all.
    pub invalid: bool,
}

impl<'a> ParsedOption<'a> {
    fn valid(flag: &'a str, values: Vec<&'a str>) -> Self {
        Self {
            flag,
            values,
            invalid: false,
        }
    }

    fn invalid(flag: &'a str) -> Self {
        Self {
            flag,
            values: Vec::new(),
            invalid: true,
        }
    }
}

pub fn is_long_flag(arg: &str) -> bool {
    arg.starts_with("--")
}

pub fn is_short_flag(arg: &str) -> bool {
    let mut chars = arg.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some('-'), Some(name), None) if name != '-'
    )
}

pub fn is_flag(arg: &str) -> bool {
    is_long_flag(arg) || is_short_flag(arg)
}

/// Splits `args` into [`ParsedOption`]s, one per flag occurrence.
///
/// # Examples
///
/// ```
/// # use disscalc_cli::args;
/// let options = args::tokenize(&["-p", "1", "2", "--end=3"]).collect::<Vec<_>>();
///
/// assert_eq!(options[0].flag, "-p");
/// assert_eq!(options[0].values, ["1", "2"]);
/// assert_eq!(options[1].flag, "--end");
/// assert_eq!(options[1].values, ["3"]);
/// ```
pub fn tokenize<S: AsRef<str>>(args: &[S]) -> Tokens<'_, S> {
    Tokens { args }
}

/// Iterator returned by [`tokenize`].
pub struct Tokens<'a, S> {
    args: &'a [S],
}

impl<'a, S: AsRef<str>> Tokens<'a, S> {
    fn extract_values(&mut self) -> Vec<&'a str> {
        let num_values = self
            .args
            .iter()
            .position(|arg| is_flag(arg.as_ref()))
            .unwrap_or(self.args.len());

        let (values, rest) = self.args.split_at(num_values);
        self.args = rest;

        values.iter().map(|value| value.as_ref()).collect()
    }
}

impl<'a, S: AsRef<str>> Iterator for Tokens<'a, S> {
    type Item = ParsedOption<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (current, rest) = self.args.split_first()?;
        self.args = rest;

        let current = current.as_ref();

        Some(if is_long_flag(current) {
            parse_long_option(current)
        } else if is_short_flag(current) {
            ParsedOption::valid(current, self.extract_values())
        } else {
            ParsedOption::invalid(current)
        })
    }
}

fn parse_long_option(arg: &str) -> ParsedOption<'_> {
    match arg.split_once('=') {
        Some((flag, value)) => ParsedOption::valid(flag, vec![value]),
        None => ParsedOption::valid(arg, Vec::new()),
    }
}
