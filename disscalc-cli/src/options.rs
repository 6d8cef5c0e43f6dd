//! Conversion of command-line arguments into a validated program configuration.
//!
//! Errors are collected instead of returned early so that every mistake on the command line can be reported at once.

use disscalc::{
    dissonance::{Partial, Timbre},
    table::Sweep,
};

use crate::args::{self, ParsedOption};

/// Error caused by an invalid command-line option.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OptionError {
    /// Text of the argument causing the error or a description of the affected setting.
    pub text: String,
    pub kind: OptionErrorKind,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OptionErrorKind {
    /// Argument not recognized in its context.
    UnknownFlag,

    /// Incorrectly formatted number.
    InvalidNumber,

    /// No value provided for a flag expecting one.
    MissingValue,

    /// More than one value provided for a flag expecting one.
    TooManyValues,

    /// A single value is not positive and should be.
    NotPositive,

    /// Not all values of a list are positive.
    ListNotPositive,

    /// Miscellaneous errors.
    Generic,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Flag {
    Help,
    Output,
    Format,
    Start,
    Delta,
    End,
    StableFrequencies,
    StableAmplitudes,
    MobileFrequencies,
    MobileAmplitudes,
    ExtraIntervals,
}

impl Flag {
    fn from_spelling(flag: &str) -> Option<Self> {
        Some(match flag {
            "--help" | "-h" => Flag::Help,
            "--output" | "-o" => Flag::Output,
            "--format" | "-f" => Flag::Format,
            "--start" | "-s" => Flag::Start,
            "--delta" | "-d" => Flag::Delta,
            "--end" | "-e" => Flag::End,
            "-p" => Flag::StableFrequencies,
            "-a" => Flag::StableAmplitudes,
            "-P" => Flag::MobileFrequencies,
            "-A" => Flag::MobileAmplitudes,
            "-x" => Flag::ExtraIntervals,
            _ => return None,
        })
    }
}

/// Values of all program options.
///
/// Unless [`ProgramOptions::is_valid`] returns `true`, only [`ProgramOptions::should_show_help`] and
/// [`ProgramOptions::errors`] carry meaningful information.
#[derive(Clone, Debug)]
pub struct ProgramOptions {
    show_help: bool,

    output_file_name: Option<String>,
    format: Option<String>,

    start: f64,
    delta: f64,
    end: f64,

    stable_frequencies: Vec<f64>,
    stable_amplitudes: Vec<f64>,
    mobile_frequencies: Vec<f64>,
    mobile_amplitudes: Vec<f64>,

    extra_intervals: Vec<f64>,

    errors: Vec<OptionError>,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            show_help: false,
            output_file_name: None,
            format: None,
            start: 1.0,
            delta: 0.01,
            end: 2.0,
            stable_frequencies: Vec::new(),
            stable_amplitudes: Vec::new(),
            mobile_frequencies: Vec::new(),
            mobile_amplitudes: Vec::new(),
            extra_intervals: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl ProgramOptions {
    /// Parses the command-line arguments `args`, excluding the program name.
    ///
    /// The semantic validation only runs if all arguments could be parsed successfully.
    ///
    /// # Examples
    ///
    /// ```
    /// # use disscalc_cli::options::ProgramOptions;
    /// let options = ProgramOptions::parse(&["-p", "440", "880", "-a", "1", "0.5", "--end=1.5"]);
    ///
    /// assert!(options.is_valid());
    /// assert_eq!(options.end(), 1.5);
    /// assert_eq!(options.stable_partials().len(), 2);
    /// ```
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        let mut options = Self::default();

        for parsed_option in args::tokenize(args) {
            options.apply_option(&parsed_option);
        }

        options.extra_intervals.sort_by(f64::total_cmp);
        options.extra_intervals.dedup();

        if options.errors.is_empty() {
            options.validate();
        }

        log::debug!("Parsed program options: {options:?}");

        options
    }

    fn apply_option(&mut self, parsed_option: &ParsedOption) {
        let flag = match Flag::from_spelling(parsed_option.flag) {
            Some(flag) if !parsed_option.invalid => flag,
            _ => {
                self.push_error(parsed_option.flag, OptionErrorKind::UnknownFlag);
                return;
            }
        };

        match flag {
            Flag::Help => self.show_help = true,
            Flag::Output => {
                if let Some(value) = self.single_value(parsed_option) {
                    self.output_file_name = Some(value.to_owned());
                }
            }
            Flag::Format => {
                if let Some(value) = self.single_value(parsed_option) {
                    self.format = Some(value.to_owned());
                }
            }
            Flag::Start => {
                if let Some(value) = self.single_float(parsed_option) {
                    self.start = value;
                }
            }
            Flag::Delta => {
                if let Some(value) = self.single_float(parsed_option) {
                    self.delta = value;
                }
            }
            Flag::End => {
                if let Some(value) = self.single_float(parsed_option) {
                    self.end = value;
                }
            }
            Flag::StableFrequencies => {
                let values = self.floats(parsed_option);
                self.stable_frequencies.extend(values);
            }
            Flag::StableAmplitudes => {
                let values = self.floats(parsed_option);
                self.stable_amplitudes.extend(values);
            }
            Flag::MobileFrequencies => {
                let values = self.floats(parsed_option);
                self.mobile_frequencies.extend(values);
            }
            Flag::MobileAmplitudes => {
                let values = self.floats(parsed_option);
                self.mobile_amplitudes.extend(values);
            }
            Flag::ExtraIntervals => {
                let values = self.floats(parsed_option);
                self.extra_intervals.extend(values);
            }
        }
    }

    fn single_value<'a>(&mut self, parsed_option: &ParsedOption<'a>) -> Option<&'a str> {
        match parsed_option.values[..] {
            [value] => Some(value),
            [] => {
                self.push_error(parsed_option.flag, OptionErrorKind::MissingValue);
                None
            }
            _ => {
                self.push_error(parsed_option.flag, OptionErrorKind::TooManyValues);
                None
            }
        }
    }

    fn single_float(&mut self, parsed_option: &ParsedOption) -> Option<f64> {
        let value = self.single_value(parsed_option)?;
        self.parse_float(value)
    }

    fn floats(&mut self, parsed_option: &ParsedOption) -> Vec<f64> {
        parsed_option
            .values
            .iter()
            .filter_map(|value| self.parse_float(value))
            .collect()
    }

    fn parse_float(&mut self, text: &str) -> Option<f64> {
        match text.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                self.push_error(text, OptionErrorKind::InvalidNumber);
                None
            }
        }
    }

    fn validate(&mut self) {
        if let Some(format) = &self.format {
            if format != "csv" && format != "tsv" {
                self.push_error("format must be csv or tsv", OptionErrorKind::Generic);
            }
        }

        self.check_finite("start", self.start);
        for (description, value) in [("delta", self.delta), ("end interval", self.end)] {
            if is_positive(value) {
                self.check_finite(description, value);
            } else {
                self.push_error(description, OptionErrorKind::NotPositive);
            }
        }

        let lists = [
            ("frequencies", &self.stable_frequencies),
            ("amplitudes", &self.stable_amplitudes),
            ("mobile frequencies", &self.mobile_frequencies),
            ("mobile amplitudes", &self.mobile_amplitudes),
            ("extra intervals", &self.extra_intervals),
        ];
        let non_positive_lists = lists
            .into_iter()
            .filter(|(_, values)| !values.iter().copied().all(is_positive))
            .map(|(description, _)| description)
            .collect::<Vec<_>>();
        for description in non_positive_lists {
            self.push_error(description, OptionErrorKind::ListNotPositive);
        }

        if self.stable_frequencies.len() != self.stable_amplitudes.len() {
            self.push_error(
                "frequencies and amplitudes must be the same size",
                OptionErrorKind::Generic,
            );
        }
        if self.mobile_frequencies.len() != self.mobile_amplitudes.len() {
            self.push_error(
                "mobile frequencies and mobile amplitudes must be the same size",
                OptionErrorKind::Generic,
            );
        }
    }

    fn check_finite(&mut self, description: &str, value: f64) {
        if !value.is_finite() {
            self.push_error(
                format!("{description} must be finite"),
                OptionErrorKind::Generic,
            );
        }
    }

    fn push_error(&mut self, text: impl Into<String>, kind: OptionErrorKind) {
        self.errors.push(OptionError {
            text: text.into(),
            kind,
        });
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[OptionError] {
        &self.errors
    }

    pub fn should_show_help(&self) -> bool {
        self.show_help
    }

    pub fn output_file_name(&self) -> Option<&str> {
        self.output_file_name.as_deref()
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Returns the range of intervals to evaluate.
    ///
    /// # Panics
    ///
    /// Panics if `delta` is invalid, i.e. if called on options that did not pass validation.
    pub fn sweep(&self) -> Sweep {
        Sweep::new(self.start, self.delta, self.end)
    }

    pub fn stable_frequencies(&self) -> &[f64] {
        &self.stable_frequencies
    }

    pub fn stable_amplitudes(&self) -> &[f64] {
        &self.stable_amplitudes
    }

    pub fn mobile_frequencies(&self) -> &[f64] {
        &self.mobile_frequencies
    }

    pub fn mobile_amplitudes(&self) -> &[f64] {
        &self.mobile_amplitudes
    }

    /// Combines the stable frequencies and amplitudes into partials.
    pub fn stable_partials(&self) -> Vec<Partial> {
        Partial::zip(&self.stable_frequencies, &self.stable_amplitudes)
    }

    /// Combines the mobile frequencies and amplitudes into partials, falling back to the stable partials if no mobile
    /// partials were given.
    pub fn mobile_partials(&self) -> Vec<Partial> {
        if self.mobile_frequencies.is_empty() && self.mobile_amplitudes.is_empty() {
            self.stable_partials()
        } else {
            Partial::zip(&self.mobile_frequencies, &self.mobile_amplitudes)
        }
    }

    pub fn timbre(&self) -> Timbre {
        Timbre::new(self.stable_partials(), self.mobile_partials())
    }

    /// Extra intervals in ascending order without duplicates.
    pub fn extra_intervals(&self) -> &[f64] {
        &self.extra_intervals
    }

    /// Returns the delimiter for the DSV table output.
    pub fn delimiter(&self) -> char {
        match self.format() {
            Some("tsv") => '\t',
            _ => ',',
        }
    }
}

fn is_positive(value: f64) -> bool {
    value > 0.0
}
