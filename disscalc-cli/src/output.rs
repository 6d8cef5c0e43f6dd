use std::{
    fmt::{self, Display},
    fs::File,
    io::{self, BufWriter, Write},
};

use crate::{
    options::{OptionError, OptionErrorKind},
    CliError, CliResult,
};

/// Start of every error line.
pub const ERROR_HEADER: &str = "disscalc error: ";

pub const USAGE: &str = "\
Compute the sensory dissonance curve of a timbre.

Usage:
  disscalc [-h|--help] [-o FILE|--output=FILE] [-f FMT|--format=FMT]
           [-s N|--start=N] [-d N|--delta=N] [-e N|--end=N]
           [-x N...] -p N... -a N... [-P N...] [-A N...]

Options:
  -h, --help           Print this message and exit
  -o, --output=FILE    Write the table to FILE instead of stdout
  -f, --format=FMT     Table format, csv (default) or tsv
  -s, --start=N        First interval of the sweep [default: 1]
  -d, --delta=N        Step between two intervals of the sweep [default: 0.01]
  -e, --end=N          Last interval of the sweep, inclusive [default: 2]
  -x N...              Extra intervals to evaluate in addition to the sweep
  -p N...              Frequencies of the partials
  -a N...              Amplitudes of the partials, one per frequency
  -P N...              Frequencies of the raised partials [default: same as -p]
  -A N...              Amplitudes of the raised partials [default: same as -a]

Short flags take all following arguments up to the next flag as values, e.g. -p 440 880 1320.
Long flags take a single value attached with '=', e.g. --start=1.5.
Negative numbers with a single digit, e.g. -1, look like flags and have to be written as -1.0.
";

impl Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ERROR_HEADER}")?;
        match self.kind {
            OptionErrorKind::UnknownFlag => write!(f, "unrecognized flag: {:?}", self.text),
            OptionErrorKind::InvalidNumber => write!(f, "not a valid number: {:?}", self.text),
            OptionErrorKind::MissingValue => write!(f, "no value provided for {:?}", self.text),
            OptionErrorKind::TooManyValues => {
                write!(f, "too many values provided for {:?}", self.text)
            }
            OptionErrorKind::NotPositive => write!(f, "{} must be greater than zero", self.text),
            OptionErrorKind::ListNotPositive => {
                write!(f, "{} must all be greater than zero", self.text)
            }
            OptionErrorKind::Generic => write!(f, "{}", self.text),
        }
    }
}

/// Opens the table destination: the file `file_name`, if given, or stdout otherwise.
pub fn open_output(file_name: Option<&str>) -> CliResult<Box<dyn Write>> {
    Ok(match file_name {
        Some(file_name) => {
            let file = File::create(file_name).map_err(|source| CliError::OutputFile {
                path: file_name.to_owned(),
                source,
            })?;
            log::info!("Writing table to {file_name}");
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}
