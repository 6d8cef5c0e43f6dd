pub mod args;
pub mod options;
pub mod output;

use std::{
    fmt::{self, Display},
    io::{self, Write},
};

use disscalc::table;
use options::{OptionError, ProgramOptions};

/// Runs the program with the given command-line arguments, the first of which is the program name.
pub fn run_in_shell_env(args: impl IntoIterator<Item = String>) -> CliResult<()> {
    let args = args.into_iter().skip(1).collect::<Vec<_>>();
    let options = ProgramOptions::parse(&args);

    if options.should_show_help() {
        if !options.is_valid() {
            log::warn!(
                "Ignoring {} invalid option(s) since help was requested",
                options.errors().len()
            );
        }
        io::stdout().lock().write_all(output::USAGE.as_bytes())?;
        return Ok(());
    }

    if !options.is_valid() {
        return Err(CliError::InvalidOptions(options.errors().to_vec()));
    }

    let output = output::open_output(options.output_file_name())?;
    print_table(&options, output)
}

/// Writes the dissonance table described by `options` to `output`.
pub fn print_table(options: &ProgramOptions, mut output: impl Write) -> CliResult<()> {
    let timbre = options.timbre();
    if timbre.stable().is_empty() || timbre.mobile().is_empty() {
        log::warn!("No partials given, all dissonance values will be zero");
    }

    let num_rows = table::write_table(
        &mut output,
        options.sweep(),
        options.extra_intervals(),
        options.delimiter(),
        |interval| timbre.dissonance_at(interval),
    )?;
    output.flush()?;

    log::info!("Wrote {num_rows} rows");
    Ok(())
}

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub enum CliError {
    InvalidOptions(Vec<OptionError>),
    OutputFile { path: String, source: io::Error },
    IoError(io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidOptions(_) => 1,
            CliError::OutputFile { .. } => 2,
            CliError::IoError(_) => 3,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidOptions(errors) => {
                let mut lines = errors.iter();
                if let Some(first) = lines.next() {
                    write!(f, "{first}")?;
                }
                for error in lines {
                    write!(f, "\n{error}")?;
                }
                Ok(())
            }
            CliError::OutputFile { path, source } => write!(
                f,
                "{}could not open output file {path:?}: {source}",
                output::ERROR_HEADER
            ),
            CliError::IoError(err) => write!(f, "{}{err}", output::ERROR_HEADER),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(v: io::Error) -> Self {
        CliError::IoError(v)
    }
}
