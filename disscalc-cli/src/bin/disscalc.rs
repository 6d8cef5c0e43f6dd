use std::{env, io::ErrorKind, process::ExitCode};

use disscalc_cli::CliError;

fn main() -> ExitCode {
    env_logger::init();

    match disscalc_cli::run_in_shell_env(env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        // Happens when the consumer of stdout, e.g. `head`, exits before the table is complete. The table can be recomputed at any time.
        Err(CliError::IoError(err)) if err.kind() == ErrorKind::BrokenPipe => {
            log::warn!("Output closed early: {err}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
