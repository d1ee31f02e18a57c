//! wincheck: date-window checks and timestamp conversion from the command line.

use clap::Parser;

mod cli;
mod commands;
mod logging;

use crate::cli::{Cli, Command};
use crate::commands::{load_settings, run_rules, run_to_absolute, run_to_local, run_validate};
use crate::logging::{init_logging, LogConfig};

/// Exit code when a snapshot has violations or format errors.
const EXIT_INVALID: i32 = 1;
/// Exit code for unreadable input or bad arguments.
const EXIT_FAILURE: i32 = 2;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(&LogConfig::from_verbosity(cli.verbose)) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_FAILURE);
    }

    let exit_code = match run(&cli) {
        Ok(true) => EXIT_INVALID,
        Ok(false) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            EXIT_FAILURE
        }
    };
    std::process::exit(exit_code);
}

/// Returns `true` when the command found invalid dates.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let settings = load_settings(cli.config.as_deref(), cli.offset.as_deref())?;
    match &cli.command {
        Command::Validate(args) => {
            run_validate(args.content_type, args.input.as_deref(), &settings)
        }
        Command::ToAbsolute { local } => run_to_absolute(local, &settings).map(|()| false),
        Command::ToLocal { absolute } => run_to_local(absolute, &settings).map(|()| false),
        Command::Rules { content_type } => run_rules(*content_type).map(|()| false),
    }
}
