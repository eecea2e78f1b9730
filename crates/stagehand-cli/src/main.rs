//! Stagehand CLI - scene scaffolding for the Stagehand framework.
//!
//! Main entry point for the `stagehand` binary.

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod error;
mod prompts;
mod tools;

use cli::Cli;
use error::CliError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Cancelled) => {
            eprintln!("Aborted.");
            ExitCode::from(CliError::Cancelled.exit_code())
        }
        Err(error) => {
            print_error(&error);
            ExitCode::from(error.exit_code())
        }
    }
}

fn print_error(error: &CliError) {
    eprintln!("{} {error}", console::style("error:").red().bold());
    if let Some(hint) = error.hint() {
        eprintln!("{} {hint}", console::style("hint:").yellow().bold());
    }
}

fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match cli.verbose {
        0 if cli.quiet => EnvFilter::new("error"),
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(cli.verbose >= 2))
        .init();
}
