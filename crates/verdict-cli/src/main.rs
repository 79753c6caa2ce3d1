//! Verdict CLI: reports from recorded test results
//!
//! ## Usage
//!
//! ```bash
//! verdict junit results.json -o reports/junit.xml   # Write a JUnit report
//! verdict junit results.json > junit.xml            # Report to stdout
//! verdict summary results.json --format json        # Per-session totals
//! ```

use clap::Parser;
use std::process::ExitCode;
use verdict_cli::{
    handlers::{execute_junit, execute_summary},
    Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli);
    config.init_tracing();

    match &cli.command {
        Commands::Junit(args) => execute_junit(&config, args),
        Commands::Summary(args) => execute_summary(&config, args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let color: ColorChoice = cli.color.clone().into();
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(color)
}
