//! Verdict CLI Library
//!
//! Command-line host for the Verdict reporter: loads the serialized root
//! suites of a finished run and writes a JUnit report or a summary.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)] // String building is clear and correct
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;

pub use commands::{Cli, ColorArg, Commands, JunitArgs, SummaryArgs, SummaryFormat};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{render_summary_json, render_summary_text, SessionRow};
