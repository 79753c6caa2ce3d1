//! Summary command handler

use crate::commands::SummaryFormat;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{render_summary_json, render_summary_text, SessionRow};
use crate::SummaryArgs;
use verdict::SuiteData;

/// Compute the per-session rows for a results file
pub fn summarize(args: &SummaryArgs) -> CliResult<Vec<SessionRow>> {
    let suites = SuiteData::load(&args.input)?;
    Ok(suites.iter().map(|suite| SessionRow::of(&suite)).collect())
}

/// Execute the summary command
pub fn execute_summary(config: &CliConfig, args: &SummaryArgs) -> CliResult<()> {
    let rows = summarize(args)?;
    match args.format {
        SummaryFormat::Text => print!("{}", render_summary_text(&rows, config.color.should_color())),
        SummaryFormat::Json => println!("{}", render_summary_json(&rows)?),
    }
    Ok(())
}
