//! Summary formatting

use console::style;
use serde::Serialize;
use verdict::{SuiteSummary, SuiteView};

/// Totals of one root suite, as printed by `verdict summary`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRow {
    /// Root suite name
    pub name: String,
    /// Session the root suite came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Counted tests
    pub tests: usize,
    /// Own failures
    pub failures: usize,
    /// Skipped tests
    pub skipped: usize,
    /// Passed tests
    pub passed: usize,
}

impl SessionRow {
    /// Compute the row for a root suite
    #[must_use]
    pub fn of<S: SuiteView>(suite: &S) -> Self {
        let SuiteSummary {
            tests,
            failures,
            skipped,
            passed,
        } = SuiteSummary::of(suite);
        Self {
            name: suite.name().to_string(),
            session_id: suite.session_id().map(str::to_string),
            tests,
            failures,
            skipped,
            passed,
        }
    }
}

/// Render rows as text, one line per session
#[must_use]
pub fn render_summary_text(rows: &[SessionRow], use_color: bool) -> String {
    let mut out = String::new();
    for row in rows {
        let failures = format!("{} failed", row.failures);
        let failures = if !use_color {
            failures
        } else if row.failures > 0 {
            style(failures).red().bold().to_string()
        } else {
            style(failures).green().to_string()
        };
        let name = if use_color {
            style(&row.name).bold().to_string()
        } else {
            row.name.clone()
        };
        out.push_str(&format!(
            "{name}: {} tests, {failures}, {} skipped, {} passed\n",
            row.tests, row.skipped, row.passed
        ));
    }
    out
}

/// Render rows as a JSON array
///
/// # Errors
///
/// Returns error if serialization fails
pub fn render_summary_json(rows: &[SessionRow]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}
