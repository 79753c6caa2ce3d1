//! JUnit command handler

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::JunitArgs;
use tracing::info;
use verdict::{JunitConfig, JunitReporter, SuiteData};

/// Execute the junit command
pub fn execute_junit(config: &CliConfig, args: &JunitArgs) -> CliResult<()> {
    if args.output.as_deref() == Some(args.input.as_path()) {
        return Err(CliError::invalid_argument(
            "output would overwrite the input results",
        ));
    }

    let suites = SuiteData::load(&args.input)?;
    info!(input = %args.input.display(), roots = suites.len(), "loaded results");

    let junit_config = args
        .output
        .as_ref()
        .map_or_else(JunitConfig::new, |path| JunitConfig::new().with_filename(path));
    let mut reporter = JunitReporter::from_config(&junit_config)?;
    let roots: Vec<&SuiteData> = suites.iter().collect();
    reporter.run_end(&roots)?;

    if let Some(path) = &args.output {
        if !config.verbosity.is_quiet() {
            eprintln!("Report generated at: {}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const RESULTS: &str = r#"[{
        "name": "chrome",
        "sessionId": "s1",
        "timeElapsed": 1234,
        "tests": [{ "name": "t1", "hasPassed": true, "timeElapsed": 45 }]
    }]"#;

    #[test]
    fn test_writes_report_into_new_directory() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("results.json");
        fs::write(&input, RESULTS).unwrap();
        let output = dir.path().join("reports/junit.xml");

        let args = JunitArgs {
            input,
            output: Some(output.clone()),
        };
        execute_junit(&CliConfig::new(), &args).unwrap();

        let xml = fs::read_to_string(output).unwrap();
        assert!(xml.contains(r#"<testcase name="t1" time="0.045" status="0"/>"#));
    }

    #[test]
    fn test_refuses_to_overwrite_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("results.json");
        let args = JunitArgs {
            input: input.clone(),
            output: Some(input),
        };
        let err = execute_junit(&CliConfig::new(), &args).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument { .. }));
    }

    #[test]
    fn test_missing_input() {
        let args = JunitArgs {
            input: "/nonexistent/results.json".into(),
            output: None,
        };
        assert!(execute_junit(&CliConfig::new(), &args).is_err());
    }
}
