//! JUnit XML reporter.
//!
//! Walks root suites and writes one `<testsuite>` per suite, nested in the
//! order the executor recorded them:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8" ?><testsuites>
//!   <testsuite name failures skipped tests time>
//!     (<error>|<failure>) | <testsuite>... | <testcase name time status>...
//!   </testsuite>
//! </testsuites>\n
//! ```
//!
//! (whitespace added for reading; the document has none).
//!
//! Counts, times and statuses are derived while rendering. A suite failing in
//! `before`/`after` (or outside any hook) renders its error and nothing else.
//! A suite failing in `beforeEach`/`afterEach` renders no error of its own;
//! each test shows the inherited error instead, and those tests are not
//! counted as failures.

use crate::config::JunitConfig;
use crate::model::{Cascade, TestError};
use crate::output::{ReportOutput, ReportSink};
use crate::result::{VerdictError, VerdictResult};
use crate::view::{Child, SuiteView, TestView};
use std::io;
use tracing::{debug, info};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>"#;

/// Reporter writing a JUnit XML document to its configured output
pub struct JunitReporter {
    sink: Box<dyn ReportSink + Send>,
    ended: bool,
}

impl std::fmt::Debug for JunitReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JunitReporter")
            .field("ended", &self.ended)
            .finish_non_exhaustive()
    }
}

impl JunitReporter {
    /// Create a reporter for the given output.
    ///
    /// A file output has its parent directory created and is opened here, so
    /// a bad path fails before the run ends rather than after.
    ///
    /// # Errors
    ///
    /// Returns error if the output file cannot be prepared
    pub fn new(output: ReportOutput) -> VerdictResult<Self> {
        debug!(?output, "resolving junit output");
        Ok(Self {
            sink: output.open()?,
            ended: false,
        })
    }

    /// Create a reporter from configuration; without a filename the report
    /// goes to standard output
    ///
    /// # Errors
    ///
    /// Returns error if the output file cannot be prepared
    pub fn from_config(config: &JunitConfig) -> VerdictResult<Self> {
        Self::new(config.output())
    }

    /// Render the report for the finished run
    ///
    /// # Errors
    ///
    /// Returns error if the sink fails, leaving the report incomplete, or if
    /// the report was already written; the sink is closed after one run
    pub fn run_end<S: SuiteView>(&mut self, suites: &[S]) -> VerdictResult<()> {
        if self.ended {
            return Err(VerdictError::report("output was already closed by an earlier run"));
        }
        self.ended = true;
        render(suites, self.sink.as_mut())?;
        info!(suites = suites.len(), "junit report written");
        Ok(())
    }
}

/// Render `suites` as a JUnit document into `sink`
///
/// # Errors
///
/// Returns error if the sink rejects a chunk
pub fn render<S, W>(suites: &[S], sink: &mut W) -> io::Result<()>
where
    S: SuiteView,
    W: ReportSink + ?Sized,
{
    sink.write(XML_DECLARATION)?;
    sink.write("<testsuites>")?;
    for suite in suites {
        write_suite(suite, sink)?;
    }
    sink.end("</testsuites>\n")
}

/// Render `suites` into a string
#[must_use]
pub fn render_to_string<S: SuiteView>(suites: &[S]) -> String {
    let mut document = String::new();
    // Writing to a String cannot fail
    let _ = render(suites, &mut document);
    document
}

fn write_suite<S, W>(suite: &S, sink: &mut W) -> io::Result<()>
where
    S: SuiteView,
    W: ReportSink + ?Sized,
{
    sink.write(&format!(
        r#"<testsuite name="{}" failures="{}" skipped="{}" tests="{}" time="{}">"#,
        escape_attr(suite.name()),
        suite.num_failed_tests(),
        suite.num_skipped_tests(),
        suite.num_tests(),
        format_time(suite.time_elapsed()),
    ))?;

    match (suite.cascade(), suite.error()) {
        (Some(Cascade::Suite { .. }), Some(error)) => {
            sink.write(&error_element(error))?;
        }
        _ => {
            for child in suite.children() {
                match child {
                    Child::Suite(nested) => write_suite(&nested, sink)?,
                    Child::Test(test) => sink.write(&test_element(&test))?,
                }
            }
        }
    }

    sink.write("</testsuite>")
}

fn test_element<T: TestView>(test: &T) -> String {
    let status = u8::from(test.error().is_some() && test.has_passed() != Some(true));
    let open = format!(
        r#"<testcase name="{}" time="{}" status="{status}""#,
        escape_attr(test.name()),
        format_time(test.time_elapsed()),
    );

    let body = if let Some(reason) = test.skipped() {
        Some(format!("<skipped>{}</skipped>", escape_text(reason)))
    } else {
        test.error()
            .or_else(|| test.suite_error())
            .map(error_element)
    };

    match body {
        Some(body) => format!("{open}>{body}</testcase>"),
        None => format!("{open}/>"),
    }
}

fn error_element(error: &TestError) -> String {
    let tag = if error.is_assertion() {
        "failure"
    } else {
        "error"
    };
    format!(
        r#"<{tag} message="{}" type="{}">{}</{tag}>"#,
        escape_attr(&error.message),
        escape_attr(&error.name),
        escape_text(&error.message),
    )
}

/// Convert milliseconds to seconds and print them the way a JavaScript
/// number prints: shortest round-trip digits, no trailing zeros, `NaN` when
/// the time was never measured.
#[must_use]
pub fn format_time(ms: Option<f64>) -> String {
    format_number(ms.map_or(f64::NAN, |ms| ms / 1000.0))
}

/// Print a float the way ECMAScript `Number.prototype.toString` does
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value < 0.0 {
        return format!("-{}", format_number(-value));
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "1.234e0"
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let k = digits.len() as i32;
    let n = exponent + 1;

    if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let sign = if n - 1 < 0 { '-' } else { '+' };
        let magnitude = (n - 1).abs();
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{magnitude}")
        } else {
            format!("{first}.{rest}e{sign}{magnitude}")
        }
    }
}

/// Escape text for an attribute value
fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Escape text for element content
fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LifecycleMethod;
    use crate::tree::ResultTree;

    mod format_number_tests {
        use super::*;

        #[test]
        fn test_millisecond_times() {
            assert_eq!(format_time(Some(1234.0)), "1.234");
            assert_eq!(format_time(Some(45.0)), "0.045");
            assert_eq!(format_time(Some(40.0)), "0.04");
            assert_eq!(format_time(Some(2000.0)), "2");
            assert_eq!(format_time(Some(0.0)), "0");
        }

        #[test]
        fn test_missing_time_is_nan() {
            assert_eq!(format_time(None), "NaN");
            assert_eq!(format_time(Some(f64::NAN)), "NaN");
        }

        #[test]
        fn test_exponent_forms() {
            assert_eq!(format_number(1e21), "1e+21");
            assert_eq!(format_number(1.5e-7), "1.5e-7");
            assert_eq!(format_number(0.000001), "0.000001");
            assert_eq!(format_number(123_456_789_012_345_680_000.0), "123456789012345680000");
        }

        #[test]
        fn test_specials() {
            assert_eq!(format_number(-0.0), "0");
            assert_eq!(format_number(-1.5), "-1.5");
            assert_eq!(format_number(f64::INFINITY), "Infinity");
            assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        }

        #[test]
        fn test_shortest_digits() {
            assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
            assert_eq!(format_number(12.5), "12.5");
        }
    }

    mod escape_tests {
        use super::*;

        #[test]
        fn test_escape_attr() {
            assert_eq!(escape_attr("a<b&c\"d"), "a&lt;b&amp;c&quot;d");
            assert_eq!(escape_attr("it's"), "it&apos;s");
        }

        #[test]
        fn test_escape_text_keeps_quotes() {
            assert_eq!(escape_text("a < \"b\" & 'c'"), "a &lt; \"b\" &amp; 'c'");
        }

        #[test]
        fn test_no_escape_needed() {
            assert_eq!(escape_attr("plain text"), "plain text");
        }
    }

    mod element_tests {
        use super::*;

        #[test]
        fn test_error_element_kinds() {
            assert_eq!(
                error_element(&TestError::error("Oops")),
                r#"<error message="Oops" type="Error">Oops</error>"#
            );
            assert_eq!(
                error_element(&TestError::assertion("1 < 2")),
                r#"<failure message="1 &lt; 2" type="AssertionError">1 &lt; 2</failure>"#
            );
        }

        #[test]
        fn test_self_closing_testcase() {
            let mut tree = ResultTree::new();
            let root = tree.add_root_suite("root");
            let test = tree.add_test(root, "ok");
            tree.test_mut(test).pass().set_time_elapsed(45.0);
            assert_eq!(
                test_element(&tree.test(test)),
                r#"<testcase name="ok" time="0.045" status="0"/>"#
            );
        }

        #[test]
        fn test_own_error_wins_over_suite_error() {
            let mut tree = ResultTree::new();
            let root = tree.add_root_suite("root");
            let test = tree.add_test(root, "t");
            tree.test_mut(test)
                .fail(TestError::error("own"))
                .set_suite_error(
                    TestError::error("inherited").in_lifecycle(LifecycleMethod::AfterEach),
                );
            let element = test_element(&tree.test(test));
            assert!(element.contains(r#"status="1""#));
            assert!(element.contains("own"));
            assert!(!element.contains("inherited"));
        }
    }

    mod render_tests {
        use super::*;

        #[test]
        fn test_empty_run() {
            let suites: Vec<crate::tree::SuiteRef<'_>> = Vec::new();
            assert_eq!(
                render_to_string(&suites),
                "<?xml version=\"1.0\" encoding=\"UTF-8\" ?><testsuites></testsuites>\n"
            );
        }

        #[test]
        fn test_suite_level_failure_hides_children() {
            let mut tree = ResultTree::new();
            let root = tree.add_root_suite("root");
            tree.suite_mut(root).set_time_elapsed(10.0);
            let nested = tree.add_suite(root, "never reached");
            tree.add_test(nested, "t1");
            tree.add_test(root, "t2");
            tree.fail_hook(root, TestError::error("boom"));

            let xml = render_to_string(&tree.root_suites());
            assert!(xml.contains(
                r#"<testsuite name="root" failures="0" skipped="0" tests="0" time="0.01"><error message="boom" type="Error">boom</error></testsuite>"#
            ));
            assert!(!xml.contains("<testcase"));
            assert!(!xml.contains("never reached"));
        }

        #[test]
        fn test_failing_sink_propagates() {
            struct Broken;
            impl ReportSink for Broken {
                fn write(&mut self, _chunk: &str) -> io::Result<()> {
                    Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
                }
                fn end(&mut self, _chunk: &str) -> io::Result<()> {
                    Ok(())
                }
            }

            let tree = ResultTree::new();
            let err = render(&tree.root_suites(), &mut Broken).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        }

        #[test]
        fn test_concurrent_renders_agree() {
            let mut tree = ResultTree::new();
            let root = tree.add_root_suite("chrome");
            tree.suite_mut(root).set_time_elapsed(1234.0);
            let ok = tree.add_test(root, "ok");
            tree.test_mut(ok).pass().set_time_elapsed(45.0);
            let bad = tree.add_test(root, "bad");
            tree.test_mut(bad).fail(TestError::assertion("1 != 2"));

            let suites = tree.root_suites();
            let (first, second) = std::thread::scope(|scope| {
                let first = scope.spawn(|| render_to_string(&suites));
                let second = scope.spawn(|| render_to_string(&suites));
                (first.join().unwrap(), second.join().unwrap())
            });
            assert_eq!(first, second);
            assert_eq!(first, render_to_string(&suites));
        }
    }

    mod reporter_tests {
        use super::*;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct SharedSink(Arc<Mutex<String>>);

        impl SharedSink {
            fn contents(&self) -> String {
                self.0.lock().unwrap().clone()
            }
        }

        impl ReportSink for SharedSink {
            fn write(&mut self, chunk: &str) -> io::Result<()> {
                self.0.lock().unwrap().push_str(chunk);
                Ok(())
            }

            fn end(&mut self, chunk: &str) -> io::Result<()> {
                self.write(chunk)
            }
        }

        fn single_test_tree() -> ResultTree {
            let mut tree = ResultTree::new();
            let root = tree.add_root_suite("root");
            tree.suite_mut(root).set_time_elapsed(100.0);
            let test = tree.add_test(root, "t1");
            tree.test_mut(test).pass().set_time_elapsed(45.0);
            tree
        }

        #[test]
        fn test_reporter_writes_to_stream() {
            let tree = single_test_tree();
            let sink = SharedSink::default();
            let mut reporter = JunitReporter::new(ReportOutput::stream(sink.clone())).unwrap();
            reporter.run_end(&tree.root_suites()).unwrap();

            assert_eq!(
                sink.contents(),
                concat!(
                    r#"<?xml version="1.0" encoding="UTF-8" ?><testsuites>"#,
                    r#"<testsuite name="root" failures="0" skipped="0" tests="1" time="0.1">"#,
                    r#"<testcase name="t1" time="0.045" status="0"/>"#,
                    "</testsuite></testsuites>\n"
                )
            );
        }

        #[test]
        fn test_second_run_end_is_rejected() {
            let tree = single_test_tree();
            let sink = SharedSink::default();
            let mut reporter = JunitReporter::new(ReportOutput::stream(sink.clone())).unwrap();
            reporter.run_end(&tree.root_suites()).unwrap();
            let written = sink.contents();

            let err = reporter.run_end(&tree.root_suites()).unwrap_err();
            assert!(matches!(err, VerdictError::Report { .. }));
            assert_eq!(sink.contents(), written);
        }
    }
}
