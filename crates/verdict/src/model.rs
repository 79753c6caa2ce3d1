//! Failure records attached to suites and tests.
//!
//! A failure raised by a lifecycle hook cascades in one of two ways: it is
//! either reported once on the suite (`before`/`after`, or no hook at all), or
//! copied onto every test below the suite (`beforeEach`/`afterEach`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error name that marks an assertion failure rather than a thrown error
pub const ASSERTION_ERROR: &str = "AssertionError";

/// Suite lifecycle hook in which a failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LifecycleMethod {
    /// Runs once before the suite's children
    Before,
    /// Runs once after the suite's children
    After,
    /// Runs before every test in the suite
    BeforeEach,
    /// Runs after every test in the suite
    AfterEach,
}

impl LifecycleMethod {
    /// Check if the hook runs once per test
    #[must_use]
    pub const fn is_per_test(self) -> bool {
        matches!(self, Self::BeforeEach | Self::AfterEach)
    }

    /// Name of the hook as it appears on the wire
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
            Self::BeforeEach => "beforeEach",
            Self::AfterEach => "afterEach",
        }
    }
}

impl fmt::Display for LifecycleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a suite failure propagates to the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cascade {
    /// Reported once on the suite; its tests are not counted or rendered
    Suite {
        /// Hook that failed, if any
        lifecycle_method: Option<LifecycleMethod>,
    },
    /// Reported on every descendant test as its `suite_error`
    PerTest {
        /// Hook that failed (`beforeEach` or `afterEach`)
        lifecycle_method: LifecycleMethod,
    },
}

impl Cascade {
    /// Check if the failure short-circuits the whole suite
    #[must_use]
    pub const fn is_suite_level(self) -> bool {
        matches!(self, Self::Suite { .. })
    }
}

/// A failure raised by a test, a suite, or a suite's lifecycle hook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestError {
    /// Error class name (`Error`, `AssertionError`, `TypeError`, ...)
    pub name: String,
    /// Human readable message
    pub message: String,
    /// Hook the error was raised from, when raised by a suite hook
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle_method: Option<LifecycleMethod>,
    /// Stack trace, when the executor captured one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl TestError {
    /// Create an error with the given class name and message
    #[must_use]
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            lifecycle_method: None,
            stack: None,
        }
    }

    /// Create a plain `Error`
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new("Error", message)
    }

    /// Create an `AssertionError`
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::new(ASSERTION_ERROR, message)
    }

    /// Tag the error with the hook it was raised from
    #[must_use]
    pub const fn in_lifecycle(mut self, method: LifecycleMethod) -> Self {
        self.lifecycle_method = Some(method);
        self
    }

    /// Attach a stack trace
    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Check if this is an assertion failure
    #[must_use]
    pub fn is_assertion(&self) -> bool {
        self.name == ASSERTION_ERROR
    }

    /// Resolve how this error propagates when attached to a suite
    #[must_use]
    pub fn cascade(&self) -> Cascade {
        match self.lifecycle_method {
            Some(method) if method.is_per_test() => Cascade::PerTest {
                lifecycle_method: method,
            },
            lifecycle_method => Cascade::Suite { lifecycle_method },
        }
    }
}

impl fmt::Display for TestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}
