//! Read-only views over a result tree, and the metrics derived from them.
//!
//! A suite handed to the reporter is either a live [`SuiteRef`](crate::SuiteRef)
//! into a [`ResultTree`](crate::ResultTree) or a [`SuiteData`](crate::SuiteData)
//! received in serialized form. Both implement [`SuiteView`], so metrics and
//! rendering only ever look at structure, never at the concrete type.
//!
//! Metrics are recomputed on every call. Nothing is cached on the nodes, so
//! the numbers cannot drift from the children they are computed from.

use crate::model::{Cascade, TestError};

/// A child of a suite, in insertion order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Child<S, T> {
    /// Nested suite
    Suite(S),
    /// Test case
    Test(T),
}

/// Read access to a single test outcome
pub trait TestView {
    /// Display name
    fn name(&self) -> &str;

    /// `Some(true)` once the test ran and all its assertions held
    fn has_passed(&self) -> Option<bool>;

    /// Skip reason, when the body did not run
    fn skipped(&self) -> Option<&str>;

    /// Failure raised by the test itself
    fn error(&self) -> Option<&TestError>;

    /// Failure inherited from an ancestor's `beforeEach`/`afterEach` hook
    fn suite_error(&self) -> Option<&TestError>;

    /// Elapsed time in milliseconds
    fn time_elapsed(&self) -> Option<f64>;

    /// Failed on its own account. Inherited suite errors do not count.
    fn is_failed(&self) -> bool {
        self.error().is_some() && self.has_passed() != Some(true) && self.skipped().is_none()
    }

    /// Skipped, whatever its pass state
    fn is_skipped(&self) -> bool {
        self.skipped().is_some()
    }

    /// Ran and passed
    fn is_passed(&self) -> bool {
        self.has_passed() == Some(true) && self.skipped().is_none()
    }
}

/// Read access to a suite and its subtree
pub trait SuiteView: Sized {
    /// Test type yielded by [`children`](Self::children)
    type Test: TestView;

    /// Display name
    fn name(&self) -> &str;

    /// Elapsed time in milliseconds, including nested children
    fn time_elapsed(&self) -> Option<f64>;

    /// Failure raised by the suite or one of its hooks
    fn error(&self) -> Option<&TestError>;

    /// Session that produced this subtree; only set on roots
    fn session_id(&self) -> Option<&str>;

    /// Direct children in insertion order
    fn children(&self) -> Vec<Child<Self, Self::Test>>;

    /// How this suite's own failure propagates, if it failed
    fn cascade(&self) -> Option<Cascade> {
        self.error().map(TestError::cascade)
    }

    /// A `before`/`after` (or hookless) failure kept the children from being
    /// meaningfully executed
    fn is_short_circuited(&self) -> bool {
        self.cascade().is_some_and(Cascade::is_suite_level)
    }

    /// Number of tests below this suite
    fn num_tests(&self) -> usize {
        count_tests(self, &|_| true)
    }

    /// Number of tests that failed on their own account
    fn num_failed_tests(&self) -> usize {
        count_tests(self, &|test| test.is_failed())
    }

    /// Number of skipped tests
    fn num_skipped_tests(&self) -> usize {
        count_tests(self, &|test| test.is_skipped())
    }

    /// Number of tests that ran and passed
    fn num_passed_tests(&self) -> usize {
        count_tests(self, &|test| test.is_passed())
    }
}

/// Count the tests below `suite` that match `predicate`.
///
/// A suite cascading its failure at suite level contributes nothing.
pub fn count_tests<S: SuiteView>(suite: &S, predicate: &dyn Fn(&S::Test) -> bool) -> usize {
    if suite.is_short_circuited() {
        return 0;
    }
    suite
        .children()
        .iter()
        .map(|child| match child {
            Child::Suite(nested) => count_tests(nested, predicate),
            Child::Test(test) => usize::from(predicate(test)),
        })
        .sum()
}

/// Totals for one root suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SuiteSummary {
    /// Counted tests
    pub tests: usize,
    /// Own failures
    pub failures: usize,
    /// Skipped tests
    pub skipped: usize,
    /// Passed tests
    pub passed: usize,
}

impl SuiteSummary {
    /// Compute the totals of a suite
    #[must_use]
    pub fn of<S: SuiteView>(suite: &S) -> Self {
        Self {
            tests: suite.num_tests(),
            failures: suite.num_failed_tests(),
            skipped: suite.num_skipped_tests(),
            passed: suite.num_passed_tests(),
        }
    }
}
