//! The result tree: suites and tests recorded while a run is in progress.
//!
//! Nodes live in an arena owned by [`ResultTree`] and refer to each other by
//! index, so parent links are plain handles rather than shared pointers. The
//! executor builds and mutates the tree through [`SuiteMut`] and [`TestMut`];
//! everything downstream reads it through [`SuiteRef`] and [`TestRef`].
//!
//! # Example
//!
//! ```
//! use verdict::{ResultTree, SuiteView, TestError};
//!
//! let mut tree = ResultTree::new();
//! let root = tree.add_root_suite("chrome 32 on Mac");
//! tree.suite_mut(root).set_session_id("foo").set_time_elapsed(1234.0);
//! let test = tree.add_test(root, "adds numbers");
//! tree.test_mut(test).fail(TestError::assertion("Expected 1 + 1 to equal 3"));
//!
//! assert_eq!(tree.suite(root).num_failed_tests(), 1);
//! ```

use crate::model::{LifecycleMethod, TestError};
use crate::serialized::{NodeData, SuiteData, TestData};
use crate::view::{Child, SuiteView, TestView};

/// Separator between names in a node's full name
pub const NAME_SEPARATOR: &str = " - ";

/// Handle to a suite in a [`ResultTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SuiteId(usize);

/// Handle to a test in a [`ResultTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TestId(usize);

/// Handle to either kind of node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    /// Suite node
    Suite(SuiteId),
    /// Test node
    Test(TestId),
}

#[derive(Debug, Clone)]
struct SuiteNode {
    name: String,
    parent: Option<SuiteId>,
    children: Vec<NodeId>,
    time_elapsed: Option<f64>,
    error: Option<TestError>,
    session_id: Option<String>,
}

impl SuiteNode {
    fn new(name: String, parent: Option<SuiteId>) -> Self {
        Self {
            name,
            parent,
            children: Vec::new(),
            time_elapsed: None,
            error: None,
            session_id: None,
        }
    }
}

#[derive(Debug, Clone)]
struct TestNode {
    name: String,
    parent: SuiteId,
    has_passed: Option<bool>,
    skipped: Option<String>,
    error: Option<TestError>,
    suite_error: Option<TestError>,
    time_elapsed: Option<f64>,
}

/// Arena holding every suite and test of a run
///
/// Handles are only meaningful for the tree that issued them; passing a
/// handle from another tree panics or addresses the wrong node.
#[derive(Debug, Clone, Default)]
pub struct ResultTree {
    suites: Vec<SuiteNode>,
    tests: Vec<TestNode>,
    roots: Vec<SuiteId>,
}

impl ResultTree {
    /// Create an empty tree
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a live tree from its serialized form, restoring parent links
    #[must_use]
    pub fn from_data(roots: &[SuiteData]) -> Self {
        let mut tree = Self::new();
        for data in roots {
            let id = tree.add_root_suite(data.name.clone());
            tree.load_suite(id, data);
        }
        tree
    }

    fn load_suite(&mut self, id: SuiteId, data: &SuiteData) {
        {
            let node = &mut self.suites[id.0];
            node.time_elapsed = data.time_elapsed;
            node.error.clone_from(&data.error);
            node.session_id.clone_from(&data.session_id);
        }
        for child in &data.tests {
            match child {
                NodeData::Suite(nested) => {
                    let nested_id = self.add_suite(id, nested.name.clone());
                    self.load_suite(nested_id, nested);
                }
                NodeData::Test(test) => {
                    let test_id = self.add_test(id, test.name.clone());
                    let node = &mut self.tests[test_id.0];
                    node.has_passed = test.has_passed;
                    node.skipped.clone_from(&test.skipped);
                    node.error.clone_from(&test.error);
                    node.suite_error.clone_from(&test.suite_error);
                    node.time_elapsed = test.time_elapsed;
                }
            }
        }
    }

    /// Add a root suite, one per session or environment
    pub fn add_root_suite(&mut self, name: impl Into<String>) -> SuiteId {
        let id = SuiteId(self.suites.len());
        self.suites.push(SuiteNode::new(name.into(), None));
        self.roots.push(id);
        id
    }

    /// Append a nested suite to `parent`
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not issued by this tree
    pub fn add_suite(&mut self, parent: SuiteId, name: impl Into<String>) -> SuiteId {
        let id = SuiteId(self.suites.len());
        self.suites.push(SuiteNode::new(name.into(), Some(parent)));
        self.suites[parent.0].children.push(NodeId::Suite(id));
        id
    }

    /// Append a test to `parent`
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not issued by this tree
    pub fn add_test(&mut self, parent: SuiteId, name: impl Into<String>) -> TestId {
        let id = TestId(self.tests.len());
        self.tests.push(TestNode {
            name: name.into(),
            parent,
            has_passed: None,
            skipped: None,
            error: None,
            suite_error: None,
            time_elapsed: None,
        });
        self.suites[parent.0].children.push(NodeId::Test(id));
        id
    }

    /// Mutable access to a suite
    pub fn suite_mut(&mut self, id: SuiteId) -> SuiteMut<'_> {
        SuiteMut {
            node: &mut self.suites[id.0],
        }
    }

    /// Mutable access to a test
    pub fn test_mut(&mut self, id: TestId) -> TestMut<'_> {
        TestMut {
            node: &mut self.tests[id.0],
        }
    }

    /// Record a failure raised by a suite or one of its hooks.
    ///
    /// A `beforeEach`/`afterEach` failure is also recorded as the
    /// `suite_error` of every test below the suite.
    pub fn fail_hook(&mut self, suite: SuiteId, error: TestError) {
        if error.lifecycle_method.is_some_and(LifecycleMethod::is_per_test) {
            let mut pending = vec![suite];
            while let Some(current) = pending.pop() {
                for child in &self.suites[current.0].children {
                    match *child {
                        NodeId::Suite(nested) => pending.push(nested),
                        NodeId::Test(test) => {
                            self.tests[test.0].suite_error = Some(error.clone());
                        }
                    }
                }
            }
        }
        self.suites[suite.0].error = Some(error);
    }

    /// Root suites in insertion order
    pub fn roots(&self) -> impl Iterator<Item = SuiteRef<'_>> + '_ {
        self.roots.iter().map(move |&id| self.suite(id))
    }

    /// Root suites collected for handing to a reporter
    #[must_use]
    pub fn root_suites(&self) -> Vec<SuiteRef<'_>> {
        self.roots().collect()
    }

    /// Read access to a suite
    #[must_use]
    pub const fn suite(&self, id: SuiteId) -> SuiteRef<'_> {
        SuiteRef { tree: self, id }
    }

    /// Read access to a test
    #[must_use]
    pub const fn test(&self, id: TestId) -> TestRef<'_> {
        TestRef { tree: self, id }
    }

    /// Total number of suites, roots included
    #[must_use]
    pub fn suite_count(&self) -> usize {
        self.suites.len()
    }

    /// Total number of recorded tests
    #[must_use]
    pub fn test_count(&self) -> usize {
        self.tests.len()
    }

    fn suite_node(&self, id: SuiteId) -> &SuiteNode {
        &self.suites[id.0]
    }

    fn test_node(&self, id: TestId) -> &TestNode {
        &self.tests[id.0]
    }
}

/// Executor-side handle for updating a suite
#[derive(Debug)]
pub struct SuiteMut<'a> {
    node: &'a mut SuiteNode,
}

impl SuiteMut<'_> {
    /// Record the suite's elapsed time in milliseconds
    pub fn set_time_elapsed(&mut self, ms: f64) -> &mut Self {
        self.node.time_elapsed = Some(ms);
        self
    }

    /// Record the session that produced this suite
    pub fn set_session_id(&mut self, session_id: impl Into<String>) -> &mut Self {
        self.node.session_id = Some(session_id.into());
        self
    }

    /// Record the suite's own error without cascading it to tests.
    ///
    /// Use [`ResultTree::fail_hook`] for hook failures that must reach tests.
    pub fn set_error(&mut self, error: TestError) -> &mut Self {
        self.node.error = Some(error);
        self
    }
}

/// Executor-side handle for updating a test
#[derive(Debug)]
pub struct TestMut<'a> {
    node: &'a mut TestNode,
}

impl TestMut<'_> {
    /// Mark the test as passed
    pub fn pass(&mut self) -> &mut Self {
        self.node.has_passed = Some(true);
        self.node.error = None;
        self
    }

    /// Mark the test as failed with its own error
    pub fn fail(&mut self, error: TestError) -> &mut Self {
        self.node.has_passed = Some(false);
        self.node.error = Some(error);
        self
    }

    /// Mark the test as skipped
    pub fn skip(&mut self, reason: impl Into<String>) -> &mut Self {
        self.node.skipped = Some(reason.into());
        self
    }

    /// Set the pass flag directly
    pub fn set_has_passed(&mut self, passed: bool) -> &mut Self {
        self.node.has_passed = Some(passed);
        self
    }

    /// Record an error inherited from an ancestor hook
    pub fn set_suite_error(&mut self, error: TestError) -> &mut Self {
        self.node.suite_error = Some(error);
        self
    }

    /// Record the test's elapsed time in milliseconds
    pub fn set_time_elapsed(&mut self, ms: f64) -> &mut Self {
        self.node.time_elapsed = Some(ms);
        self
    }
}

/// Read-only view of a suite inside a [`ResultTree`]
#[derive(Debug, Clone, Copy)]
pub struct SuiteRef<'a> {
    tree: &'a ResultTree,
    id: SuiteId,
}

impl<'a> SuiteRef<'a> {
    /// Handle of this suite
    #[must_use]
    pub const fn handle(&self) -> SuiteId {
        self.id
    }

    /// Owning suite, `None` for roots
    #[must_use]
    pub fn parent(&self) -> Option<SuiteRef<'a>> {
        self.node().parent.map(|id| self.tree.suite(id))
    }

    /// Root suite this suite belongs to
    #[must_use]
    pub fn root(&self) -> SuiteRef<'a> {
        let mut current = *self;
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Session of the root this suite belongs to
    #[must_use]
    pub fn resolved_session_id(&self) -> Option<&'a str> {
        self.tree
            .suite_node(self.root().id)
            .session_id
            .as_deref()
    }

    /// Names from the root down to this suite
    #[must_use]
    pub fn full_name(&self) -> String {
        let mut names = vec![self.node().name.as_str()];
        let mut current = self.parent();
        while let Some(suite) = current {
            names.push(suite.node().name.as_str());
            current = suite.parent();
        }
        names.reverse();
        names.join(NAME_SEPARATOR)
    }

    /// Snapshot this subtree in its serialized form
    #[must_use]
    pub fn to_data(&self) -> SuiteData {
        let node = self.node();
        SuiteData {
            name: node.name.clone(),
            tests: self
                .children()
                .into_iter()
                .map(|child| match child {
                    Child::Suite(suite) => NodeData::Suite(suite.to_data()),
                    Child::Test(test) => NodeData::Test(test.to_data()),
                })
                .collect(),
            time_elapsed: node.time_elapsed,
            error: node.error.clone(),
            session_id: node.session_id.clone(),
        }
    }

    fn node(&self) -> &'a SuiteNode {
        self.tree.suite_node(self.id)
    }
}

impl<'a> SuiteView for SuiteRef<'a> {
    type Test = TestRef<'a>;

    fn name(&self) -> &str {
        &self.node().name
    }

    fn time_elapsed(&self) -> Option<f64> {
        self.node().time_elapsed
    }

    fn error(&self) -> Option<&TestError> {
        self.node().error.as_ref()
    }

    fn session_id(&self) -> Option<&str> {
        self.node().session_id.as_deref()
    }

    fn children(&self) -> Vec<Child<Self, Self::Test>> {
        self.node()
            .children
            .iter()
            .map(|child| match *child {
                NodeId::Suite(id) => Child::Suite(self.tree.suite(id)),
                NodeId::Test(id) => Child::Test(self.tree.test(id)),
            })
            .collect()
    }
}

/// Read-only view of a test inside a [`ResultTree`]
#[derive(Debug, Clone, Copy)]
pub struct TestRef<'a> {
    tree: &'a ResultTree,
    id: TestId,
}

impl<'a> TestRef<'a> {
    /// Handle of this test
    #[must_use]
    pub const fn handle(&self) -> TestId {
        self.id
    }

    /// Owning suite
    #[must_use]
    pub fn parent(&self) -> SuiteRef<'a> {
        self.tree.suite(self.node().parent)
    }

    /// Suite names from the root down to this test
    #[must_use]
    pub fn full_name(&self) -> String {
        format!(
            "{}{NAME_SEPARATOR}{}",
            self.parent().full_name(),
            self.node().name
        )
    }

    /// Snapshot this test in its serialized form
    #[must_use]
    pub fn to_data(&self) -> TestData {
        let node = self.node();
        TestData {
            name: node.name.clone(),
            has_passed: node.has_passed,
            skipped: node.skipped.clone(),
            error: node.error.clone(),
            suite_error: node.suite_error.clone(),
            time_elapsed: node.time_elapsed,
        }
    }

    fn node(&self) -> &'a TestNode {
        self.tree.test_node(self.id)
    }
}

impl TestView for TestRef<'_> {
    fn name(&self) -> &str {
        &self.node().name
    }

    fn has_passed(&self) -> Option<bool> {
        self.node().has_passed
    }

    fn skipped(&self) -> Option<&str> {
        self.node().skipped.as_deref()
    }

    fn error(&self) -> Option<&TestError> {
        self.node().error.as_ref()
    }

    fn suite_error(&self) -> Option<&TestError> {
        self.node().suite_error.as_ref()
    }

    fn time_elapsed(&self) -> Option<f64> {
        self.node().time_elapsed
    }
}
