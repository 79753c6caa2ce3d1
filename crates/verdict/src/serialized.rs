//! Serialized form of a result tree.
//!
//! Remote workers ship their results as plain JSON objects shaped like the
//! live tree: a suite carries its children under `tests`, a test carries
//! `hasPassed`, `skipped`, `error` and `suiteError`. Parent links are never
//! part of this form. The reporter renders these objects directly, exactly as
//! it renders a live [`ResultTree`](crate::ResultTree).

use crate::model::TestError;
use crate::result::{VerdictError, VerdictResult};
use crate::view::{Child, SuiteView, TestView};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Serialized suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteData {
    /// Display name
    pub name: String,
    /// Children in insertion order
    pub tests: Vec<NodeData>,
    /// Elapsed time in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_elapsed: Option<f64>,
    /// Failure raised by the suite or one of its hooks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<TestError>,
    /// Session that produced this subtree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Serialized test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestData {
    /// Display name
    pub name: String,
    /// Pass flag, absent if the test never reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_passed: Option<bool>,
    /// Skip reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
    /// Failure raised by the test itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<TestError>,
    /// Failure inherited from an ancestor hook
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite_error: Option<TestError>,
    /// Elapsed time in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_elapsed: Option<f64>,
}

/// Serialized child of a suite.
///
/// Untagged on the wire: an object with a `tests` key is a suite, anything
/// else is a test. A malformed descendant fails the whole suite.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeData {
    /// Nested suite
    Suite(SuiteData),
    /// Test case
    Test(TestData),
}

impl<'de> Deserialize<'de> for NodeData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::<String, Value>::deserialize(deserializer)?;
        let is_suite = object.contains_key("tests");
        let value = Value::Object(object);
        let node = if is_suite {
            SuiteData::deserialize(value).map(Self::Suite)
        } else {
            TestData::deserialize(value).map(Self::Test)
        };
        node.map_err(de::Error::custom)
    }
}

impl SuiteData {
    /// Create an empty suite
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: Vec::new(),
            time_elapsed: None,
            error: None,
            session_id: None,
        }
    }

    /// Parse root suites from JSON, either an array or a single suite object
    ///
    /// # Errors
    ///
    /// Returns error if the document is not valid JSON or does not have the
    /// shape of a suite
    pub fn from_json_str(json: &str) -> VerdictResult<Vec<Self>> {
        let invalid = |e: serde_json::Error| VerdictError::invalid_tree(e.to_string());
        let document: Value = serde_json::from_str(json).map_err(invalid)?;
        if document.is_array() {
            Vec::<Self>::deserialize(document).map_err(invalid)
        } else {
            Self::deserialize(document).map(|suite| vec![suite]).map_err(invalid)
        }
    }

    /// Read root suites from a JSON file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: &Path) -> VerdictResult<Vec<Self>> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize root suites to pretty JSON
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_json_string(suites: &[Self]) -> VerdictResult<String> {
        Ok(serde_json::to_string_pretty(suites)?)
    }
}

impl TestData {
    /// Create a test that has not reported yet
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_passed: None,
            skipped: None,
            error: None,
            suite_error: None,
            time_elapsed: None,
        }
    }
}

impl<'a> SuiteView for &'a SuiteData {
    type Test = &'a TestData;

    fn name(&self) -> &str {
        &self.name
    }

    fn time_elapsed(&self) -> Option<f64> {
        self.time_elapsed
    }

    fn error(&self) -> Option<&TestError> {
        self.error.as_ref()
    }

    fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    fn children(&self) -> Vec<Child<Self, Self::Test>> {
        let suite: &'a SuiteData = *self;
        suite
            .tests
            .iter()
            .map(|child| match child {
                NodeData::Suite(nested) => Child::Suite(nested),
                NodeData::Test(test) => Child::Test(test),
            })
            .collect()
    }
}

impl TestView for &TestData {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_passed(&self) -> Option<bool> {
        self.has_passed
    }

    fn skipped(&self) -> Option<&str> {
        self.skipped.as_deref()
    }

    fn error(&self) -> Option<&TestError> {
        self.error.as_ref()
    }

    fn suite_error(&self) -> Option<&TestError> {
        self.suite_error.as_ref()
    }

    fn time_elapsed(&self) -> Option<f64> {
        self.time_elapsed
    }
}
