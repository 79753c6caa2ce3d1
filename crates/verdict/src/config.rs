//! Reporter configuration

use crate::output::ReportOutput;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options accepted by the JUnit reporter
///
/// Only the destination is configurable; nothing here affects the shape of
/// the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JunitConfig {
    /// Report file; standard output when unset
    pub filename: Option<PathBuf>,
}

impl JunitConfig {
    /// Create default configuration (report to standard output)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the report file
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<PathBuf>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Output this configuration resolves to
    #[must_use]
    pub fn output(&self) -> ReportOutput {
        self.filename
            .clone()
            .map_or(ReportOutput::Stdout, ReportOutput::File)
    }
}
