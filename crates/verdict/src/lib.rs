//! Verdict: test result trees and JUnit reporting
//!
//! An executor records suites and tests into a [`ResultTree`] while a run is
//! in progress, one root suite per browser or session. When the run ends the
//! root suites are handed to a [`JunitReporter`], which derives every count,
//! time and status from the tree and writes a JUnit XML document.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐   SuiteRef    ┌──────────────┐   chunks   ┌────────────┐
//! │ ResultTree │──────────────►│              │───────────►│ ReportSink │
//! └────────────┘               │ JunitReporter│            │ (file,     │
//! ┌────────────┐   &SuiteData  │              │            │  stream)   │
//! │ JSON from  │──────────────►│              │            └────────────┘
//! │ a worker   │               └──────────────┘
//! └────────────┘
//! ```
//!
//! Both inputs implement [`SuiteView`]; the reporter never looks past it.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod config;
pub mod junit;
mod model;
mod output;
mod result;
mod serialized;
mod tree;
mod view;

pub use config::JunitConfig;
pub use junit::{format_number, format_time, render, render_to_string, JunitReporter};
pub use model::{Cascade, LifecycleMethod, TestError, ASSERTION_ERROR};
pub use output::{ensure_parent_dir, ReportOutput, ReportSink, WriterSink};
pub use result::{VerdictError, VerdictResult};
pub use serialized::{NodeData, SuiteData, TestData};
pub use tree::{
    NodeId, ResultTree, SuiteId, SuiteMut, SuiteRef, TestId, TestMut, TestRef, NAME_SEPARATOR,
};
pub use view::{count_tests, Child, SuiteSummary, SuiteView, TestView};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::{
        JunitReporter, ReportOutput, ResultTree, SuiteData, SuiteView, TestError, TestView,
        VerdictResult,
    };
}
