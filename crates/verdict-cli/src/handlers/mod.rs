//! Command handlers - extracted from main.rs for testability

pub mod junit;
pub mod summary;

pub use junit::execute_junit;
pub use summary::{execute_summary, summarize};
