//! Report output: per-case Arrow table written as CSV and Parquet, plus the
//! JSON summary of headline answers.

mod error;
pub mod report;
pub mod summary;

pub use error::StoreError;
pub use report::{ReportPaths, default_report_name, read_parquet, report_batch, write_report};
pub use summary::{Summary, summarize, write_summary};
