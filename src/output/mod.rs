//! Output module for run reports
//!
//! This module handles:
//! - The image count records produced by a run
//! - Serializing the report as JSON
//! - Recording run statistics

mod report;
pub mod stats;

pub use report::{ImageCountRecord, Report};
pub use stats::{log_statistics, RunStatistics};
