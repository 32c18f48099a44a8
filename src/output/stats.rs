//! Run statistics
//!
//! Counters gathered while a run progresses, logged once it finishes.

use std::time::Duration;

/// Summary of one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Listing windows fetched
    pub windows: u32,

    /// Listing pages requested
    pub listing_pages_requested: u32,

    /// Listing pages that carried a movie list
    pub listing_pages_valid: u32,

    /// Listing entries dropped for lack of an IMDB cross-reference
    pub entries_without_reference: u64,

    /// Whether collection stopped at the window ceiling
    pub hit_window_ceiling: bool,

    /// Unique identifiers collected
    pub identifiers: u64,

    /// Records written to the report
    pub records: u64,

    /// Records whose page listed no images
    pub zero_count_records: u64,

    /// Detail pages that could not be fetched or read
    pub failed_details: u64,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunStatistics {
    /// Percentage of identifiers that produced a record
    pub fn success_rate(&self) -> f64 {
        if self.identifiers > 0 {
            (self.records as f64 / self.identifiers as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Logs statistics at info level
///
/// Goes through `tracing` so that stdout stays reserved for the report.
pub fn log_statistics(stats: &RunStatistics) {
    tracing::info!(
        "Listing: {} windows, {}/{} valid pages, {} entries without an IMDB reference",
        stats.windows,
        stats.listing_pages_valid,
        stats.listing_pages_requested,
        stats.entries_without_reference
    );

    if stats.hit_window_ceiling {
        tracing::warn!("Listing stopped at the window ceiling; results may be incomplete");
    }

    tracing::info!(
        "Details: {} records ({} with no images), {} failed, {:.1}% of {} identifiers",
        stats.records,
        stats.zero_count_records,
        stats.failed_details,
        stats.success_rate(),
        stats.identifiers
    );

    tracing::info!("Run finished in {:.2}s", stats.elapsed.as_secs_f64());
}
