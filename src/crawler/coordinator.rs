//! Pipeline coordinator - end-to-end run orchestration
//!
//! This module wires the stages together:
//! - Collecting identifiers from every listing window
//! - Fetching the media index page of each identifier
//! - Extracting one record per fetched page
//! - Accumulating the report and run statistics

use crate::config::{Config, ListingConfig};
use crate::crawler::collector::Collector;
use crate::crawler::details::DetailFetcher;
use crate::crawler::extractor::Extractor;
use crate::crawler::fetcher::{FetchResult, HttpTransport, Transport};
use crate::crawler::paginator::Paginator;
use crate::output::{Report, RunStatistics};
use crate::TallyError;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Instant;

/// Report and statistics of a finished run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: Report,
    pub stats: RunStatistics,
}

/// The two-stage fetch pipeline
pub struct Pipeline {
    listing: ListingConfig,
    concurrency: usize,
    collector: Collector,
    details: DetailFetcher,
    extractor: Extractor,
}

impl Pipeline {
    /// Creates a pipeline that talks HTTP
    ///
    /// # Errors
    ///
    /// * `TallyError::Http` - The HTTP client could not be built
    /// * `TallyError::Config` - The count selector does not parse
    pub fn new(config: Config) -> Result<Self, TallyError> {
        let transport = Arc::new(HttpTransport::new(&config.http)?);
        Self::with_transport(config, transport)
    }

    /// Creates a pipeline over any transport
    pub fn with_transport(
        config: Config,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, TallyError> {
        let extractor = Extractor::new(&config.detail)?;
        let paginator = Paginator::new(Arc::clone(&transport), &config.listing);
        let collector = Collector::new(paginator, &config.listing);
        let details = DetailFetcher::new(transport, &config.detail);

        Ok(Self {
            listing: config.listing,
            concurrency: config.detail.concurrency as usize,
            collector,
            details,
            extractor,
        })
    }

    /// Runs the pipeline to completion
    ///
    /// Only setup problems surface as errors. Failed listing pages, entries
    /// without a cross-reference and failed detail pages are logged and
    /// counted; an exhausted or empty listing yields an empty report.
    pub async fn run(&self) -> Result<RunOutcome, TallyError> {
        let started = Instant::now();

        tracing::info!(
            "Collecting in-theaters listing ({} per page, from page {})",
            self.listing.page_limit,
            self.listing.start_page
        );

        let collection = self
            .collector
            .collect_all(self.listing.page_limit, self.listing.start_page)
            .await?;

        let mut stats = RunStatistics {
            windows: collection.windows,
            listing_pages_requested: collection.pages_requested,
            listing_pages_valid: collection.pages_valid,
            entries_without_reference: collection.entries_without_reference,
            hit_window_ceiling: collection.hit_window_ceiling,
            identifiers: collection.ids.len() as u64,
            ..Default::default()
        };

        if collection.ids.is_empty() {
            tracing::info!("No identifiers collected, nothing to fetch");
        } else {
            tracing::info!(
                "Fetching {} detail pages ({} concurrent)",
                collection.ids.len(),
                self.concurrency
            );
        }

        let mut report = Report::new();
        let mut results = std::pin::pin!(self
            .details
            .fetch_details(&collection.ids, self.concurrency));
        let mut processed: u64 = 0;

        while let Some(result) = results.next().await {
            match result {
                FetchResult::Success(page) => match self.extractor.extract(&page) {
                    Ok(record) => {
                        if record.count == 0 {
                            stats.zero_count_records += 1;
                        }
                        report.push(record);
                    }
                    Err(e) => {
                        tracing::warn!("Skipping {}: {}", page.url, e);
                        stats.failed_details += 1;
                    }
                },
                FetchResult::HttpError { url, status_code } => {
                    tracing::warn!("Detail page {} returned HTTP {}", url, status_code);
                    stats.failed_details += 1;
                }
                FetchResult::NetworkError { url, error } => {
                    tracing::warn!("Detail page {} failed: {}", url, error);
                    stats.failed_details += 1;
                }
            }

            processed += 1;
            if processed % 25 == 0 {
                tracing::info!(
                    "Progress: {}/{} detail pages processed",
                    processed,
                    stats.identifiers
                );
            }
        }

        stats.records = report.len() as u64;
        stats.elapsed = started.elapsed();

        Ok(RunOutcome { report, stats })
    }
}

/// Builds an HTTP pipeline from configuration and runs it
///
/// # Example
///
/// ```no_run
/// use frame_tally::config::load_config;
/// use frame_tally::crawler::run_pipeline;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("frame-tally.toml"))?;
/// let outcome = run_pipeline(config).await?;
/// println!("{}", outcome.report.to_json(false)?);
/// # Ok(())
/// # }
/// ```
pub async fn run_pipeline(config: Config) -> Result<RunOutcome, TallyError> {
    Pipeline::new(config)?.run().await
}
