//! Listing collection across windows
//!
//! Drives the paginator window after window, pausing between windows to stay
//! under the listing API's per-account request rate.

use crate::config::ListingConfig;
use crate::crawler::paginator::Paginator;
use crate::movie::IdentifierSet;
use crate::TallyError;
use std::time::Duration;

/// Identifiers gathered from every listing window
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Union of all windows' identifiers
    pub ids: IdentifierSet,

    /// Windows fetched
    pub windows: u32,

    /// Listing pages requested
    pub pages_requested: u32,

    /// Listing pages that carried a movie list
    pub pages_valid: u32,

    /// Entries dropped for lack of an IMDB cross-reference
    pub entries_without_reference: u64,

    /// Whether collection stopped at `max_windows` with pages still reported
    pub hit_window_ceiling: bool,
}

/// Collects identifiers from the whole listing
pub struct Collector {
    paginator: Paginator,
    window_size: u32,
    window_pause: Duration,
    max_windows: u32,
}

impl Collector {
    pub fn new(paginator: Paginator, config: &ListingConfig) -> Self {
        Self {
            paginator,
            window_size: config.window_size,
            window_pause: Duration::from_millis(config.window_pause_ms),
            max_windows: config.max_windows,
        }
    }

    /// Fetches windows until the listing is exhausted
    ///
    /// Every window after the first is preceded by the configured pause.
    /// Stops when a window reports nothing more available, or after
    /// `max_windows` windows in case the API keeps reporting a larger total.
    ///
    /// # Arguments
    ///
    /// * `page_limit` - Movies per listing page (at most 50)
    /// * `start_page` - First listing page
    pub async fn collect_all(
        &self,
        page_limit: u32,
        start_page: u32,
    ) -> Result<Collection, TallyError> {
        let mut collection = Collection::default();
        let mut next_start = start_page;

        loop {
            if collection.windows >= self.max_windows {
                tracing::warn!(
                    "Stopping after {} listing windows; the API still reports more pages",
                    collection.windows
                );
                collection.hit_window_ceiling = true;
                break;
            }

            if collection.windows > 0 {
                tracing::debug!("Pausing {:?} before next listing window", self.window_pause);
                tokio::time::sleep(self.window_pause).await;
            }

            let window = self
                .paginator
                .fetch_window(page_limit, next_start, self.window_size)
                .await?;

            collection.windows += 1;
            collection.pages_requested += window.pages_requested;
            collection.pages_valid += window.pages_valid;
            collection.entries_without_reference += window.entries_without_reference;
            collection.ids.merge(window.ids);

            tracing::info!(
                "Listing window {}: {} unique identifiers so far",
                collection.windows,
                collection.ids.len()
            );

            if !window.more_available {
                break;
            }
            next_start = window.next_start;
        }

        Ok(collection)
    }
}
