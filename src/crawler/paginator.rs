//! Listing window retrieval
//!
//! A window is a batch of consecutive listing pages requested concurrently.
//! All requests of a window are joined before the pages are inspected.

use crate::config::{ListingConfig, MAX_PAGE_LIMIT};
use crate::crawler::fetcher::{FetchResult, Transport};
use crate::movie::{IdentifierSet, ListingPage};
use crate::url::listing_url;
use crate::TallyError;
use futures::future::join_all;
use std::sync::Arc;

/// Outcome of one listing window
#[derive(Debug, Clone, Default)]
pub struct WindowResult {
    /// Identifiers with an IMDB cross-reference, deduplicated
    pub ids: IdentifierSet,

    /// Whether the API reports movies beyond this window
    pub more_available: bool,

    /// First page of the following window
    pub next_start: u32,

    /// Pages requested in this window
    pub pages_requested: u32,

    /// Pages that carried a movie list
    pub pages_valid: u32,

    /// Movie entries dropped for lack of an IMDB cross-reference
    pub entries_without_reference: u64,
}

/// Fetches windows of listing pages from the listing API
pub struct Paginator {
    transport: Arc<dyn Transport>,
    endpoint: String,
    api_key: String,
}

impl Paginator {
    pub fn new(transport: Arc<dyn Transport>, config: &ListingConfig) -> Self {
        Self {
            transport,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Fetches pages `start_page .. start_page + window_size` concurrently
    ///
    /// Pages without a movie list are dropped. If none remain, the window is
    /// empty and reports nothing more available. Otherwise the total read
    /// from the first valid page decides whether another window is needed.
    ///
    /// # Errors
    ///
    /// * `InvalidPageLimit` - `page_limit` is 0 or above 50
    /// * `InvalidStartPage` - `start_page` is 0, or the window runs past the
    ///   last representable page
    /// * `Url` - The configured endpoint is not a usable URL
    pub async fn fetch_window(
        &self,
        page_limit: u32,
        start_page: u32,
        window_size: u32,
    ) -> Result<WindowResult, TallyError> {
        if page_limit == 0 || page_limit > MAX_PAGE_LIMIT {
            return Err(TallyError::InvalidPageLimit(page_limit));
        }

        let next_start = match start_page.checked_add(window_size.max(1)) {
            Some(next) if start_page > 0 => next,
            _ => return Err(TallyError::InvalidStartPage(start_page)),
        };
        let last_page = next_start - 1;

        let urls = (start_page..=last_page)
            .map(|page| listing_url(&self.endpoint, &self.api_key, page_limit, page))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Requesting listing pages {}..={}", start_page, last_page);

        let results = join_all(urls.iter().map(|url| self.transport.fetch(url.as_str()))).await;

        let pages: Vec<ListingPage> = results
            .iter()
            .filter_map(|result| self.read_page(result))
            .collect();

        let mut window = WindowResult {
            pages_requested: urls.len() as u32,
            pages_valid: pages.len() as u32,
            next_start,
            ..Default::default()
        };

        let Some(reference) = pages.first() else {
            tracing::debug!(
                "No valid listing pages in {}..={}, listing exhausted",
                start_page,
                last_page
            );
            return Ok(window);
        };
        let total_available = reference.total_available;

        for entry in pages.iter().flat_map(|page| page.movie_entries.iter()) {
            match entry.imdb_id() {
                Some(id) => {
                    window.ids.insert(id);
                }
                None => {
                    tracing::trace!(
                        "Dropping {:?}: no IMDB cross-reference",
                        entry.title.as_deref().unwrap_or("untitled entry")
                    );
                    window.entries_without_reference += 1;
                }
            }
        }

        let covered = u64::from(last_page) * u64::from(page_limit);
        window.more_available = total_available > covered;

        tracing::debug!(
            "Window {}..={}: {} identifiers, {} of {} movies covered",
            start_page,
            last_page,
            window.ids.len(),
            covered.min(total_available),
            total_available
        );

        Ok(window)
    }

    /// Turns one fetch result into a valid listing page, if it is one
    fn read_page(&self, result: &FetchResult) -> Option<ListingPage> {
        match result {
            FetchResult::Success(fetched) => {
                let page = ListingPage::parse(&fetched.body);
                if page.valid {
                    Some(page)
                } else {
                    tracing::debug!("Listing page has no movie list: {}", fetched.url);
                    None
                }
            }
            FetchResult::HttpError { .. } if result.is_rate_limited() => {
                tracing::warn!("Listing API rate limit hit; page dropped");
                None
            }
            FetchResult::HttpError { status_code, .. } => {
                tracing::debug!("Listing page returned HTTP {}", status_code);
                None
            }
            FetchResult::NetworkError { error, .. } => {
                tracing::warn!("Listing page request failed: {}", error);
                None
            }
        }
    }
}
