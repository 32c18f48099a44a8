//! Detail page retrieval with bounded concurrency

use crate::config::DetailConfig;
use crate::crawler::fetcher::{FetchResult, Transport};
use crate::movie::IdentifierSet;
use crate::url::expand_template;
use futures::stream::{self, Stream, StreamExt};
use std::sync::Arc;

/// Fetches the media index page of every identifier
pub struct DetailFetcher {
    transport: Arc<dyn Transport>,
    media_index_template: String,
}

impl DetailFetcher {
    pub fn new(transport: Arc<dyn Transport>, config: &DetailConfig) -> Self {
        Self {
            transport,
            media_index_template: config.media_index_template.clone(),
        }
    }

    /// Returns a lazy stream of detail page results
    ///
    /// Nothing is requested until the stream is polled. At most
    /// `concurrency` requests are in flight at once, and results are yielded
    /// in completion order rather than identifier order. The stream yields
    /// exactly one result per identifier; failed requests come through as
    /// `HttpError` or `NetworkError`.
    pub fn fetch_details(
        &self,
        ids: &IdentifierSet,
        concurrency: usize,
    ) -> impl Stream<Item = FetchResult> + Send + 'static {
        let urls: Vec<String> = ids
            .iter()
            .map(|id| expand_template(&self.media_index_template, id))
            .collect();

        tracing::debug!(
            "Fetching {} detail pages, {} at a time",
            urls.len(),
            concurrency
        );

        let transport = Arc::clone(&self.transport);
        stream::iter(urls)
            .map(move |url| {
                let transport = Arc::clone(&transport);
                async move { transport.fetch(&url).await }
            })
            .buffer_unordered(concurrency.max(1))
    }
}
