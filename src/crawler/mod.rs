//! Crawler module for listing and detail page retrieval
//!
//! This module contains the fetch pipeline, including:
//! - HTTP fetching behind the `Transport` seam
//! - Windowed, paced retrieval of the in-theaters listing
//! - Bounded-concurrency retrieval of media index pages
//! - Image count extraction
//! - Overall run coordination

mod collector;
mod coordinator;
mod details;
mod extractor;
mod fetcher;
mod paginator;

pub use collector::{Collection, Collector};
pub use coordinator::{run_pipeline, Pipeline, RunOutcome};
pub use details::DetailFetcher;
pub use extractor::Extractor;
pub use fetcher::{
    build_http_client, fetch_url, FetchResult, FetchedPage, HttpTransport, Transport,
};
pub use paginator::{Paginator, WindowResult};
