//! Listing API payload decoding
//!
//! Payloads are decoded defensively: a body that is not a JSON object with a
//! `movies` array yields an invalid page, and a single malformed movie entry
//! is dropped without affecting its siblings.

use crate::movie::MovieIdentifier;
use serde::Deserialize;
use serde_json::Value;

/// One movie record from the listing API
///
/// Only the fields this crate reads are modeled; everything else is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieEntry {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub alternate_ids: Option<AlternateIds>,
}

/// External catalog cross-references attached to a movie
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlternateIds {
    #[serde(default)]
    pub imdb: Option<String>,
}

impl MovieEntry {
    /// Returns the IMDB identifier, if the entry carries a usable one
    pub fn imdb_id(&self) -> Option<MovieIdentifier> {
        self.alternate_ids
            .as_ref()
            .and_then(|ids| ids.imdb.as_deref())
            .and_then(MovieIdentifier::parse)
    }
}

/// A fetched and decoded listing page
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    /// Total number of movies the API reports for the query
    pub total_available: u64,

    /// Movie records in page order
    pub movie_entries: Vec<MovieEntry>,

    /// Whether the payload carried a `movies` array
    pub valid: bool,
}

impl ListingPage {
    /// Decodes a listing API response body
    ///
    /// Never fails: unusable bodies produce a page with `valid == false`.
    /// `total` may be a number or a numeric string; anything else reads as 0.
    pub fn parse(body: &str) -> Self {
        let payload: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Listing body is not JSON: {}", e);
                return Self::default();
            }
        };

        let Some(movies) = payload.get("movies").and_then(Value::as_array) else {
            return Self::default();
        };

        let movie_entries = movies
            .iter()
            .filter_map(|raw| match MovieEntry::deserialize(raw) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!("Dropping undecodable movie entry: {}", e);
                    None
                }
            })
            .collect();

        Self {
            total_available: payload.get("total").map(parse_total).unwrap_or(0),
            movie_entries,
            valid: true,
        }
    }
}

fn parse_total(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
