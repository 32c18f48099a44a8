//! Frame-Tally: counts promotional images for movies in theaters
//!
//! This crate pages through an in-theaters listing API, collects the IMDB
//! cross-references of every listed movie, then fetches each title's media
//! index page and reports how many images it lists.

pub mod config;
pub mod crawler;
pub mod movie;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Frame-Tally operations
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Page limit must be between 1 and 50, got {0}")]
    InvalidPageLimit(u32),

    #[error("Start page {0} is outside the listing page range")]
    InvalidStartPage(u32),

    #[error("No identifier digits in URL {url}")]
    MissingIdentifier { url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for Frame-Tally operations
pub type Result<T> = std::result::Result<T, TallyError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Pipeline, RunOutcome};
pub use movie::{IdentifierSet, MovieIdentifier};
pub use output::{ImageCountRecord, Report};
