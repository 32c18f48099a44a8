//! Configuration module for Frame-Tally
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use frame_tally::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("frame-tally.toml")).unwrap();
//! println!("Detail concurrency: {}", config.detail.concurrency);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, DetailConfig, HttpConfig, ListingConfig, ID_PLACEHOLDER};

// Re-export parser functions
pub use parser::{hash_config_content, load_config, parse_config, resolve_config};
pub use validation::MAX_PAGE_LIMIT;
