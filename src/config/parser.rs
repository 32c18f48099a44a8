use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Parses configuration from TOML text without validating it
///
/// Every section and key is optional; omitted values take their defaults.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use frame_tally::config::load_config;
///
/// let config = load_config(Path::new("frame-tally.toml")).unwrap();
/// println!("Page limit: {}", config.listing.page_limit);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of configuration text
///
/// Logged at startup so that runs can be matched to the configuration
/// that produced them.
///
/// # Returns
///
/// Hex-encoded SHA-256 hash of the content
pub fn hash_config_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Builds the effective configuration for a run
///
/// Reads the file at `path` when given (defaults otherwise), applies an
/// API key override, then validates the result.
///
/// # Returns
///
/// * `Ok((Config, Option<String>))` - The configuration and, if a file was
///   read, the hash of its content
/// * `Err(ConfigError)` - Failed to load, parse, or validate
pub fn resolve_config(
    path: Option<&Path>,
    api_key: Option<String>,
) -> Result<(Config, Option<String>), ConfigError> {
    let (mut config, hash) = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            (parse_config(&content)?, Some(hash_config_content(&content)))
        }
        None => (Config::default(), None),
    };

    if let Some(key) = api_key {
        config.listing.api_key = key;
    }

    validate(&config)?;

    Ok((config, hash))
}
