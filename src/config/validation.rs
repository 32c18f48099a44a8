use crate::config::types::{Config, DetailConfig, HttpConfig, ListingConfig, ID_PLACEHOLDER};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Hard ceiling imposed by the listing API on `page_limit`
pub const MAX_PAGE_LIMIT: u32 = 50;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_listing_config(&config.listing)?;
    validate_detail_config(&config.detail)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates listing API configuration
fn validate_listing_config(config: &ListingConfig) -> Result<(), ConfigError> {
    if config.api_key.trim().is_empty() {
        return Err(ConfigError::Validation(
            "api_key must be set (config file, --api-key or FRAME_TALLY_API_KEY)".to_string(),
        ));
    }

    validate_http_url(&config.endpoint, "endpoint")?;

    if config.page_limit < 1 || config.page_limit > MAX_PAGE_LIMIT {
        return Err(ConfigError::Validation(format!(
            "page_limit must be between 1 and {}, got {}",
            MAX_PAGE_LIMIT, config.page_limit
        )));
    }

    if config.start_page < 1 {
        return Err(ConfigError::Validation(format!(
            "start_page must be >= 1, got {}",
            config.start_page
        )));
    }

    // The account is capped at 5 requests per second
    if config.window_size < 1 || config.window_size > 4 {
        return Err(ConfigError::Validation(format!(
            "window_size must be between 1 and 4, got {}",
            config.window_size
        )));
    }

    if config.window_pause_ms < 1000 {
        return Err(ConfigError::Validation(format!(
            "window_pause_ms must be >= 1000ms, got {}ms",
            config.window_pause_ms
        )));
    }

    if config.max_windows < 1 {
        return Err(ConfigError::Validation(format!(
            "max_windows must be >= 1, got {}",
            config.max_windows
        )));
    }

    // Every window the run may fetch must stay within u32 page numbers
    let last_window_end = u64::from(config.start_page)
        + u64::from(config.window_size) * u64::from(config.max_windows);
    if last_window_end > u64::from(u32::MAX) {
        return Err(ConfigError::Validation(format!(
            "start_page {} leaves no room for {} windows of {} pages",
            config.start_page, config.max_windows, config.window_size
        )));
    }

    Ok(())
}

/// Validates detail page configuration
fn validate_detail_config(config: &DetailConfig) -> Result<(), ConfigError> {
    validate_template(&config.media_index_template, "media_index_template")?;
    validate_template(&config.title_template, "title_template")?;

    if config.concurrency < 1 || config.concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            config.concurrency
        )));
    }

    Selector::parse(&config.count_selector).map_err(|e| {
        ConfigError::InvalidSelector(format!("'{}': {:?}", config.count_selector, e))
    })?;

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation("user_agent cannot be empty".to_string()));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation("timeout_secs must be >= 1".to_string()));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation("connect_timeout_secs must be >= 1".to_string()));
    }

    Ok(())
}

/// Validates a URL template: must carry `{id}` and expand to an HTTP(S) URL
fn validate_template(template: &str, field: &str) -> Result<(), ConfigError> {
    if !template.contains(ID_PLACEHOLDER) {
        return Err(ConfigError::Validation(format!(
            "{} must contain the {} placeholder, got '{}'",
            field, ID_PLACEHOLDER, template
        )));
    }

    validate_http_url(&template.replace(ID_PLACEHOLDER, "0"), field)
}

/// Validates that a string parses as an HTTP or HTTPS URL
fn validate_http_url(value: &str, field: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    Ok(())
}
