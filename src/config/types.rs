use serde::Deserialize;

/// Placeholder substituted with a movie identifier in URL templates
pub const ID_PLACEHOLDER: &str = "{id}";

/// Main configuration structure for Frame-Tally
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub detail: DetailConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Listing API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Access key sent as the `apikey` query parameter
    #[serde(rename = "api-key")]
    pub api_key: String,

    /// In-theaters listing endpoint (without query string)
    pub endpoint: String,

    /// Movies per listing page (the API caps this at 50)
    #[serde(rename = "page-limit")]
    pub page_limit: u32,

    /// First listing page to request
    #[serde(rename = "start-page")]
    pub start_page: u32,

    /// Listing pages requested concurrently per window
    #[serde(rename = "window-size")]
    pub window_size: u32,

    /// Pause between windows (milliseconds)
    #[serde(rename = "window-pause-ms")]
    pub window_pause_ms: u64,

    /// Hard ceiling on the number of windows per run
    #[serde(rename = "max-windows")]
    pub max_windows: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: "http://api.rottentomatoes.com/api/public/v1.0/lists/movies/in_theaters.json"
                .to_string(),
            page_limit: 50,
            start_page: 1,
            window_size: 4,
            window_pause_ms: 1000,
            max_windows: 50,
        }
    }
}

/// Detail (media index) page configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetailConfig {
    /// URL template for the page that lists a title's images
    #[serde(rename = "media-index-template")]
    pub media_index_template: String,

    /// URL template for the canonical title page written to the report
    #[serde(rename = "title-template")]
    pub title_template: String,

    /// Maximum number of detail requests in flight
    pub concurrency: u32,

    /// CSS selector for the element carrying the "N of M photos" text
    #[serde(rename = "count-selector")]
    pub count_selector: String,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            media_index_template: "http://www.imdb.com/title/tt{id}/mediaindex?ref_=tt_pv_mi_sm"
                .to_string(),
            title_template: "http://www.imdb.com/title/tt{id}".to_string(),
            concurrency: 30,
            count_selector: "#left".to_string(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("frame-tally/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}
