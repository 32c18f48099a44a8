//! Detail page extraction
//!
//! Turns one fetched media index page into an image count record:
//! - Identifier recovered from the requested URL
//! - Canonical title URL built from the title template
//! - Image count read from the "N of M photos" element

use crate::config::DetailConfig;
use crate::crawler::fetcher::FetchedPage;
use crate::output::ImageCountRecord;
use crate::url::{expand_template, recover_identifier};
use crate::{ConfigError, TallyError};
use scraper::{Html, Selector};

/// Extracts image count records from media index pages
#[derive(Debug, Clone)]
pub struct Extractor {
    title_template: String,
    count_selector: Selector,
}

impl Extractor {
    /// Builds an extractor from detail configuration
    ///
    /// # Errors
    ///
    /// * `ConfigError::InvalidSelector` - The count selector does not parse
    pub fn new(config: &DetailConfig) -> Result<Self, ConfigError> {
        let count_selector = Selector::parse(&config.count_selector).map_err(|e| {
            ConfigError::InvalidSelector(format!("'{}': {:?}", config.count_selector, e))
        })?;

        Ok(Self {
            title_template: config.title_template.clone(),
            count_selector,
        })
    }

    /// Derives the record for one fetched page
    ///
    /// The identifier comes from the URL that was requested, not the one
    /// that answered, so redirects do not change it. A page without the
    /// count element has a count of 0.
    ///
    /// # Errors
    ///
    /// * `TallyError::MissingIdentifier` - The requested URL has no digits
    ///
    /// # Example
    ///
    /// ```
    /// use frame_tally::config::DetailConfig;
    /// use frame_tally::crawler::{Extractor, FetchedPage};
    ///
    /// let extractor = Extractor::new(&DetailConfig::default()).unwrap();
    /// let page = FetchedPage {
    ///     url: "http://www.imdb.com/title/tt1392190/mediaindex".to_string(),
    ///     final_url: "http://www.imdb.com/title/tt1392190/mediaindex".to_string(),
    ///     status_code: 200,
    ///     body: r#"<div id="left">Showing 1-12 of 12 photos</div>"#.to_string(),
    /// };
    ///
    /// let record = extractor.extract(&page).unwrap();
    /// assert_eq!(record.imdb_id.as_str(), "1392190");
    /// assert_eq!(record.count, 12);
    /// ```
    pub fn extract(&self, page: &FetchedPage) -> Result<ImageCountRecord, TallyError> {
        let imdb_id = recover_identifier(&page.url).ok_or_else(|| {
            TallyError::MissingIdentifier {
                url: page.url.clone(),
            }
        })?;

        if page.final_url != page.url {
            tracing::debug!("{} redirected to {}", page.url, page.final_url);
        }

        let url = expand_template(&self.title_template, &imdb_id);
        let count = self.image_count(&page.body, &page.url);

        Ok(ImageCountRecord {
            imdb_id,
            url,
            count,
        })
    }

    /// Reads the image count from the first element matching the selector
    fn image_count(&self, html: &str, page_url: &str) -> u64 {
        let document = Html::parse_document(html);

        let Some(element) = document.select(&self.count_selector).next() else {
            return 0;
        };

        let text = element.text().collect::<String>();
        match parse_count(&text) {
            Some(count) => count,
            None => {
                tracing::warn!(
                    "Unreadable image count {:?} on {}, recording 0",
                    text.trim(),
                    page_url
                );
                0
            }
        }
    }
}

/// Parses the second-to-last whitespace-separated token as a count
///
/// Thousands separators are ignored, so "1-48 of 1,024 photos" reads as 1024.
fn parse_count(text: &str) -> Option<u64> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < 2 {
        return None;
    }

    tokens[tokens.len() - 2].replace(',', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> Extractor {
        Extractor::new(&DetailConfig::default()).unwrap()
    }

    fn page(url: &str, body: &str) -> FetchedPage {
        FetchedPage {
            url: url.to_string(),
            final_url: url.to_string(),
            status_code: 200,
            body: body.to_string(),
        }
    }

    const MEDIA_URL: &str = "http://www.imdb.com/title/tt1392190/mediaindex?ref_=tt_pv_mi_sm";

    #[test]
    fn test_count_from_photos_element() {
        let body = r#"<html><body><div id="left">Showing 1-12 of 12 photos</div></body></html>"#;
        let record = extractor().extract(&page(MEDIA_URL, body)).unwrap();

        assert_eq!(record.count, 12);
        assert_eq!(record.imdb_id.as_str(), "1392190");
        assert_eq!(record.url, "http://www.imdb.com/title/tt1392190");
    }

    #[test]
    fn test_missing_element_counts_zero() {
        let body = r#"<html><body><div id="main">No photos yet</div></body></html>"#;
        let record = extractor().extract(&page(MEDIA_URL, body)).unwrap();
        assert_eq!(record.count, 0);
    }

    #[test]
    fn test_first_match_wins() {
        let body = r#"<div id="left">1-48 of 143 photos</div><div id="left">1-1 of 9 photos</div>"#;
        let record = extractor().extract(&page(MEDIA_URL, body)).unwrap();
        assert_eq!(record.count, 143);
    }

    #[test]
    fn test_nested_markup_and_whitespace() {
        let body = "<div id=\"left\">\n  1-48 of <span>2,310</span>\n  photos\n</div>";
        let record = extractor().extract(&page(MEDIA_URL, body)).unwrap();
        assert_eq!(record.count, 2310);
    }

    #[test]
    fn test_unreadable_count_is_zero() {
        let body = r#"<div id="left">photos</div>"#;
        let record = extractor().extract(&page(MEDIA_URL, body)).unwrap();
        assert_eq!(record.count, 0);

        let body = r#"<div id="left">many many photos</div>"#;
        let record = extractor().extract(&page(MEDIA_URL, body)).unwrap();
        assert_eq!(record.count, 0);
    }

    #[test]
    fn test_identifier_ignores_redirect_target() {
        let mut fetched = page(MEDIA_URL, "<html></html>");
        fetched.final_url = "http://www.imdb.com/title/tt9999999/mediaindex".to_string();

        let record = extractor().extract(&fetched).unwrap();
        assert_eq!(record.imdb_id.as_str(), "1392190");
    }

    #[test]
    fn test_url_without_digits_is_an_error() {
        let result = extractor().extract(&page("http://www.imdb.com/title/mediaindex", ""));
        assert!(matches!(result, Err(TallyError::MissingIdentifier { .. })));
    }

    #[test]
    fn test_custom_selector() {
        let config = DetailConfig {
            count_selector: "span.count".to_string(),
            ..Default::default()
        };
        let extractor = Extractor::new(&config).unwrap();
        let body = r#"<span class="count">of 31 images</span>"#;

        let record = extractor.extract(&page(MEDIA_URL, body)).unwrap();
        assert_eq!(record.count, 31);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("Showing 1-12 of 12 photos"), Some(12));
        assert_eq!(parse_count("12 photos"), Some(12));
        assert_eq!(parse_count("photos"), None);
        assert_eq!(parse_count("of -3 photos"), None);
        assert_eq!(parse_count(""), None);
    }
}
