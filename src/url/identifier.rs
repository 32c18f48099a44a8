use crate::movie::MovieIdentifier;
use url::Url;

/// Recovers the movie identifier embedded in a detail page URL
///
/// The digits of the URL's path and query are concatenated in order. The
/// scheme, host and port are skipped so that a numeric host or an explicit
/// port cannot leak into the identifier. Strings that do not parse as a URL
/// are scanned whole.
///
/// # Returns
///
/// * `Some(MovieIdentifier)` - The recovered identifier
/// * `None` - The URL carries no digits outside its authority
///
/// # Examples
///
/// ```
/// use frame_tally::url::recover_identifier;
///
/// let id = recover_identifier("http://www.imdb.com/title/tt1392190/mediaindex?ref_=tt_pv_mi_sm");
/// assert_eq!(id.unwrap().as_str(), "1392190");
/// ```
pub fn recover_identifier(url_str: &str) -> Option<MovieIdentifier> {
    match Url::parse(url_str) {
        Ok(url) => {
            let mut scanned = url.path().to_string();
            if let Some(query) = url.query() {
                scanned.push_str(query);
            }
            MovieIdentifier::from_digits(&scanned)
        }
        Err(_) => MovieIdentifier::from_digits(url_str),
    }
}
