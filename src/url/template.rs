use crate::config::ID_PLACEHOLDER;
use crate::movie::MovieIdentifier;
use crate::UrlError;
use url::Url;

/// Substitutes a movie identifier into a URL template
///
/// # Examples
///
/// ```
/// use frame_tally::movie::MovieIdentifier;
/// use frame_tally::url::expand_template;
///
/// let id = MovieIdentifier::parse("1392190").unwrap();
/// assert_eq!(
///     expand_template("http://www.imdb.com/title/tt{id}", &id),
///     "http://www.imdb.com/title/tt1392190"
/// );
/// ```
pub fn expand_template(template: &str, id: &MovieIdentifier) -> String {
    template.replace(ID_PLACEHOLDER, id.as_str())
}

/// Builds the URL of one listing API page
///
/// Appends `apikey`, `page_limit` and `page` to whatever query the endpoint
/// already carries.
///
/// # Arguments
///
/// * `endpoint` - The listing endpoint
/// * `api_key` - Account access key
/// * `page_limit` - Movies per page
/// * `page` - One-based page number
///
/// # Returns
///
/// * `Ok(Url)` - The page URL
/// * `Err(UrlError)` - The endpoint is not an HTTP(S) URL
pub fn listing_url(
    endpoint: &str,
    api_key: &str,
    page_limit: u32,
    page: u32,
) -> Result<Url, UrlError> {
    let mut url = Url::parse(endpoint).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    url.query_pairs_mut()
        .append_pair("apikey", api_key)
        .append_pair("page_limit", &page_limit.to_string())
        .append_pair("page", &page.to_string());

    Ok(url)
}
