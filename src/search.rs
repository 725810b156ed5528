use crate::error::FetchError;
use scraper::{Html, Selector};
use url::Url;

/// Search endpoint queried for result discovery
pub const SEARCH_ENDPOINT: &str = "https://www.google.com/search";

/// Builds the search URL asking for `num_results` hits for `query`
pub fn search_url(query: &str, num_results: usize) -> Result<Url, FetchError> {
    let num = num_results.to_string();
    Url::parse_with_params(SEARCH_ENDPOINT, &[("q", query), ("num", num.as_str())]).map_err(
        |source| FetchError::InvalidUrl {
            url: SEARCH_ENDPOINT.to_string(),
            source,
        },
    )
}

/// Pulls result URLs out of a search results page.
///
/// Looks at the first `num_results` result blocks (`div.g`), takes the first
/// link of each, resolves it against `search_url` and keeps it if it points
/// at an http(s) page off the search engine's own host. Redirect wrappers of
/// the form `/url?q=<target>` are unwrapped to their target.
pub fn parse_result_links(html: &str, search_url: &Url, num_results: usize) -> Vec<String> {
    let doc = Html::parse_document(html);
    let (Ok(result_selector), Ok(anchor_selector)) =
        (Selector::parse("div.g"), Selector::parse("a[href]"))
    else {
        return Vec::new();
    };

    let urls = doc
        .select(&result_selector)
        .take(num_results)
        .filter_map(|block| block.select(&anchor_selector).next())
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(|href| search_url.join(href).ok())
        .map(unwrap_redirect)
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .filter(|url| url.host_str() != search_url.host_str())
        .map(String::from)
        .collect::<Vec<_>>();

    ::log::debug!("Search page yielded {} result URLs", urls.len());
    urls
}

/// Replaces a `/url?q=<target>` redirect wrapper with its target
fn unwrap_redirect(url: Url) -> Url {
    if url.path() != "/url" {
        return url;
    }

    let target = url
        .query_pairs()
        .find(|(key, _)| key == "q")
        .and_then(|(_, target)| Url::parse(&target).ok());
    target.unwrap_or(url)
}
