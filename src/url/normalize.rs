use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes a URL into the form used as a visited-set and index key
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace and parse; reject if malformed
/// 2. Require an `http` or `https` scheme
/// 3. Require a host
/// 4. Remove the fragment (everything after #)
///
/// Host lowercasing, default-port removal, dot-segment removal and the
/// empty-path-to-`/` rule are applied by the `url` parser itself.
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - Failed to parse or normalize the URL
///
/// # Examples
///
/// ```
/// use sitegrep::url::normalize_url;
///
/// let url = normalize_url("https://EXAMPLE.com/a/../page#top").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
/// ```
pub fn normalize_url(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    finish(url)
}

/// Resolves a raw href against the crawl base and normalizes the result
///
/// Returns `None` when the href should not produce a crawl attempt:
/// - empty or whitespace-only hrefs
/// - the bare anchor `#`
/// - hrefs that cannot be joined onto the base
/// - results that are not `http`/`https` URLs with a host
///   (`mailto:`, `javascript:`, `data:` and similar)
///
/// Fragment-only hrefs such as `#section` are not special-cased: they
/// resolve to the base page itself, which the crawler has already visited.
///
/// # Examples
///
/// ```
/// use sitegrep::url::resolve_href;
/// use url::Url;
///
/// let base = Url::parse("https://example.com").unwrap();
/// let resolved = resolve_href(&base, "/about").unwrap();
/// assert_eq!(resolved.as_str(), "https://example.com/about");
/// assert!(resolve_href(&base, "#").is_none());
/// ```
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href == "#" {
        return None;
    }

    let joined = base.join(href).ok()?;
    finish(joined).ok()
}

fn finish(mut url: Url) -> UrlResult<Url> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url)
}
