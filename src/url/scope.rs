use url::Url;

/// Extracts the host from a URL
///
/// The `url` parser already lowercases hosts of special schemes; the extra
/// lowercase keeps the helper safe for any URL handed to it.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitegrep::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// The authority a crawl is confined to
///
/// Built once from the seed of a crawl and never recomputed, so neither
/// cross-host links nor redirects can widen it. A URL is in scope when its
/// scheme is `http` or `https` and its host and effective port (explicit, or
/// the scheme default) both equal the seed's.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OriginScope {
    host: String,
    port: Option<u16>,
}

impl OriginScope {
    /// Builds the scope from a normalized seed URL
    ///
    /// Returns `None` if the URL has no host.
    pub fn from_url(url: &Url) -> Option<Self> {
        let host = extract_host(url)?;
        Some(Self {
            host,
            port: url.port_or_known_default(),
        })
    }

    /// Returns true if `url` may be crawled under this scope
    pub fn contains(&self, url: &Url) -> bool {
        if url.scheme() != "http" && url.scheme() != "https" {
            return false;
        }

        extract_host(url).as_deref() == Some(self.host.as_str())
            && url.port_or_known_default() == self.port
    }

    /// The host this scope is bound to
    pub fn host(&self) -> &str {
        &self.host
    }
}

impl std::fmt::Display for OriginScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}:{}", self.host, port),
            None => write!(f, "{}", self.host),
        }
    }
}
