use crate::config::Scheme;
use crate::ConfigError;
use url::Url;

/// Extracts the authority (`host` or `host:port`) from a URL
///
/// The host is lowercased. Default ports for the URL's scheme are omitted,
/// so `https://example.com:443/` and `https://example.com/` agree.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_sitemap::url::authority;
///
/// let url = Url::parse("https://EXAMPLE.com/path").unwrap();
/// assert_eq!(authority(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(authority(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}

/// Validates the domain a crawl is pointed at
///
/// The domain must be bare: a host with an optional port, without scheme,
/// path, query or credentials. A port that is the default for `scheme` is
/// dropped, matching how same-site links are compared.
///
/// # Returns
///
/// * `Ok(String)` - The lowercased authority to crawl
/// * `Err(ConfigError::InvalidDomain)` - The argument is not a bare domain
pub fn validate_domain(input: &str, scheme: Scheme) -> Result<String, ConfigError> {
    let domain = input.trim();

    if domain.is_empty() {
        return Err(ConfigError::InvalidDomain(
            "domain cannot be empty".to_string(),
        ));
    }

    if domain.contains("://") {
        return Err(ConfigError::InvalidDomain(format!(
            "'{}' includes a scheme; pass the bare domain, e.g. example.com",
            domain
        )));
    }

    if domain
        .chars()
        .any(|c| matches!(c, '/' | '?' | '#' | '@') || c.is_whitespace())
    {
        return Err(ConfigError::InvalidDomain(format!(
            "'{}' must be a host with an optional port, nothing else",
            domain
        )));
    }

    let url = Url::parse(&format!("{}://{}/", scheme, domain))
        .map_err(|e| ConfigError::InvalidDomain(format!("'{}': {}", domain, e)))?;

    authority(&url).ok_or_else(|| ConfigError::InvalidDomain(format!("'{}' has no host", domain)))
}

/// Builds the URL requested for `path` on `domain`
pub fn page_url(scheme: Scheme, domain: &str, path: &str) -> String {
    format!("{}://{}{}", scheme, domain, path)
}
