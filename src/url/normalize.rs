use crate::url::authority;
use crate::{NormalizeResult, Rejected};
use url::{ParseError, Url};

/// Host of the base used to resolve relative link targets
const RESOLUTION_HOST: &str = "relative.invalid";

/// Base used to resolve paths of relative link targets into their encoded form
const RESOLUTION_BASE: &str = "https://relative.invalid/";

/// Reduces a link target found on a page to the canonical path of the page
/// it points at, or rejects it as not part of the site
///
/// # Rules
///
/// 1. Parse the target as a URL reference; reject if malformed
/// 2. Reject targets whose host differs from `domain_host`
/// 3. Reject targets with an empty path (fragment or query only, `mailto:`)
/// 4. Classify by the first character of the path:
///    - `/` → rooted path, used as is
///    - `.` → rejected; dot-relative links are never followed
///    - otherwise → relative to `current_path`
/// 5. Remove the trailing slash (except for root `/`)
///
/// Query strings and fragments never take part in the canonical path.
///
/// # Arguments
///
/// * `domain_host` - The crawled authority (`host` or `host:port`)
/// * `current_path` - Canonical path of the page the link was found on
/// * `raw_target` - The href value, verbatim
///
/// # Examples
///
/// ```
/// use sumi_sitemap::url::normalize;
///
/// assert_eq!(normalize("example.com", "/", "/about/").unwrap(), "/about");
/// assert_eq!(normalize("example.com", "/docs", "intro").unwrap(), "/docs/intro");
/// assert!(normalize("example.com", "/", "https://other.com/x").is_err());
/// ```
pub fn normalize(domain_host: &str, current_path: &str, raw_target: &str) -> NormalizeResult<String> {
    let target = raw_target.trim();
    check_characters(target)?;

    let (host, path) = match Url::parse(target) {
        Ok(url) => absolute_parts(&url)?,
        // Protocol-relative: `//host/path`
        Err(ParseError::RelativeUrlWithoutBase) if target.starts_with("//") => {
            let url = Url::parse(&format!("https:{}", target)).map_err(|e| malformed(target, e))?;
            absolute_parts(&url)?
        }
        Err(ParseError::RelativeUrlWithoutBase) => (None, path_only(target).to_string()),
        Err(e) => return Err(malformed(target, e)),
    };

    if let Some(host) = host {
        if !host.eq_ignore_ascii_case(domain_host) {
            return Err(Rejected::CrossDomain(host));
        }
        // Absolute URLs come back from the parser already encoded and resolved
        return match path.chars().next() {
            None => Err(Rejected::EmptyPath),
            Some(_) => Ok(strip_trailing_slash(&path).to_string()),
        };
    }

    let rooted = match path.chars().next() {
        None => return Err(Rejected::EmptyPath),
        // Browsers read a leading backslash as a slash
        Some('/') | Some('\\') => path,
        Some('.') => return Err(Rejected::RelativeDot),
        Some(_) => join_relative(current_path, &path),
    };

    let resolved = resolve_path(&rooted).map_err(|e| malformed(target, e))?;

    // A backslash after the leading slash reads as `//`, smuggling in an authority
    match authority(&resolved) {
        Some(host) if host == RESOLUTION_HOST || host.eq_ignore_ascii_case(domain_host) => {}
        Some(host) => return Err(Rejected::CrossDomain(host)),
        None => return Err(Rejected::EmptyPath),
    }

    Ok(strip_trailing_slash(resolved.path()).to_string())
}

/// Removes a single trailing `/` from paths longer than one character
///
/// ```
/// use sumi_sitemap::url::strip_trailing_slash;
///
/// assert_eq!(strip_trailing_slash("/foo/"), "/foo");
/// assert_eq!(strip_trailing_slash("/"), "/");
/// ```
pub fn strip_trailing_slash(path: &str) -> &str {
    if path.len() > 1 && path.ends_with('/') {
        &path[..path.len() - 1]
    } else {
        path
    }
}

/// Splits an absolute URL into its authority and path
fn absolute_parts(url: &Url) -> NormalizeResult<(Option<String>, String)> {
    // mailto:, javascript:, data: and friends have no hierarchical path
    if url.cannot_be_a_base() {
        return Err(Rejected::EmptyPath);
    }

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Rejected::UnsupportedScheme(url.scheme().to_string()));
    }

    Ok((authority(url), url.path().to_string()))
}

/// Returns the path part of a relative reference
fn path_only(target: &str) -> &str {
    match target.find(|c: char| c == '?' || c == '#') {
        Some(end) => &target[..end],
        None => target,
    }
}

/// Appends a relative path to the path of the page it was found on
fn join_relative(current_path: &str, path: &str) -> String {
    format!("{}/{}", current_path.trim_end_matches('/'), path)
}

/// Percent-encodes a rooted path the same way absolute URLs are encoded
fn resolve_path(rooted: &str) -> Result<Url, ParseError> {
    Url::parse(RESOLUTION_BASE)?.join(rooted)
}

/// Rejects control characters and broken percent escapes
fn check_characters(target: &str) -> NormalizeResult<()> {
    if target.chars().any(|c| c.is_ascii_control()) {
        return Err(Rejected::MalformedTarget(format!(
            "{:?} contains control characters",
            target
        )));
    }

    let bytes = target.as_bytes();
    for (i, byte) in bytes.iter().enumerate() {
        if *byte != b'%' {
            continue;
        }
        let valid = bytes.len() > i + 2
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit();
        if !valid {
            return Err(Rejected::MalformedTarget(format!(
                "{} contains an invalid percent escape",
                target
            )));
        }
    }

    Ok(())
}

fn malformed(target: &str, error: ParseError) -> Rejected {
    Rejected::MalformedTarget(format!("{}: {}", target, error))
}
