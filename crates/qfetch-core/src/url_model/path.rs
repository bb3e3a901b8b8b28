//! Key and origin extraction from parsed URLs.

use url::Url;

/// Storage key for a URL path: percent-decoded, leading slash stripped.
///
/// Invalid UTF-8 escapes are kept as written.
pub fn key_from_path(path: &str) -> String {
    let decoded = urlencoding::decode(path)
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| path.to_string());
    match decoded.strip_prefix('/') {
        Some(rest) => rest.to_string(),
        None => decoded,
    }
}

/// Parses `url` and derives its storage key from the path.
pub fn key_from_url(url: &str) -> Result<String, url::ParseError> {
    let parsed = Url::parse(url)?;
    Ok(key_from_path(parsed.path()))
}

/// `scheme://host[:port]` of a parsed URL (userinfo, path and query dropped).
pub fn origin_of(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    }
}
