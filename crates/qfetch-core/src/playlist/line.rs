//! Resolution of a single segment line under the three addressing forms.

use std::fmt;
use url::Url;

use crate::url_model::{self, key_from_path, origin_of};

/// Why a segment line could not be resolved.
#[derive(Debug)]
pub enum LineError {
    /// Absolute reference that does not parse as a URL.
    InvalidUrl(url::ParseError),
    /// Relative reference that yields an invalid URL once joined to the origin.
    InvalidJoin(url::ParseError),
    /// Reference that resolves to an empty storage key.
    EmptyKey,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineError::InvalidUrl(e) => write!(f, "invalid segment url: {}", e),
            LineError::InvalidJoin(e) => write!(f, "invalid resolved url: {}", e),
            LineError::EmptyKey => write!(f, "empty segment key"),
        }
    }
}

impl std::error::Error for LineError {}

/// Resolves one (trimmed, non-comment) playlist line.
///
/// - `http(s)://…`: used as written (minus fragment); key is the URL path.
/// - `/…`: served from the playlist's origin; key is the line itself.
/// - anything else: relative to the playlist's directory for the URL and to
///   the playlist key's directory for the key.
pub fn resolve_line(
    line: &str,
    playlist_url: &Url,
    playlist_key: &str,
) -> Result<super::SegmentRef, LineError> {
    let segment = if url_model::is_absolute_http(line) {
        Url::parse(line).map_err(LineError::InvalidUrl)?;
        let (origin, path) = split_absolute(line);
        super::SegmentRef {
            key: key_from_path(strip_query(&path)),
            origin: origin.to_string(),
            path,
        }
    } else if line.starts_with('/') {
        super::SegmentRef {
            key: key_from_path(strip_query(line)),
            origin: origin_of(playlist_url),
            path: line.to_string(),
        }
    } else {
        let url_dir = url_dir(playlist_url.path());
        let path = if url_dir.is_empty() {
            format!("/{}", line)
        } else {
            format!("/{}/{}", url_dir, line)
        };

        let name = key_from_path(strip_query(line));
        let key = match key_dir(playlist_key) {
            Some(dir) => format!("{}/{}", dir, name),
            None => name,
        };

        super::SegmentRef {
            key,
            origin: origin_of(playlist_url),
            path,
        }
    };

    if segment.key.is_empty() {
        return Err(LineError::EmptyKey);
    }
    Url::parse(&segment.url()).map_err(LineError::InvalidJoin)?;
    Ok(segment)
}

/// Splits an absolute line into `scheme://authority` and path plus query,
/// exactly as written. The fragment is dropped; an empty path becomes `/`.
fn split_absolute(line: &str) -> (&str, String) {
    let line = line.split('#').next().unwrap_or(line);
    let start = line.find("://").map(|i| i + 3).unwrap_or(0);
    let end = line[start..]
        .find(['/', '?'])
        .map(|i| start + i)
        .unwrap_or(line.len());
    let rest = &line[end..];
    let path = if rest.starts_with('/') {
        rest.to_string()
    } else {
        format!("/{}", rest)
    };
    (&line[..end], path)
}

/// Directory of a URL path without leading or trailing slashes
/// (`/a/b/index.m3u8` → `a/b`, `/p.m3u8` → ``).
fn url_dir(path: &str) -> &str {
    let dir = path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
    dir.trim_start_matches('/')
}

/// Directory part of a target key, if any (`shows/a/index.m3u8` → `shows/a`).
fn key_dir(key: &str) -> Option<&str> {
    key.rfind('/')
        .map(|i| &key[..i])
        .filter(|dir| !dir.is_empty())
}

/// Drops the query and fragment of a relative reference.
fn strip_query(line: &str) -> &str {
    line.split(['?', '#']).next().unwrap_or(line)
}
