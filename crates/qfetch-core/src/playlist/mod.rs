//! Playlist parsing and segment resolution.
//!
//! A playlist is line-oriented text: lines starting with `#` are directives,
//! every other non-blank line references one media segment. Each reference is
//! resolved to the URL the content store should pull from and the key it
//! should be stored under, so that the stored layout mirrors the origin.

mod line;

use std::collections::HashMap;
use url::Url;

pub use line::{resolve_line, LineError};

/// One media segment referenced by a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentRef {
    /// Target key in the content store.
    pub key: String,
    /// `scheme://host[:port]` the segment is served from.
    pub origin: String,
    /// Absolute path (plus query, if any) on `origin`.
    pub path: String,
}

impl SegmentRef {
    /// Source URL handed to the content store.
    pub fn url(&self) -> String {
        format!("{}{}", self.origin, self.path)
    }
}

/// Segments of one playlist, deduplicated by key.
#[derive(Debug, Clone, Default)]
pub struct ResolvedPlaylist {
    /// Segments in order of first appearance. When a key repeats (looping
    /// live playlists), the last occurrence's URL wins.
    pub segments: Vec<SegmentRef>,
    /// Origin inferred from the most recent segment line.
    pub segment_origin: Option<String>,
    /// Segment lines dropped because they could not be resolved.
    pub skipped: usize,
}

/// Resolves every segment line of `text` relative to the playlist's own URL
/// and target key. Malformed lines are logged and skipped.
pub fn resolve_segments(text: &str, playlist_url: &Url, playlist_key: &str) -> ResolvedPlaylist {
    let mut resolved = ResolvedPlaylist::default();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let segment = match resolve_line(line, playlist_url, playlist_key) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("invalid segment line {:?} in {}: {}", line, playlist_url, e);
                resolved.skipped += 1;
                continue;
            }
        };

        resolved.segment_origin = Some(segment.origin.clone());
        match index_by_key.get(&segment.key) {
            Some(&i) => resolved.segments[i] = segment,
            None => {
                index_by_key.insert(segment.key.clone(), resolved.segments.len());
                resolved.segments.push(segment);
            }
        }
    }

    resolved
}
