//! Playlist download from its origin server.
//!
//! The playlist text is the only content fetched locally; segments are
//! pulled by the content store itself.

use anyhow::{Context, Result};

use crate::config::HttpConfig;
use crate::http::{self, Request};

/// GETs `url` (following redirects) and returns the body as text.
/// Invalid UTF-8 is replaced rather than rejected.
pub async fn fetch_text(url: &str, cfg: &HttpConfig) -> Result<String> {
    let req = Request::get(url, cfg.connect_timeout(), cfg.playlist_timeout());
    let resp = tokio::task::spawn_blocking(move || http::perform(&req))
        .await
        .context("playlist request task join")?
        .with_context(|| format!("get playlist {}", url))?;

    if !resp.is_success() {
        anyhow::bail!("get playlist {} returned HTTP {}", url, resp.code);
    }
    Ok(String::from_utf8_lossy(&resp.body).into_owned())
}
