//! `qfetch resolve <url>` – print the segment keys a playlist resolves to,
//! without touching the content store.

use anyhow::{Context, Result};
use qfetch_core::config::QfetchConfig;
use qfetch_core::{origin, playlist, url_model};
use url::Url;

pub async fn run_resolve(cfg: &QfetchConfig, url: &str, key: Option<&str>) -> Result<()> {
    let parsed = Url::parse(url).with_context(|| format!("invalid playlist url {url}"))?;
    let key = match key {
        Some(k) => k.to_string(),
        None => url_model::key_from_url(url)?,
    };

    let text = origin::fetch_text(url, &cfg.http).await?;
    let resolved = playlist::resolve_segments(&text, &parsed, &key);

    for seg in &resolved.segments {
        println!("{}\t{}", seg.key, seg.url());
    }
    if resolved.skipped > 0 {
        eprintln!("{} segment line(s) could not be resolved", resolved.skipped);
    }
    Ok(())
}
