//! One playlist's end-to-end mirror attempt: segments first, playlist last.

use std::sync::Arc;
use url::Url;

use super::context::{Gate, MirrorContext};
use super::outcome::PlaylistOutcome;
use crate::origin;
use crate::playlist::{self, SegmentRef};

/// Typed unit of work for the worker pool.
#[derive(Clone)]
pub struct PlaylistJob {
    pub url: String,
    pub key: String,
    pub ctx: Arc<MirrorContext>,
}

impl PlaylistJob {
    pub async fn run(self) -> PlaylistOutcome {
        fetch_playlist(&self.ctx, &self.url, &self.key).await
    }
}

/// Mirrors every segment of the playlist at `url`, then the playlist itself.
///
/// The playlist is fetched (and recorded) only when every segment is
/// confirmed in the content store. Segment results are recorded individually
/// either way, so the next run only retries what failed.
pub async fn fetch_playlist(ctx: &MirrorContext, url: &str, key: &str) -> PlaylistOutcome {
    let playlist_url = match Url::parse(url) {
        Ok(u) => u,
        Err(e) => {
            tracing::error!("invalid playlist url {}: {}", url, e);
            return PlaylistOutcome::Unavailable(e.to_string());
        }
    };

    let text = match origin::fetch_text(url, &ctx.http).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("get playlist {} error: {:#}", url, e);
            return PlaylistOutcome::Unavailable(format!("{:#}", e));
        }
    };

    let resolved = playlist::resolve_segments(&text, &playlist_url, key);
    tracing::debug!(
        segments = resolved.segments.len(),
        skipped = resolved.skipped,
        origin = resolved.segment_origin.as_deref().unwrap_or(""),
        "resolved playlist {}",
        url
    );

    let total = resolved.segments.len();
    let mut failed = 0usize;
    for segment in &resolved.segments {
        if !fetch_segment(ctx, segment).await {
            failed += 1;
        }
    }
    if failed > 0 {
        tracing::error!("fetch segments of playlist {} has {} errors", url, failed);
        return PlaylistOutcome::SegmentsFailed { failed, total };
    }

    tracing::info!("fetch playlist {} => {} doing", url, key);
    match ctx.store.fetch(&ctx.bucket, key, url).await {
        Ok(_) => {
            tracing::info!("fetch playlist {} => {} success", url, key);
            ctx.record_succeeded(url, key).await;
            PlaylistOutcome::Done { segments: total }
        }
        Err(e) if e.is_not_found() => {
            tracing::error!("fetch playlist {} error: {}", url, e);
            ctx.record_not_found(url, key).await;
            PlaylistOutcome::NotFound
        }
        Err(e) => {
            tracing::error!("fetch playlist {} error: {}", url, e);
            PlaylistOutcome::Failed(e.to_string())
        }
    }
}

/// Returns true if the segment is (now) in the content store.
async fn fetch_segment(ctx: &MirrorContext, segment: &SegmentRef) -> bool {
    let url = segment.url();
    if ctx.gate_segment(&url, &segment.key).await != Gate::Fetch {
        return true;
    }

    tracing::info!("fetch segment {} => {} doing", url, segment.key);
    match ctx.store.fetch(&ctx.bucket, &segment.key, &url).await {
        Ok(_) => {
            tracing::info!("fetch segment {} => {} success", url, segment.key);
            ctx.record_succeeded(&url, &segment.key).await;
            true
        }
        Err(e) => {
            tracing::error!("fetch segment {} error: {}", url, e);
            false
        }
    }
}
