//! Shared per-run state and the skip gates.

use std::sync::Arc;

use crate::config::HttpConfig;
use crate::content_store::{self, ContentStore};
use crate::progress_db::{JobStores, ProgressStore};

/// Result of gating a playlist or segment before fetching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Succeeded store already maps this URL to this key.
    AlreadyDone,
    /// Not-found store already maps this URL to this key (playlists only).
    ConfirmedAbsent,
    /// The content store already holds the key; success was recorded.
    ExistsRemotely,
    /// Needs a remote fetch.
    Fetch,
}

/// Everything a job needs, shared by the dispatcher and all workers.
///
/// The progress stores and content store handle their own concurrency;
/// no extra locking is layered on top.
pub struct MirrorContext {
    pub bucket: String,
    pub check_exists: bool,
    pub store: Arc<dyn ContentStore>,
    pub progress: JobStores,
    pub http: HttpConfig,
}

impl MirrorContext {
    /// Dispatcher-side gate for a playlist.
    pub async fn gate_playlist(&self, url: &str, key: &str) -> Gate {
        if recorded(&self.progress.succeeded, url, key).await {
            tracing::info!("skip playlist fetched {} => {}", url, key);
            return Gate::AlreadyDone;
        }
        if recorded(&self.progress.not_found, url, key).await {
            tracing::info!("skip playlist 404 {} => {}", url, key);
            return Gate::ConfirmedAbsent;
        }
        if self.exists_remotely(url, key).await {
            tracing::info!("skip playlist exists {} => {}", url, key);
            return Gate::ExistsRemotely;
        }
        Gate::Fetch
    }

    /// Worker-side gate for a segment. Segments are never recorded as absent.
    pub async fn gate_segment(&self, url: &str, key: &str) -> Gate {
        if recorded(&self.progress.succeeded, url, key).await {
            tracing::info!("skip segment fetched {} => {}", url, key);
            return Gate::AlreadyDone;
        }
        if self.exists_remotely(url, key).await {
            tracing::info!("skip segment exists {} => {}", url, key);
            return Gate::ExistsRemotely;
        }
        Gate::Fetch
    }

    /// With existence checks on, a non-empty remote entry counts as success.
    async fn exists_remotely(&self, url: &str, key: &str) -> bool {
        if !self.check_exists {
            return false;
        }
        if !content_store::exists_remotely(self.store.as_ref(), &self.bucket, key).await {
            return false;
        }
        record(&self.progress.succeeded, url, key).await;
        true
    }

    pub(crate) async fn record_succeeded(&self, url: &str, key: &str) {
        record(&self.progress.succeeded, url, key).await;
    }

    pub(crate) async fn record_not_found(&self, url: &str, key: &str) {
        record(&self.progress.not_found, url, key).await;
    }
}

/// Exact URL + key match. A failed read counts as "not recorded": the worst
/// case is a redundant remote fetch.
async fn recorded(store: &ProgressStore, url: &str, key: &str) -> bool {
    match store.is_recorded(url, key).await {
        Ok(hit) => hit,
        Err(e) => {
            tracing::warn!("read progress for {} failed: {:#}", url, e);
            false
        }
    }
}

async fn record(store: &ProgressStore, url: &str, key: &str) {
    if let Err(e) = store.put(url, key).await {
        tracing::warn!("write progress {} => {} failed: {:#}", url, key, e);
    }
}
