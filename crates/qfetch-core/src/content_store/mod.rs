//! Remote content store: the service that pulls source URLs into bucket keys.
//!
//! The mirror never transfers segment bytes itself; it only asks the store
//! whether a key exists (`stat`) and tells it to pull a URL into a key
//! (`fetch`). Implementations must be safe to share across workers.

mod auth;
mod error;
mod qiniu;

use async_trait::async_trait;
use serde::Deserialize;

pub use auth::{encode_entry, Credentials};
pub use error::StoreError;
pub use qiniu::QiniuStore;

/// Metadata of a stored entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryStat {
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub fsize: i64,
    #[serde(default, rename = "mimeType")]
    pub mime_type: Option<String>,
    #[serde(default, rename = "putTime")]
    pub put_time: Option<i64>,
}

/// Result of a successful remote fetch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchResult {
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub fsize: Option<i64>,
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Looks up `key` in `bucket`.
    async fn stat(&self, bucket: &str, key: &str) -> Result<EntryStat, StoreError>;

    /// Instructs the store to pull `source_url` into `key`.
    async fn fetch(&self, bucket: &str, key: &str, source_url: &str)
        -> Result<FetchResult, StoreError>;
}

/// True if `key` already holds a non-empty entry. Any stat error counts as absent.
pub async fn exists_remotely(store: &dyn ContentStore, bucket: &str, key: &str) -> bool {
    match store.stat(bucket, key).await {
        Ok(entry) => !entry.hash.is_empty(),
        Err(e) => {
            tracing::debug!("stat {}:{} -> {}", bucket, key, e);
            false
        }
    }
}
