//! Recording content store for integration tests.

use async_trait::async_trait;
use qfetch_core::content_store::{ContentStore, EntryStat, FetchResult, StoreError};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Stat { key: String },
    Fetch { key: String, url: String },
}

/// In-memory store: successful fetches add the key; `fail_urls` makes
/// fetches of a source URL fail with the given status code.
#[derive(Default)]
pub struct MockStore {
    existing: Mutex<HashSet<String>>,
    fail_urls: Mutex<HashMap<String, u32>>,
    calls: Mutex<Vec<Call>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    delay: Duration,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each fetch sleeps for `delay` so concurrent jobs overlap.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn add_existing(&self, key: &str) {
        self.existing.lock().unwrap().insert(key.to_string());
    }

    pub fn fail_url(&self, url: &str, code: u32) {
        self.fail_urls.lock().unwrap().insert(url.to_string(), code);
    }

    pub fn clear_failures(&self) {
        self.fail_urls.lock().unwrap().clear();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Source URLs of every fetch, in call order.
    pub fn fetched_urls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Fetch { url, .. } => Some(url),
                Call::Stat { .. } => None,
            })
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentStore for MockStore {
    async fn stat(&self, _bucket: &str, key: &str) -> Result<EntryStat, StoreError> {
        self.calls.lock().unwrap().push(Call::Stat {
            key: key.to_string(),
        });
        if self.existing.lock().unwrap().contains(key) {
            Ok(EntryStat {
                hash: "Fmock".to_string(),
                fsize: 1,
                ..EntryStat::default()
            })
        } else {
            Err(StoreError::Http {
                code: 612,
                message: "no such file or directory".to_string(),
            })
        }
    }

    async fn fetch(
        &self,
        _bucket: &str,
        key: &str,
        source_url: &str,
    ) -> Result<FetchResult, StoreError> {
        self.calls.lock().unwrap().push(Call::Fetch {
            key: key.to_string(),
            url: source_url.to_string(),
        });

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let failure = self.fail_urls.lock().unwrap().get(source_url).copied();
        if let Some(code) = failure {
            return Err(StoreError::Http {
                code,
                message: format!("mock failure {}", code),
            });
        }
        self.existing.lock().unwrap().insert(key.to_string());
        Ok(FetchResult {
            hash: Some("Fmock".to_string()),
            key: Some(key.to_string()),
            fsize: Some(1),
        })
    }
}
