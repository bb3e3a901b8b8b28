//! Qiniu-compatible content store over the RS (stat) and IO (fetch) APIs.

use anyhow::Result;
use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use serde::Deserialize;
use std::time::Duration;

use super::auth::{encode_entry, Credentials};
use super::{ContentStore, EntryStat, FetchResult, StoreError};
use crate::config::{HttpConfig, StoreConfig};
use crate::http::{self, Request};

/// Error body returned by the store on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Store client. Holds no connection state, so one instance is shared by all workers.
#[derive(Debug, Clone)]
pub struct QiniuStore {
    creds: Credentials,
    rs_host: String,
    io_host: String,
    connect_timeout: Duration,
    timeout: Duration,
}

impl QiniuStore {
    pub fn new(store: &StoreConfig, http: &HttpConfig) -> Result<Self> {
        if store.access_key.is_empty() || store.secret_key.is_empty() {
            anyhow::bail!("content store access key and secret key are required");
        }
        Ok(Self {
            creds: Credentials::new(&store.access_key, &store.secret_key),
            rs_host: store.rs_host.trim_end_matches('/').to_string(),
            io_host: store.io_host.trim_end_matches('/').to_string(),
            connect_timeout: http.connect_timeout(),
            timeout: http.store_timeout(),
        })
    }

    /// Signed, empty-bodied form POST to `host` + `path`; returns the 2xx body.
    async fn call(&self, host: &str, path: &str) -> Result<Vec<u8>, StoreError> {
        let token = self.creds.access_token(path, b"");
        let req = Request::post(
            &format!("{}{}", host, path),
            self.connect_timeout,
            self.timeout,
        )
        .header("Authorization", &format!("QBox {}", token))
        .header("Content-Type", "application/x-www-form-urlencoded");

        let resp = tokio::task::spawn_blocking(move || http::perform(&req))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))??;

        if !resp.is_success() {
            return Err(StoreError::Http {
                code: resp.code,
                message: error_message(&resp.body),
            });
        }
        Ok(resp.body)
    }
}

/// The JSON `error` field if present, otherwise the raw body.
fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(b) => b.error,
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    }
}

#[async_trait]
impl ContentStore for QiniuStore {
    async fn stat(&self, bucket: &str, key: &str) -> Result<EntryStat, StoreError> {
        let path = format!("/stat/{}", encode_entry(bucket, key));
        let body = self.call(&self.rs_host, &path).await?;
        serde_json::from_slice(&body).map_err(|e| StoreError::InvalidResponse(e.to_string()))
    }

    async fn fetch(
        &self,
        bucket: &str,
        key: &str,
        source_url: &str,
    ) -> Result<FetchResult, StoreError> {
        let path = format!(
            "/fetch/{}/to/{}",
            URL_SAFE.encode(source_url),
            encode_entry(bucket, key)
        );
        let body = self.call(&self.io_host, &path).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(FetchResult::default());
        }
        serde_json::from_slice(&body).map_err(|e| StoreError::InvalidResponse(e.to_string()))
    }
}
