//! Request signing (`QBox` access tokens) and entry encoding.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Access/secret key pair used to sign management requests.
#[derive(Clone)]
pub struct Credentials {
    pub access_key: String,
    secret_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// `access_key:base64url(hmac_sha1(secret_key, data))`.
    pub fn sign(&self, data: &[u8]) -> String {
        let mut mac = HmacSha1::new_from_slice(self.secret_key.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(data);
        let digest = mac.finalize().into_bytes();
        format!("{}:{}", self.access_key, URL_SAFE.encode(digest))
    }

    /// Token for a form request to `path_and_query` with an optional form body.
    pub fn access_token(&self, path_and_query: &str, form_body: &[u8]) -> String {
        let mut data = Vec::with_capacity(path_and_query.len() + 1 + form_body.len());
        data.extend_from_slice(path_and_query.as_bytes());
        data.push(b'\n');
        data.extend_from_slice(form_body);
        self.sign(&data)
    }
}

/// `base64url("bucket:key")`, the entry id used in management paths.
pub fn encode_entry(bucket: &str, key: &str) -> String {
    URL_SAFE.encode(format!("{}:{}", bucket, key))
}
