//! Blocking HTTP requests over libcurl.
//!
//! Runs in the current thread; call from `spawn_blocking` when used from
//! async code.

use std::time::Duration;

/// Request method; only what the origin and content-store clients need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone)]
pub(crate) struct Request {
    pub method: Method,
    pub url: String,
    /// Raw `Name: value` header lines.
    pub headers: Vec<String>,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Request {
    pub fn get(url: &str, connect_timeout: Duration, timeout: Duration) -> Self {
        Self {
            method: Method::Get,
            url: url.to_string(),
            headers: Vec::new(),
            connect_timeout,
            timeout,
        }
    }

    pub fn post(url: &str, connect_timeout: Duration, timeout: Duration) -> Self {
        Self {
            method: Method::Post,
            ..Self::get(url, connect_timeout, timeout)
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push(format!("{}: {}", name.trim(), value.trim()));
        self
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Response {
    pub code: u32,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

/// Performs `req` and collects the full response body. Non-2xx statuses are
/// returned as responses, not errors; only transport failures are `Err`.
pub(crate) fn perform(req: &Request) -> Result<Response, curl::Error> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(&req.url)?;
    easy.connect_timeout(req.connect_timeout)?;
    easy.timeout(req.timeout)?;
    match req.method {
        Method::Get => {
            easy.get(true)?;
            easy.follow_location(true)?;
        }
        Method::Post => {
            // Store calls sign an empty body.
            easy.post(true)?;
            easy.post_fields_copy(&[])?;
        }
    }

    if !req.headers.is_empty() {
        let mut list = curl::easy::List::new();
        for h in &req.headers {
            list.append(h)?;
        }
        easy.http_headers(list)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    Ok(Response { code, body })
}
