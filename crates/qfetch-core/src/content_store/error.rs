//! Content-store error type and status classification.

use thiserror::Error;

/// Error returned by a content-store call.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store answered with a non-2xx status.
    #[error("HTTP {code}: {message}")]
    Http { code: u32, message: String },
    /// The request never got a response (DNS, connect, timeout, ...).
    #[error("transport: {0}")]
    Transport(#[from] curl::Error),
    /// 2xx response whose body could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// The blocking request task failed to complete.
    #[error("request task: {0}")]
    Task(String),
}

impl StoreError {
    /// Status code carried by the error, if the store answered at all.
    pub fn code(&self) -> Option<u32> {
        match self {
            StoreError::Http { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The only status given special handling: the source does not exist.
    pub fn is_not_found(&self) -> bool {
        self.code() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(code: u32) -> StoreError {
        StoreError::Http {
            code,
            message: "x".to_string(),
        }
    }

    #[test]
    fn only_404_is_not_found() {
        assert!(http(404).is_not_found());
        assert!(!http(478).is_not_found());
        assert!(!http(500).is_not_found());
        assert!(!http(612).is_not_found());
        assert!(!StoreError::InvalidResponse("eof".into()).is_not_found());
    }

    #[test]
    fn code_only_for_http_errors() {
        assert_eq!(http(503).code(), Some(503));
        assert_eq!(StoreError::Task("cancelled".into()).code(), None);
    }

    #[test]
    fn display_includes_status_and_message() {
        let e = StoreError::Http {
            code: 404,
            message: "resource not found".to_string(),
        };
        assert_eq!(e.to_string(), "HTTP 404: resource not found");
    }
}
