//! URL modeling for storage keys and origins.
//!
//! Storage keys mirror origin layout: a URL's path with the leading slash
//! stripped. Origins are `scheme://host[:port]`, used to rebuild segment URLs
//! from root- or playlist-relative references.

mod path;

pub use path::{key_from_path, key_from_url, origin_of};

/// Returns true if `line` is an absolute HTTP(S) reference.
pub fn is_absolute_http(line: &str) -> bool {
    line.starts_with("http://") || line.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_http_prefixes() {
        assert!(is_absolute_http("http://cdn.example.com/a.ts"));
        assert!(is_absolute_http("https://cdn.example.com/a.ts"));
        assert!(!is_absolute_http("/a.ts"));
        assert!(!is_absolute_http("a.ts"));
        assert!(!is_absolute_http("ftp://host/a.ts"));
        assert!(!is_absolute_http("HTTP://host/a.ts"));
    }
}
