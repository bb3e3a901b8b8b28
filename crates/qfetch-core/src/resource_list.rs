//! Resource list: one playlist per line, `URL` or `URL<TAB>TargetKey`.

use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::url_model;

/// One playlist to mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub url: String,
    /// Explicit target key, or the URL path without its leading slash.
    pub key: String,
}

/// A non-blank line that does not describe a usable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidLine {
    /// Not one or two tab-separated fields.
    FieldCount(usize),
    /// Single-field line whose URL does not parse.
    BadUrl(String),
    /// Key is empty (explicit or derived).
    EmptyKey,
    /// Line bytes are not valid UTF-8.
    NotUtf8,
}

impl fmt::Display for InvalidLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidLine::FieldCount(n) => write!(f, "expected 1 or 2 fields, got {}", n),
            InvalidLine::BadUrl(e) => write!(f, "invalid resource url: {}", e),
            InvalidLine::EmptyKey => write!(f, "empty target key"),
            InvalidLine::NotUtf8 => write!(f, "line is not valid UTF-8"),
        }
    }
}

impl std::error::Error for InvalidLine {}

/// Parses one line of the list. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ResourceEntry>, InvalidLine> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split('\t').collect();
    let (url, key) = match fields.as_slice() {
        [url] => {
            let key =
                url_model::key_from_url(url).map_err(|e| InvalidLine::BadUrl(e.to_string()))?;
            (url.to_string(), key)
        }
        [url, key] => (url.to_string(), key.to_string()),
        other => return Err(InvalidLine::FieldCount(other.len())),
    };

    if key.is_empty() {
        return Err(InvalidLine::EmptyKey);
    }
    Ok(Some(ResourceEntry { url, key }))
}

/// Line reader over an opened resource list. Reads raw bytes so a badly
/// encoded line is reported as invalid instead of ending the scan.
pub struct ResourceList {
    reader: BufReader<tokio::fs::File>,
    buf: Vec<u8>,
    line_no: usize,
}

/// Outcome of reading one line.
#[derive(Debug)]
pub enum ListItem {
    Entry(ResourceEntry),
    Invalid {
        line_no: usize,
        line: String,
        reason: InvalidLine,
    },
}

impl ResourceList {
    /// Opens the list. Failure here is fatal for the run.
    pub async fn open(path: &Path) -> Result<Self> {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("open resource list {}", path.display()))?;
        Ok(Self {
            reader: BufReader::new(file),
            buf: Vec::new(),
            line_no: 0,
        })
    }

    /// Next entry or invalid line; blank lines are skipped. `None` at EOF.
    /// Only I/O errors are returned as `Err`.
    pub async fn next_item(&mut self) -> Result<Option<ListItem>> {
        loop {
            self.buf.clear();
            let n = self
                .reader
                .read_until(b'\n', &mut self.buf)
                .await
                .context("read resource list")?;
            if n == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let line = match std::str::from_utf8(&self.buf) {
                Ok(line) => line.to_string(),
                Err(_) => {
                    return Ok(Some(ListItem::Invalid {
                        line_no: self.line_no,
                        line: String::from_utf8_lossy(&self.buf).trim_end().to_string(),
                        reason: InvalidLine::NotUtf8,
                    }))
                }
            };
            match parse_line(&line) {
                Ok(Some(entry)) => return Ok(Some(ListItem::Entry(entry))),
                Ok(None) => continue,
                Err(reason) => {
                    return Ok(Some(ListItem::Invalid {
                        line_no: self.line_no,
                        line: line.trim_end().to_string(),
                        reason,
                    }))
                }
            }
        }
    }
}
