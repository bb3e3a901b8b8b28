use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Content-store endpoint and credentials (`[store]` section in config.toml).
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Access key used to sign content-store requests.
    pub access_key: String,
    /// Secret key used to sign content-store requests.
    pub secret_key: String,
    /// Base URL of the resource-management API (stat).
    pub rs_host: String,
    /// Base URL of the IO API (remote fetch).
    pub io_host: String,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("rs_host", &self.rs_host)
            .field("io_host", &self.io_host)
            .finish()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            secret_key: String::new(),
            rs_host: "https://rs.qbox.me".to_string(),
            io_host: "https://iovip.qbox.me".to_string(),
        }
    }
}

/// HTTP timeouts (`[http]` section in config.toml).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// TCP/TLS connect timeout for every request.
    pub connect_timeout_secs: u64,
    /// Total timeout for downloading a playlist's text from its origin.
    pub playlist_timeout_secs: u64,
    /// Total timeout for one content-store call. Remote fetches of large
    /// segments are slow, so this is generous.
    pub store_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            playlist_timeout_secs: 30,
            store_timeout_secs: 300,
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn playlist_timeout(&self) -> Duration {
        Duration::from_secs(self.playlist_timeout_secs)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }
}

/// Global configuration loaded from `~/.config/qfetch/config.toml`.
/// Every field is optional in the file; missing ones take the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QfetchConfig {
    /// Number of playlist jobs processed concurrently (worker pool width).
    pub workers: usize,
    /// Ask the content store whether a key already exists before fetching.
    pub check_exists: bool,
    /// Directory holding the per-job progress stores. Defaults to the XDG
    /// state dir (`~/.local/state/qfetch/jobs`).
    pub state_dir: Option<PathBuf>,
    pub store: StoreConfig,
    pub http: HttpConfig,
}

impl Default for QfetchConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            check_exists: false,
            state_dir: None,
            store: StoreConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl QfetchConfig {
    /// Configured state dir, or the XDG default.
    pub fn resolved_state_dir(&self) -> Result<PathBuf> {
        match &self.state_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_state_dir(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("qfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Default directory for progress stores: `~/.local/state/qfetch/jobs`.
pub fn default_state_dir() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("qfetch")?;
    Ok(xdg_dirs.get_state_home().join("jobs"))
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<QfetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = QfetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file (no default is written).
pub fn load_from(path: &Path) -> Result<QfetchConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: QfetchConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = QfetchConfig::default();
        assert_eq!(cfg.workers, 4);
        assert!(!cfg.check_exists);
        assert!(cfg.state_dir.is_none());
        assert_eq!(cfg.http.connect_timeout_secs, 15);
        assert_eq!(cfg.store.io_host, "https://iovip.qbox.me");
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = QfetchConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: QfetchConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.workers, cfg.workers);
        assert_eq!(parsed.check_exists, cfg.check_exists);
        assert_eq!(parsed.store.rs_host, cfg.store.rs_host);
        assert_eq!(parsed.http.store_timeout_secs, cfg.http.store_timeout_secs);
    }

    #[test]
    fn config_toml_minimal_uses_section_defaults() {
        let toml = r#"
            workers = 8
            check_exists = true
        "#;
        let cfg: QfetchConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.workers, 8);
        assert!(cfg.check_exists);
        assert!(cfg.store.access_key.is_empty());
        assert_eq!(cfg.store.rs_host, "https://rs.qbox.me");
        assert_eq!(cfg.http.playlist_timeout_secs, 30);
    }

    #[test]
    fn config_toml_store_section_only() {
        let toml = r#"
            [store]
            access_key = "ak"
            secret_key = "sk"
        "#;
        let cfg: QfetchConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.workers, 4);
        assert_eq!(cfg.store.access_key, "ak");
        assert_eq!(cfg.store.io_host, "https://iovip.qbox.me");
    }

    #[test]
    fn config_toml_custom_sections() {
        let toml = r#"
            workers = 2
            check_exists = false
            state_dir = "/var/lib/qfetch"

            [store]
            access_key = "ak"
            secret_key = "sk"
            rs_host = "http://127.0.0.1:9000"
            io_host = "http://127.0.0.1:9001"

            [http]
            connect_timeout_secs = 5
            playlist_timeout_secs = 10
            store_timeout_secs = 60
        "#;
        let cfg: QfetchConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.state_dir.as_deref(), Some(Path::new("/var/lib/qfetch")));
        assert_eq!(cfg.store.access_key, "ak");
        assert_eq!(cfg.store.io_host, "http://127.0.0.1:9001");
        assert_eq!(cfg.http.store_timeout(), Duration::from_secs(60));
        assert_eq!(
            cfg.resolved_state_dir().unwrap(),
            PathBuf::from("/var/lib/qfetch")
        );
    }

    #[test]
    fn debug_output_redacts_secret_key() {
        let mut cfg = QfetchConfig::default();
        cfg.store.secret_key = "s3cr3t".to_string();
        assert!(!format!("{:?}", cfg).contains("s3cr3t"));
    }

    #[test]
    fn load_from_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "workers = \"many\"").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("config.toml"));
    }
}
