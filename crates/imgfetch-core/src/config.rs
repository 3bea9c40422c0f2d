use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Pipeline configuration loaded from `~/.config/imgfetch/config.toml`.
///
/// Passed into [`crate::Pipeline::new`]; nothing in the core reads a global
/// output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Flat directory receiving fetched images (relative paths resolve against the cwd).
    pub output_dir: PathBuf,
    /// Seconds without any received data before a transfer is abandoned.
    pub timeout_secs: u64,
    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Largest declared `Content-Length` accepted, in bytes.
    pub max_content_length: u64,
    /// Receive buffer size; each body chunk written to disk is at most this long.
    pub chunk_size: usize,
    /// Extension (without dot) appended to fingerprint fallback names.
    pub default_extension: String,
    pub max_redirects: u32,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("Fetched_Images"),
            timeout_secs: 10,
            connect_timeout_secs: 10,
            max_content_length: 10 * 1024 * 1024,
            chunk_size: 8192,
            default_extension: "jpg".to_string(),
            max_redirects: 10,
        }
    }
}

impl FetcherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetcherConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetcherConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit file. Missing fields take their defaults.
pub fn load_from_path(path: &Path) -> Result<FetcherConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: FetcherConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
