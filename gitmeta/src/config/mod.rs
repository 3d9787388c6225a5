//! Optional `gitmeta.toml` settings.
//!
//! Every key is optional and uses kebab-case:
//!
//! ```toml
//! api-url = "https://ghe.example.com/api/v3"
//! user-agent = "my-exporter"
//! output-dir = "exports"
//! token-cache = ".gitmeta-tokens.json"
//! unpacked = true
//! require-token = false
//! ```
//!
//! Command line flags take precedence over the file. The API URL can also
//! be set with the `GITMETA_API_URL` environment variable, which overrides
//! the file but not the flag.

mod error;

pub use error::ConfigError;

use crate::github::DEFAULT_API_URL;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "gitmeta.toml";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "GITMETA_API_URL";

/// Settings read from `gitmeta.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    /// GitHub REST API base URL.
    pub api_url: Option<String>,

    /// User agent sent with every request.
    pub user_agent: Option<String>,

    /// Directory the digest and archive are written to.
    pub output_dir: Option<PathBuf>,

    /// Token cache file.
    pub token_cache: Option<PathBuf>,

    /// Also write the archive contents as a directory tree.
    #[serde(default)]
    pub unpacked: bool,

    /// Fail the export when no working token is available.
    #[serde(default)]
    pub require_token: bool,
}

impl FileConfig {
    /// Loads settings from `path`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: path.display().to_string(),
            source,
        })
    }

    /// Resolves the API base URL from the environment, then the file, then
    /// the public GitHub endpoint.
    pub fn resolve_api_url(&self) -> String {
        std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }
}
