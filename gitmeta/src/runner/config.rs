//! Runner configuration.

use crate::config::FileConfig;
use crate::github::{DEFAULT_API_URL, DEFAULT_USER_AGENT};
use std::path::{Path, PathBuf};

/// Configuration for an export run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// GitHub REST API base URL.
    api_url: String,
    /// User agent sent with every request.
    user_agent: String,
    /// Directory receiving the digest and archive.
    output_dir: PathBuf,
    /// Token cache file, if tokens should be remembered.
    token_cache: Option<PathBuf>,
    /// Whether to also write the archive as a directory tree.
    unpacked: bool,
    /// Whether an export without a working token fails.
    require_token: bool,
}

impl RunnerConfig {
    /// Creates a configuration writing to `output_dir` with default settings.
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output_dir,
            token_cache: None,
            unpacked: false,
            require_token: false,
        }
    }

    /// Creates a configuration from file settings, falling back to the
    /// current directory for output.
    pub fn from_file(file: &FileConfig) -> Self {
        let output_dir = file.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        let mut config = Self::new(output_dir)
            .with_api_url(file.resolve_api_url())
            .with_unpacked(file.unpacked)
            .with_require_token(file.require_token);
        if let Some(user_agent) = &file.user_agent {
            config = config.with_user_agent(user_agent.clone());
        }
        if let Some(token_cache) = &file.token_cache {
            config = config.with_token_cache(token_cache.clone());
        }
        config
    }

    /// Sets the API base URL.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the output directory.
    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }

    /// Enables the token cache at `path`.
    pub fn with_token_cache(mut self, path: PathBuf) -> Self {
        self.token_cache = Some(path);
        self
    }

    /// Enables or disables writing the unpacked tree.
    pub fn with_unpacked(mut self, unpacked: bool) -> Self {
        self.unpacked = unpacked;
        self
    }

    /// Enables or disables failing without a working token.
    pub fn with_require_token(mut self, require_token: bool) -> Self {
        self.require_token = require_token;
        self
    }

    /// Returns the API base URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the user agent.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the token cache path, if enabled.
    pub fn token_cache(&self) -> Option<&Path> {
        self.token_cache.as_deref()
    }

    /// Returns whether the unpacked tree is written.
    pub fn unpacked(&self) -> bool {
        self.unpacked
    }

    /// Returns whether a working token is required.
    pub fn require_token(&self) -> bool {
        self.require_token
    }
}
