//! Previously seen GitHub tokens, persisted as a JSON file.
//!
//! The file holds `[{"value": "...", "addedAt": "..."}]`. Reading is
//! forgiving: a missing or malformed file is an empty cache. Writes replace
//! the whole file, which on unix is readable by its owner only.

mod error;

pub use error::TokenCacheError;

use crate::text::to_iso_millis;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A cached token and when it was first stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEntry {
    /// The token.
    pub value: String,

    /// ISO-8601 time the token was added.
    #[serde(rename = "addedAt")]
    pub added_at: String,
}

impl TokenEntry {
    fn now(value: String) -> Self {
        Self {
            value,
            added_at: to_iso_millis(&Utc::now()),
        }
    }
}

/// File-backed token cache.
#[derive(Debug, Clone)]
pub struct TokenCache {
    path: PathBuf,
}

impl TokenCache {
    /// Creates a cache stored at `path`. Nothing is read until [`TokenCache::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the cache file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the cached entries.
    ///
    /// A missing file, invalid JSON or a top-level value that is not an
    /// array all yield an empty list. Items without a string `value` are
    /// skipped; items without a string `addedAt` are stamped with the
    /// current time.
    pub fn load(&self) -> Vec<TokenEntry> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "No token cache");
                return Vec::new();
            }
        };

        let items = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items,
            Ok(_) => return Vec::new(),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Ignoring unreadable token cache"
                );
                return Vec::new();
            }
        };

        items
            .iter()
            .filter_map(|item| {
                let value = item.get("value")?.as_str()?;
                let entry = match item.get("addedAt").and_then(Value::as_str) {
                    Some(added_at) => TokenEntry {
                        value: value.to_string(),
                        added_at: added_at.to_string(),
                    },
                    None => TokenEntry::now(value.to_string()),
                };
                Some(entry)
            })
            .collect()
    }

    /// Merges `values` into `existing`, persists and returns the result.
    ///
    /// Existing entries keep their position and timestamp. New values are
    /// trimmed, blanks are skipped, and each value is stored once.
    ///
    /// # Errors
    ///
    /// Returns [`TokenCacheError`] if the cache cannot be written.
    pub fn upsert<S: AsRef<str>>(
        &self,
        existing: &[TokenEntry],
        values: &[S],
    ) -> Result<Vec<TokenEntry>, TokenCacheError> {
        let mut seen = HashSet::new();
        let mut merged: Vec<TokenEntry> = existing
            .iter()
            .filter(|entry| seen.insert(entry.value.clone()))
            .cloned()
            .collect();

        for value in values.iter().map(|v| v.as_ref().trim()) {
            if !value.is_empty() && seen.insert(value.to_string()) {
                merged.push(TokenEntry::now(value.to_string()));
            }
        }

        self.persist(&merged)?;
        Ok(merged)
    }

    /// Drops entries matching any of `values`, persists and returns the rest.
    ///
    /// # Errors
    ///
    /// Returns [`TokenCacheError`] if the cache cannot be written.
    pub fn remove<S: AsRef<str>>(
        &self,
        existing: &[TokenEntry],
        values: &[S],
    ) -> Result<Vec<TokenEntry>, TokenCacheError> {
        let removal: HashSet<&str> = values
            .iter()
            .map(|v| v.as_ref().trim())
            .filter(|v| !v.is_empty())
            .collect();
        let remaining: Vec<TokenEntry> = existing
            .iter()
            .filter(|entry| !removal.contains(entry.value.as_str()))
            .cloned()
            .collect();

        self.persist(&remaining)?;
        Ok(remaining)
    }

    fn persist(&self, entries: &[TokenEntry]) -> Result<(), TokenCacheError> {
        let io_error = |source: std::io::Error| TokenCacheError::Io {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        write_private(&self.path, json.as_bytes()).map_err(io_error)?;

        debug!(path = %self.path.display(), count = entries.len(), "Saved token cache");
        Ok(())
    }
}

/// Replaces the file at `path`, restricting it to mode 0600 on unix.
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
        options.mode(0o600);
        let mut file = options.open(path)?;
        // `mode` only applies on creation
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        file.write_all(contents)
    }

    #[cfg(not(unix))]
    {
        options.open(path)?.write_all(contents)
    }
}
