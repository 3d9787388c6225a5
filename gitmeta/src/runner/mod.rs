//! Orchestrates a repository export.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::archive::{build_file_map, ARCHIVE_ROOT};
use crate::digest::build_digest;
use crate::github::{FetchError, GitHubClient, OctocrabTransport, Transport};
use crate::snapshot::fetch_snapshot;
use crate::summary::ExportSummary;
use crate::target::RepoTarget;
use crate::token_cache::{TokenCache, TokenEntry};
use std::path::Path;
use tracing::{info, info_span, warn, Instrument};

/// File name of the text digest in the output directory.
pub const DIGEST_FILE: &str = "gitmeta.txt";

/// Runs exports and token maintenance against one GitHub API.
pub struct Runner<T = OctocrabTransport> {
    config: RunnerConfig,
    client: GitHubClient<T>,
    cache: Option<TokenCache>,
}

impl Runner<OctocrabTransport> {
    /// Builds a runner from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Fetch`] if the API URL is invalid or the HTTP
    /// client cannot be created.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let client = GitHubClient::new(config.api_url(), config.user_agent())?;
        Ok(Self::with_client(config, client))
    }
}

impl<T: Transport> Runner<T> {
    /// Builds a runner around an existing client.
    pub fn with_client(config: RunnerConfig, client: GitHubClient<T>) -> Self {
        let client = client.with_user_agent(config.user_agent());
        let cache = config.token_cache().map(TokenCache::new);
        Self {
            config,
            client,
            cache,
        }
    }

    /// Returns the runner configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Exports `repo_input` to the output directory.
    ///
    /// Writes `gitmeta.txt` and `{owner}-{repo}.gitmeta.zip`, plus the
    /// `.gitmeta/` tree when unpacked output is enabled.
    ///
    /// # Arguments
    ///
    /// * `repo_input` - `owner/name` or a GitHub repository URL
    /// * `candidate_tokens` - Tokens to try; each may hold several values
    ///   separated by whitespace or commas
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Validation`] before any request when the input
    /// is not a repository, [`RunnerError::NoWorkingToken`] when a token is
    /// required and none works, and the first fetch, packaging or write
    /// failure otherwise.
    pub async fn export(
        &self,
        repo_input: &str,
        candidate_tokens: &[String],
    ) -> Result<ExportSummary, RunnerError> {
        let target = RepoTarget::parse(repo_input)?;
        let span = info_span!("export", repository = %target.full_name());

        async {
            let token = self.select_token(candidate_tokens).await?;
            if token.is_none() {
                if self.config.require_token() {
                    return Err(RunnerError::NoWorkingToken);
                }
                warn!("Exporting without a token; GitHub allows 60 requests per hour");
            }

            let snapshot = fetch_snapshot(&self.client, &target, token.as_deref()).await?;
            let digest = build_digest(&snapshot);
            let files = build_file_map(&snapshot)?;
            let archive = files.to_zip()?;

            let output_dir = self.config.output_dir();
            create_dir(output_dir)?;

            let digest_path = output_dir.join(DIGEST_FILE);
            write_file(&digest_path, digest.as_bytes())?;

            let archive_path =
                output_dir.join(format!("{}-{}.gitmeta.zip", target.owner, target.repo));
            write_file(&archive_path, &archive)?;

            let unpacked_dir = if self.config.unpacked() {
                files.write_to_dir(output_dir)?;
                Some(output_dir.join(ARCHIVE_ROOT))
            } else {
                None
            };

            info!(
                digest = %digest_path.display(),
                archive = %archive_path.display(),
                bytes = archive.len(),
                "Export complete"
            );

            Ok(ExportSummary {
                repository: snapshot.repo_name().to_string(),
                counts: snapshot.counts(),
                authenticated: token.is_some(),
                digest_path,
                archive_path,
                archive_bytes: archive.len(),
                unpacked_dir,
            })
        }
        .instrument(span)
        .await
    }

    /// Picks the token used for an export.
    ///
    /// Candidates are validated one at a time. With a token cache, accepted
    /// tokens are added, rejected ones removed, and the first cached entry
    /// is chosen. Without a cache the first accepted candidate is chosen.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Fetch`] if a validation request cannot be
    /// completed and [`RunnerError::TokenCache`] if the cache cannot be saved.
    pub async fn select_token(
        &self,
        candidate_tokens: &[String],
    ) -> Result<Option<String>, RunnerError> {
        let candidates = split_tokens(candidate_tokens);
        let mut valid = Vec::new();
        let mut invalid = Vec::new();

        for candidate in candidates {
            if self.client.validate_token(&candidate).await? {
                valid.push(candidate);
            } else {
                warn!(token = %mask(&candidate), "Token rejected by GitHub");
                invalid.push(candidate);
            }
        }

        let Some(cache) = &self.cache else {
            return Ok(valid.into_iter().next());
        };

        let mut entries = cache.load();
        if !valid.is_empty() {
            entries = cache.upsert(&entries, &valid)?;
        }
        if !invalid.is_empty() {
            entries = cache.remove(&entries, &invalid)?;
        }
        info!(cached = entries.len(), "Token cache updated");

        Ok(entries.into_iter().next().map(|entry| entry.value))
    }

    /// Checks whether GitHub accepts `token`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request cannot be completed.
    pub async fn validate_token(&self, token: &str) -> Result<bool, FetchError> {
        self.client.validate_token(token).await
    }

    /// Returns the cached tokens, or nothing when no cache is configured.
    pub fn cached_tokens(&self) -> Vec<TokenEntry> {
        self.cache.as_ref().map(TokenCache::load).unwrap_or_default()
    }

    /// Removes `values` from the token cache and returns what remains.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::TokenCache`] if the cache cannot be saved.
    pub fn forget_tokens(&self, values: &[String]) -> Result<Vec<TokenEntry>, RunnerError> {
        let Some(cache) = &self.cache else {
            return Ok(Vec::new());
        };
        let entries = cache.load();
        Ok(cache.remove(&entries, &split_tokens(values))?)
    }
}

/// Splits raw token input on whitespace and commas, dropping blanks.
pub fn split_tokens(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|value| value.split(|c: char| c.is_whitespace() || c == ','))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Shortens a token for display, keeping only its first and last characters.
pub fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

fn create_dir(dir: &Path) -> Result<(), RunnerError> {
    std::fs::create_dir_all(dir).map_err(|source| RunnerError::Io {
        path: dir.display().to_string(),
        source,
    })
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), RunnerError> {
    std::fs::write(path, contents).map_err(|source| RunnerError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::mock::MockTransport;
    use serde_json::json;
    use tempfile::TempDir;
    use url::Url;

    fn runner(config: RunnerConfig) -> Runner<MockTransport> {
        let client = GitHubClient::with_transport(
            MockTransport::new(),
            Url::parse("https://api.github.test").unwrap(),
        );
        Runner::with_client(config, client)
    }

    fn transport(runner: &Runner<MockTransport>) -> &MockTransport {
        runner.client.transport()
    }

    fn push_empty_repo(transport: &MockTransport) {
        transport.push_json("/repos/o/r", 200, json!({ "full_name": "o/r" }));
        for path in [
            "/repos/o/r/issues",
            "/repos/o/r/pulls",
            "/repos/o/r/issues/comments",
            "/repos/o/r/releases",
        ] {
            transport.push_json(path, 200, json!([]));
        }
    }

    #[test]
    fn splits_tokens_on_whitespace_and_commas() {
        let raw = vec!["ghp_a, ghp_b".to_string(), " ghp_c\nghp_d ".to_string()];
        assert_eq!(split_tokens(&raw), vec!["ghp_a", "ghp_b", "ghp_c", "ghp_d"]);
    }

    #[test]
    fn masks_tokens() {
        assert_eq!(mask("ghp_abcdefghijkl"), "ghp_...ijkl");
        assert_eq!(mask("short"), "*****");
    }

    #[tokio::test]
    async fn invalid_input_makes_no_requests() {
        let temp = TempDir::new().unwrap();
        let runner = runner(RunnerConfig::new(temp.path().to_path_buf()));

        let error = runner.export("not a repo", &[]).await.unwrap_err();

        assert!(matches!(error, RunnerError::Validation(_)));
        assert!(transport(&runner).requests().is_empty());
    }

    #[tokio::test]
    async fn require_token_without_candidates_fails() {
        let temp = TempDir::new().unwrap();
        let config = RunnerConfig::new(temp.path().to_path_buf()).with_require_token(true);
        let runner = runner(config);

        let error = runner.export("o/r", &[]).await.unwrap_err();

        assert!(matches!(error, RunnerError::NoWorkingToken));
        assert_eq!(error.to_string(), "No working token found.");
    }

    #[tokio::test]
    async fn first_valid_token_without_cache() {
        let temp = TempDir::new().unwrap();
        let runner = runner(RunnerConfig::new(temp.path().to_path_buf()));
        let transport = transport(&runner);
        transport.push_with_headers("/rate_limit", 401, &[], "Bad credentials");
        transport.push_with_headers("/rate_limit", 200, &[], "{}");
        transport.push_with_headers("/rate_limit", 200, &[], "{}");

        let token = runner
            .select_token(&["ghp_bad ghp_good,ghp_other".to_string()])
            .await
            .unwrap();

        assert_eq!(token.as_deref(), Some("ghp_good"));
    }

    #[tokio::test]
    async fn cache_keeps_valid_and_prunes_invalid() {
        let temp = TempDir::new().unwrap();
        let cache_path = temp.path().join("tokens.json");
        let config =
            RunnerConfig::new(temp.path().to_path_buf()).with_token_cache(cache_path.clone());
        let runner = runner(config);
        TokenCache::new(&cache_path)
            .upsert(&[], &["ghp_stale"])
            .unwrap();
        let transport = transport(&runner);
        transport.push_with_headers("/rate_limit", 401, &[], "");
        transport.push_with_headers("/rate_limit", 200, &[], "{}");

        let token = runner
            .select_token(&["ghp_stale".to_string(), "ghp_fresh".to_string()])
            .await
            .unwrap();

        assert_eq!(token.as_deref(), Some("ghp_fresh"));
        let cached: Vec<String> = runner
            .cached_tokens()
            .into_iter()
            .map(|entry| entry.value)
            .collect();
        assert_eq!(cached, vec!["ghp_fresh"]);
    }

    #[tokio::test]
    async fn cached_token_used_without_candidates() {
        let temp = TempDir::new().unwrap();
        let cache_path = temp.path().join("tokens.json");
        TokenCache::new(&cache_path)
            .upsert(&[], &["ghp_cached"])
            .unwrap();
        let config = RunnerConfig::new(temp.path().to_path_buf()).with_token_cache(cache_path);
        let runner = runner(config);

        let token = runner.select_token(&[]).await.unwrap();

        assert_eq!(token.as_deref(), Some("ghp_cached"));
        assert!(transport(&runner).requests().is_empty());
    }

    #[tokio::test]
    async fn export_writes_digest_and_archive() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        let runner = runner(RunnerConfig::new(out.clone()).with_unpacked(true));
        push_empty_repo(transport(&runner));

        let summary = runner
            .export("https://github.com/o/r.git", &[])
            .await
            .unwrap();

        assert_eq!(summary.repository, "o/r");
        assert!(!summary.authenticated);
        assert_eq!(summary.digest_path, out.join("gitmeta.txt"));
        assert_eq!(summary.archive_path, out.join("o-r.gitmeta.zip"));
        assert_eq!(summary.total_items(), 0);

        let digest = std::fs::read_to_string(&summary.digest_path).unwrap();
        assert!(digest.starts_with("=== SUMMARY ===\nRepository: o/r\n"));
        let archive = std::fs::read(&summary.archive_path).unwrap();
        assert_eq!(archive.len(), summary.archive_bytes);
        assert!(out.join(".gitmeta/sync_state.json").is_file());
    }

    #[tokio::test]
    async fn rate_limit_is_reported() {
        let temp = TempDir::new().unwrap();
        let runner = runner(RunnerConfig::new(temp.path().to_path_buf()));
        transport(&runner).push_with_headers("/repos/o/r", 403, &[], "limit");

        let error = runner.export("o/r", &[]).await.unwrap_err();

        assert!(error.is_rate_limit());
        assert!(!temp.path().join(DIGEST_FILE).exists());
    }
}
