//! Repository targets.
//!
//! Accepts `owner/name`, `https://github.com/owner/name` and clone URLs ending
//! in `.git`, and normalizes them into a [`RepoTarget`].

mod error;

pub use error::ValidationError;

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static REPO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?://github\.com/)?(?P<owner>[A-Za-z0-9_.-]+)/(?P<name>[A-Za-z0-9_.-]+?)(?:\.git)?/?$",
    )
    .expect("repository pattern is valid")
});

/// A validated GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepoTarget {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub repo: String,
}

impl RepoTarget {
    /// Parses user input into a repository target.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyInput`] for blank input and
    /// [`ValidationError::InvalidRepoUrl`] when the input does not name a
    /// repository.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim();
        if normalized.is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        let caps = REPO_PATTERN
            .captures(normalized)
            .ok_or_else(|| ValidationError::InvalidRepoUrl {
                input: normalized.to_string(),
            })?;

        Ok(Self {
            owner: caps["owner"].to_string(),
            repo: caps["name"].to_string(),
        })
    }

    /// Full name in "owner/name" format.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Browser URL of the repository.
    #[must_use]
    pub fn https_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }

    /// REST API path prefix, `/repos/{owner}/{repo}`.
    #[must_use]
    pub fn api_path(&self) -> String {
        format!("/repos/{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoTarget {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_owner_and_name() {
        let target = RepoTarget::parse("rust-lang/cargo").unwrap();
        assert_eq!(target.owner, "rust-lang");
        assert_eq!(target.repo, "cargo");
        assert_eq!(target.https_url(), "https://github.com/rust-lang/cargo");
    }

    #[test]
    fn parses_urls() {
        for input in [
            "https://github.com/o/r",
            "http://github.com/o/r/",
            "  https://github.com/o/r.git  ",
            "o/r.git",
        ] {
            let target = RepoTarget::parse(input).unwrap();
            assert_eq!(target.full_name(), "o/r", "input: {input}");
        }
    }

    #[test]
    fn keeps_dots_inside_names() {
        let target: RepoTarget = "octo.org/site.github.io".parse().unwrap();
        assert_eq!(target.repo, "site.github.io");
        assert_eq!(target.api_path(), "/repos/octo.org/site.github.io");
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(RepoTarget::parse("   "), Err(ValidationError::EmptyInput));
    }

    #[test]
    fn rejects_malformed_input() {
        for input in [
            "just-a-name",
            "https://gitlab.com/o/r",
            "o/r/extra",
            "o/r?tab=issues",
        ] {
            assert!(
                matches!(
                    RepoTarget::parse(input),
                    Err(ValidationError::InvalidRepoUrl { .. })
                ),
                "input: {input}"
            );
        }
    }

    #[test]
    fn malformed_input_is_echoed_in_message() {
        let error = RepoTarget::parse("  just-a-name  ").unwrap_err();
        assert_eq!(
            error.to_string(),
            "Expected https://github.com/owner/name, got 'just-a-name'"
        );
    }
}
