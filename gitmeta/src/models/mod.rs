//! GitHub REST payloads captured in a snapshot.
//!
//! Every entity deserializes the fields the exporter reads into named struct
//! fields and keeps everything else in a flattened `extra` map, so writing an
//! entity back out reproduces the payload GitHub returned.

mod comment;
mod issue;
mod release;
mod review;

pub use comment::{IssueComment, PullReviewComment};
pub use issue::{Discussion, Issue, PullRequest};
pub use release::Release;
pub use review::PullReview;

use crate::text::extract_number;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Login used when GitHub reports no author (deleted or ghost accounts).
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// A GitHub account reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Account login.
    pub login: String,

    /// Remaining fields as returned by GitHub.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An issue or pull request label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Label name.
    pub name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A milestone reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Milestone title.
    pub title: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Repository-level metadata from `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoSummary {
    /// Full repository name in "owner/name" format.
    pub full_name: String,

    /// Repository description.
    #[serde(default)]
    pub description: Option<String>,

    /// Default branch name.
    #[serde(default)]
    pub default_branch: String,

    /// Timestamp of the last push.
    #[serde(default)]
    pub pushed_at: Option<String>,

    /// Star count.
    #[serde(default)]
    pub stargazers_count: u64,

    /// Fork count.
    #[serde(default)]
    pub forks_count: u64,

    /// Open issues and pull requests as counted by GitHub.
    #[serde(default)]
    pub open_issues_count: u64,

    /// Remaining fields as returned by GitHub.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Returns the login of an optional author, or [`UNKNOWN_AUTHOR`].
pub fn author_login(user: Option<&User>) -> &str {
    user.map_or(UNKNOWN_AUTHOR, |u| u.login.as_str())
}

/// An entity attached to a parent issue or pull request through an API URL.
pub trait ParentLink {
    /// The API URL of the parent issue or pull request.
    fn parent_url(&self) -> &str;

    /// The parent number parsed from [`ParentLink::parent_url`], or `"?"`.
    fn parent_number(&self) -> String {
        extract_number(self.parent_url())
    }
}
