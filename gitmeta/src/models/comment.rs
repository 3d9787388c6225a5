//! Issue comments and pull request review comments.

use super::{author_login, ParentLink, User};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A comment from `GET /repos/{owner}/{repo}/issues/comments`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueComment {
    /// Comment id.
    pub id: u64,

    /// Author.
    #[serde(default)]
    pub user: Option<User>,

    /// Comment body.
    #[serde(default)]
    pub body: Option<String>,

    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,

    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,

    /// API URL of the parent issue.
    #[serde(default)]
    pub issue_url: String,

    /// Remaining fields as returned by GitHub.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IssueComment {
    /// Author login, or `unknown`.
    pub fn author(&self) -> &str {
        author_login(self.user.as_ref())
    }
}

impl ParentLink for IssueComment {
    fn parent_url(&self) -> &str {
        &self.issue_url
    }
}

/// A comment from `GET /repos/{owner}/{repo}/pulls/{number}/comments`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PullReviewComment {
    /// Comment id.
    pub id: u64,

    /// Author.
    #[serde(default)]
    pub user: Option<User>,

    /// Comment body.
    #[serde(default)]
    pub body: Option<String>,

    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,

    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,

    /// API URL of the parent pull request.
    #[serde(default)]
    pub pull_request_url: String,

    /// Remaining fields as returned by GitHub.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PullReviewComment {
    /// Author login, or `unknown`.
    pub fn author(&self) -> &str {
        author_login(self.user.as_ref())
    }
}

impl ParentLink for PullReviewComment {
    fn parent_url(&self) -> &str {
        &self.pull_request_url
    }
}
