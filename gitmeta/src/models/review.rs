//! Pull request reviews.

use super::{author_login, ParentLink, User};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A review from `GET /repos/{owner}/{repo}/pulls/{number}/reviews`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PullReview {
    /// Review id.
    pub id: u64,

    /// Reviewer. GitHub returns `null` for deleted accounts.
    #[serde(default)]
    pub user: Option<User>,

    /// Review summary body.
    #[serde(default)]
    pub body: Option<String>,

    /// Review state, e.g. `APPROVED` or `CHANGES_REQUESTED`.
    #[serde(default)]
    pub state: String,

    /// Submission timestamp. Pending reviews have none.
    #[serde(default)]
    pub submitted_at: Option<String>,

    /// API URL of the reviewed pull request.
    #[serde(default)]
    pub pull_request_url: String,

    /// Remaining fields as returned by GitHub.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PullReview {
    /// Reviewer login, or `unknown`.
    pub fn author(&self) -> &str {
        author_login(self.user.as_ref())
    }
}

impl ParentLink for PullReview {
    fn parent_url(&self) -> &str {
        &self.pull_request_url
    }
}
