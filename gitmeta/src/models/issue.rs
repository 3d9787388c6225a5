//! Issues and pull requests.

use super::{author_login, Label, Milestone, User};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields shared by issues and pull requests.
///
/// Both the digest and the thread formatter render issues and pulls through
/// this view so the two kinds stay formatted identically.
pub trait Discussion {
    /// Issue or pull request number.
    fn number(&self) -> u64;

    /// Title.
    fn title(&self) -> &str;

    /// State as reported by GitHub (`open` or `closed`).
    fn state(&self) -> &str;

    /// Author login, or `unknown`.
    fn author(&self) -> &str;

    /// Creation timestamp.
    fn created_at(&self) -> Option<&str>;

    /// Close timestamp.
    fn closed_at(&self) -> Option<&str>;

    /// Opening body.
    fn body(&self) -> Option<&str>;

    /// Label names in source order.
    fn label_names(&self) -> Vec<String>;

    /// Assignee logins in source order.
    fn assignee_logins(&self) -> Vec<String>;

    /// Milestone title, if any.
    fn milestone_title(&self) -> Option<&str>;
}

/// An issue from `GET /repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number.
    pub number: u64,

    /// Issue title.
    #[serde(default)]
    pub title: String,

    /// Issue state.
    #[serde(default)]
    pub state: String,

    /// Author.
    #[serde(default)]
    pub user: Option<User>,

    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,

    /// Close timestamp.
    #[serde(default)]
    pub closed_at: Option<String>,

    /// Issue body.
    #[serde(default)]
    pub body: Option<String>,

    /// Labels.
    #[serde(default)]
    pub labels: Option<Vec<Label>>,

    /// Assignees.
    #[serde(default)]
    pub assignees: Option<Vec<User>>,

    /// Milestone.
    #[serde(default)]
    pub milestone: Option<Milestone>,

    /// Present when the issues endpoint returned a pull request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<Value>,

    /// Remaining fields as returned by GitHub.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Issue {
    /// Returns true when this entry is backed by a pull request.
    #[must_use]
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// A pull request from `GET /repos/{owner}/{repo}/pulls`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Pull request number.
    pub number: u64,

    /// Pull request title.
    #[serde(default)]
    pub title: String,

    /// Pull request state.
    #[serde(default)]
    pub state: String,

    /// Author.
    #[serde(default)]
    pub user: Option<User>,

    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,

    /// Close timestamp.
    #[serde(default)]
    pub closed_at: Option<String>,

    /// Merge timestamp.
    #[serde(default)]
    pub merged_at: Option<String>,

    /// Pull request description.
    #[serde(default)]
    pub body: Option<String>,

    /// Labels.
    #[serde(default)]
    pub labels: Option<Vec<Label>>,

    /// Assignees.
    #[serde(default)]
    pub assignees: Option<Vec<User>>,

    /// Milestone.
    #[serde(default)]
    pub milestone: Option<Milestone>,

    /// Remaining fields as returned by GitHub.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PullRequest {
    /// Returns true when GitHub reports a merge timestamp.
    #[must_use]
    pub fn is_merged(&self) -> bool {
        self.merged_at.is_some()
    }
}

macro_rules! impl_discussion {
    ($ty:ty) => {
        impl Discussion for $ty {
            fn number(&self) -> u64 {
                self.number
            }

            fn title(&self) -> &str {
                &self.title
            }

            fn state(&self) -> &str {
                &self.state
            }

            fn author(&self) -> &str {
                author_login(self.user.as_ref())
            }

            fn created_at(&self) -> Option<&str> {
                self.created_at.as_deref()
            }

            fn closed_at(&self) -> Option<&str> {
                self.closed_at.as_deref()
            }

            fn body(&self) -> Option<&str> {
                self.body.as_deref()
            }

            fn label_names(&self) -> Vec<String> {
                self.labels
                    .iter()
                    .flatten()
                    .map(|label| label.name.clone())
                    .collect()
            }

            fn assignee_logins(&self) -> Vec<String> {
                self.assignees
                    .iter()
                    .flatten()
                    .map(|user| user.login.clone())
                    .collect()
            }

            fn milestone_title(&self) -> Option<&str> {
                self.milestone.as_ref().map(|m| m.title.as_str())
            }
        }
    };
}

impl_discussion!(Issue);
impl_discussion!(PullRequest);
