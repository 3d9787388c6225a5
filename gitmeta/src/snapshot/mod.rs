//! Point-in-time aggregate of a repository's metadata.

mod builder;

pub use builder::fetch_snapshot;

use crate::models::{
    Issue, IssueComment, PullRequest, PullReview, PullReviewComment, Release, RepoSummary,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything fetched for one repository in a single export.
///
/// Comments and reviews reference their parent through an API URL; the
/// parent is not guaranteed to be among `issues` or `pulls`.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Repository metadata.
    pub summary: RepoSummary,

    /// Issues, excluding pull-backed entries.
    pub issues: Vec<Issue>,

    /// Pull requests.
    pub pulls: Vec<PullRequest>,

    /// Repository-wide issue comments.
    pub issue_comments: Vec<IssueComment>,

    /// Releases.
    pub releases: Vec<Release>,

    /// Reviews of all pulls, in pull order.
    pub reviews: Vec<PullReview>,

    /// Review comments of all pulls, in pull order.
    pub review_comments: Vec<PullReviewComment>,

    /// When the last fetch completed.
    pub captured_at: DateTime<Utc>,
}

impl Snapshot {
    /// Creates an empty snapshot for `summary` captured at `captured_at`.
    pub fn new(summary: RepoSummary, captured_at: DateTime<Utc>) -> Self {
        Self {
            summary,
            issues: Vec::new(),
            pulls: Vec::new(),
            issue_comments: Vec::new(),
            releases: Vec::new(),
            reviews: Vec::new(),
            review_comments: Vec::new(),
            captured_at,
        }
    }

    /// Repository full name in "owner/name" format.
    pub fn repo_name(&self) -> &str {
        &self.summary.full_name
    }

    /// Number of entities per collection.
    pub fn counts(&self) -> EntityCounts {
        EntityCounts {
            issues: self.issues.len(),
            pulls: self.pulls.len(),
            issue_comments: self.issue_comments.len(),
            review_comments: self.review_comments.len(),
            reviews: self.reviews.len(),
            releases: self.releases.len(),
        }
    }
}

/// Collection sizes of a [`Snapshot`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityCounts {
    pub issues: usize,
    pub pulls: usize,
    pub issue_comments: usize,
    pub review_comments: usize,
    pub reviews: usize,
    pub releases: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_serialize_in_camel_case() {
        let mut snapshot = Snapshot::new(RepoSummary::default(), Utc::now());
        snapshot.issues.push(Issue::default());
        snapshot.review_comments.push(PullReviewComment::default());

        let counts = serde_json::to_value(snapshot.counts()).unwrap();

        assert_eq!(
            counts,
            json!({
                "issues": 1,
                "pulls": 0,
                "issueComments": 0,
                "reviewComments": 1,
                "reviews": 0,
                "releases": 0
            })
        );
    }
}
