//! Sequential retrieval of every collection in a [`Snapshot`].

use super::Snapshot;
use crate::github::{fetch_all_pages, FetchError, GitHubClient, Transport};
use crate::models::{
    Issue, IssueComment, PullRequest, PullReview, PullReviewComment, Release, RepoSummary,
};
use crate::target::RepoTarget;
use chrono::Utc;
use tracing::{debug, info, info_span, Instrument};

/// Fetches a complete snapshot of `target`.
///
/// Requests are issued one at a time in a fixed order: summary, issues,
/// pulls, issue comments, releases, then reviews followed by review comments
/// for each pull in the order the pulls were listed. Entries of the issues
/// listing that are backed by a pull request are dropped.
///
/// # Arguments
///
/// * `client` - Fetcher for the GitHub API
/// * `target` - Repository to export
/// * `token` - Optional token; blank values are sent unauthenticated
///
/// # Errors
///
/// Returns the first [`FetchError`]; nothing fetched before it is kept.
pub async fn fetch_snapshot<T: Transport>(
    client: &GitHubClient<T>,
    target: &RepoTarget,
    token: Option<&str>,
) -> Result<Snapshot, FetchError> {
    let span = info_span!("snapshot", repository = %target.full_name());

    async {
        let headers = client.headers(token)?;
        let base = target.api_path();
        let all_states = [("state", "all".to_string())];

        info!("Fetching repository summary");
        let summary: RepoSummary = client.fetch_json(&base, &headers, &[]).await?;

        let issues: Vec<Issue> =
            fetch_all_pages(client, &format!("{base}/issues"), &headers, &all_states).await?;
        let listed = issues.len();
        let issues: Vec<Issue> = issues
            .into_iter()
            .filter(|issue| !issue.is_pull_request())
            .collect();
        info!(count = issues.len(), skipped = listed - issues.len(), "Fetched issues");

        let pulls: Vec<PullRequest> =
            fetch_all_pages(client, &format!("{base}/pulls"), &headers, &all_states).await?;
        info!(count = pulls.len(), "Fetched pull requests");

        let issue_comments: Vec<IssueComment> =
            fetch_all_pages(client, &format!("{base}/issues/comments"), &headers, &[]).await?;
        info!(count = issue_comments.len(), "Fetched issue comments");

        let releases: Vec<Release> =
            fetch_all_pages(client, &format!("{base}/releases"), &headers, &[]).await?;
        info!(count = releases.len(), "Fetched releases");

        let mut reviews: Vec<PullReview> = Vec::new();
        let mut review_comments: Vec<PullReviewComment> = Vec::new();
        for pull in &pulls {
            let pull_path = format!("{base}/pulls/{}", pull.number);

            let pull_reviews: Vec<PullReview> =
                fetch_all_pages(client, &format!("{pull_path}/reviews"), &headers, &[]).await?;
            let pull_comments: Vec<PullReviewComment> =
                fetch_all_pages(client, &format!("{pull_path}/comments"), &headers, &[]).await?;
            debug!(
                number = pull.number,
                reviews = pull_reviews.len(),
                comments = pull_comments.len(),
                "Fetched pull review activity"
            );

            reviews.extend(pull_reviews);
            review_comments.extend(pull_comments);
        }
        info!(
            reviews = reviews.len(),
            review_comments = review_comments.len(),
            "Fetched reviews"
        );

        Ok(Snapshot {
            summary,
            issues,
            pulls,
            issue_comments,
            releases,
            reviews,
            review_comments,
            captured_at: Utc::now(),
        })
    }
    .instrument(span)
    .await
}
