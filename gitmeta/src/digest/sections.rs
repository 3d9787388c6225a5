//! Line builders for each digest section.

use crate::models::{
    Discussion, IssueComment, ParentLink, PullRequest, PullReview, PullReviewComment, Release,
    RepoSummary,
};
use crate::text::{format_timestamp, join_or_dash, truncate_body, EMPTY_LIST, NOT_AVAILABLE};

pub(super) const ENTRY_SEPARATOR: &str = "---";

pub(super) fn summary(lines: &mut Vec<String>, summary: &RepoSummary) {
    lines.push("=== SUMMARY ===".to_string());
    lines.push(format!("Repository: {}", summary.full_name));
    lines.push(format!(
        "Description: {}",
        summary.description.as_deref().unwrap_or(NOT_AVAILABLE)
    ));
    lines.push(format!("Default branch: {}", summary.default_branch));
    lines.push(format!(
        "Last push: {}",
        format_timestamp(summary.pushed_at.as_deref())
    ));
    lines.push(format!("Stars: {}", summary.stargazers_count));
    lines.push(format!("Forks: {}", summary.forks_count));
    lines.push(format!("Open issues (GitHub): {}", summary.open_issues_count));
}

pub(super) fn issues<D: Discussion>(lines: &mut Vec<String>, issues: &[D]) {
    lines.push("=== ISSUES ===".to_string());
    if issues.is_empty() {
        lines.push("(no issues)".to_string());
        return;
    }
    for issue in issues {
        lines.push(format!(
            "#{} {} [{}] by {} @ {}",
            issue.number(),
            issue.title(),
            issue.state(),
            issue.author(),
            format_timestamp(issue.created_at())
        ));
        discussion_details(lines, issue);
    }
}

pub(super) fn pulls(lines: &mut Vec<String>, pulls: &[PullRequest]) {
    lines.push("=== PULL REQUESTS ===".to_string());
    if pulls.is_empty() {
        lines.push("(no pull requests)".to_string());
        return;
    }
    for pull in pulls {
        let merged = if pull.is_merged() { ", merged" } else { "" };
        lines.push(format!(
            "PR #{} {} [{}{}] by {} @ {}",
            pull.number(),
            pull.title(),
            pull.state(),
            merged,
            pull.author(),
            format_timestamp(pull.created_at())
        ));
        discussion_details(lines, pull);
    }
}

/// Labels, assignees, milestone, optional body and the entry separator.
fn discussion_details<D: Discussion>(lines: &mut Vec<String>, item: &D) {
    lines.push(format!("Labels: {}", join_or_dash(&item.label_names())));
    lines.push(format!("Assignees: {}", join_or_dash(&item.assignee_logins())));
    lines.push(format!(
        "Milestone: {}",
        item.milestone_title().unwrap_or(EMPTY_LIST)
    ));

    let body = truncate_body(item.body());
    if !body.is_empty() {
        lines.push("Body:".to_string());
        lines.push(body);
    }
    lines.push(ENTRY_SEPARATOR.to_string());
}

pub(super) fn issue_comments(lines: &mut Vec<String>, comments: &[IssueComment]) {
    lines.push("=== ISSUE COMMENTS ===".to_string());
    if comments.is_empty() {
        lines.push("(no issue comments)".to_string());
        return;
    }
    for comment in comments {
        lines.push(format!(
            "{} @ {} on issue #{}",
            comment.author(),
            format_timestamp(comment.created_at.as_deref()),
            comment.parent_number()
        ));
        lines.push(truncate_body(comment.body.as_deref()));
        lines.push(ENTRY_SEPARATOR.to_string());
    }
}

pub(super) fn reviews(
    lines: &mut Vec<String>,
    reviews: &[PullReview],
    comments: &[PullReviewComment],
) {
    lines.push("=== PR REVIEWS ===".to_string());
    if reviews.is_empty() && comments.is_empty() {
        lines.push("(no PR reviews)".to_string());
        return;
    }

    if !reviews.is_empty() {
        lines.push(">> Review events:".to_string());
        for review in reviews {
            lines.push(format!(
                "{} @ {} on PR #{} [state={}]",
                review.author(),
                format_timestamp(review.submitted_at.as_deref()),
                review.parent_number(),
                review.state
            ));
            let body = truncate_body(review.body.as_deref());
            if !body.is_empty() {
                lines.push(body);
            }
            lines.push(ENTRY_SEPARATOR.to_string());
        }
    }

    if !comments.is_empty() {
        lines.push(String::new());
        lines.push(">> Review comments:".to_string());
        for comment in comments {
            lines.push(format!(
                "{} @ {} on PR #{}",
                comment.author(),
                format_timestamp(comment.created_at.as_deref()),
                comment.parent_number()
            ));
            lines.push(truncate_body(comment.body.as_deref()));
            lines.push(ENTRY_SEPARATOR.to_string());
        }
    }
}

pub(super) fn releases(lines: &mut Vec<String>, releases: &[Release]) {
    lines.push("=== RELEASES ===".to_string());
    if releases.is_empty() {
        lines.push("(no releases)".to_string());
        return;
    }
    for release in releases {
        lines.push(format!(
            "Release {} ({}) created {}, published {}",
            release.tag_name,
            release.name.as_deref().unwrap_or(NOT_AVAILABLE),
            format_timestamp(release.created_at.as_deref()),
            format_timestamp(release.published_at.as_deref())
        ));
        let notes = truncate_body(release.body.as_deref());
        if !notes.is_empty() {
            lines.push("Notes:".to_string());
            lines.push(notes);
        }
        lines.push(ENTRY_SEPARATOR.to_string());
    }
}
