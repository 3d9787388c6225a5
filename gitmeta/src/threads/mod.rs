//! JSON-lines reconstruction of issue and pull request conversations.
//!
//! A thread starts with a `meta` line describing the issue or pull, followed
//! by the opening post (when it has a body) and then the replies in source
//! order. Each line is a standalone JSON object terminated by `\n`.

mod group;
mod line;

pub use group::group_by;
pub use line::{MessageLine, MetaLine, ObjType, ReviewLine, Role, ThreadLine};

use crate::models::{Discussion, Issue, IssueComment, PullRequest, PullReview, PullReviewComment};

/// Builds the thread document for an issue and its comments.
///
/// # Errors
///
/// Returns an error if a line fails to serialize.
pub fn build_issue_thread(
    issue: &Issue,
    comments: &[&IssueComment],
    repo: &str,
) -> Result<String, serde_json::Error> {
    let mut lines = vec![ThreadLine::Meta(meta_line(issue, ObjType::Issue, repo, None))];
    push_author_message(&mut lines, issue);

    lines.extend(comments.iter().map(|comment| {
        ThreadLine::Message(MessageLine {
            role: Role::Participant,
            author: comment.author(),
            created_at: comment.created_at.as_deref(),
            text: comment.body.as_deref().unwrap_or_default(),
        })
    }));

    serialize(&lines)
}

/// Builds the thread document for a pull request, its reviews and its
/// review comments.
///
/// # Errors
///
/// Returns an error if a line fails to serialize.
pub fn build_pull_thread(
    pull: &PullRequest,
    reviews: &[&PullReview],
    review_comments: &[&PullReviewComment],
    repo: &str,
) -> Result<String, serde_json::Error> {
    let merged_at = Some(pull.merged_at.as_deref());
    let mut lines = vec![ThreadLine::Meta(meta_line(pull, ObjType::Pull, repo, merged_at))];
    push_author_message(&mut lines, pull);

    lines.extend(reviews.iter().map(|review| {
        ThreadLine::Review(ReviewLine {
            author: review.author(),
            state: &review.state,
            created_at: review.submitted_at.as_deref(),
            text: review.body.as_deref().unwrap_or_default(),
        })
    }));

    lines.extend(review_comments.iter().map(|comment| {
        ThreadLine::Message(MessageLine {
            role: Role::ReviewComment,
            author: comment.author(),
            created_at: comment.created_at.as_deref(),
            text: comment.body.as_deref().unwrap_or_default(),
        })
    }));

    serialize(&lines)
}

fn meta_line<'a, D: Discussion>(
    item: &'a D,
    obj_type: ObjType,
    repo: &'a str,
    merged_at: Option<Option<&'a str>>,
) -> MetaLine<'a> {
    MetaLine {
        obj_type,
        repo,
        number: item.number(),
        title: item.title(),
        state: item.state(),
        merged_at,
        author: item.author(),
        labels: item.label_names(),
        assignees: item.assignee_logins(),
        milestone: item.milestone_title(),
        created_at: item.created_at(),
        closed_at: item.closed_at(),
    }
}

fn push_author_message<'a, D: Discussion>(lines: &mut Vec<ThreadLine<'a>>, item: &'a D) {
    if let Some(body) = item.body().filter(|body| !body.is_empty()) {
        lines.push(ThreadLine::Message(MessageLine {
            role: Role::Author,
            author: item.author(),
            created_at: item.created_at(),
            text: body,
        }));
    }
}

fn serialize(lines: &[ThreadLine<'_>]) -> Result<String, serde_json::Error> {
    let mut out = String::new();
    for line in lines {
        out.push_str(&serde_json::to_string(line)?);
        out.push('\n');
    }
    Ok(out)
}
