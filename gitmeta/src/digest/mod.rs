//! Plain-text digest of a snapshot.
//!
//! The digest is one flat report with six sections in a fixed order:
//! summary, issues, pull requests, issue comments, PR reviews and releases.
//! Sections are separated by two blank lines and every entry ends with
//! `---`. Formatting is total: missing fields render as placeholders.

mod sections;

use crate::snapshot::Snapshot;

/// Renders `snapshot` as the text digest.
///
/// Lines are joined with `\n`; the result has no trailing newline. The same
/// snapshot always renders to the same bytes.
pub fn build_digest(snapshot: &Snapshot) -> String {
    let mut lines = Vec::new();

    sections::summary(&mut lines, &snapshot.summary);
    section_break(&mut lines);
    sections::issues(&mut lines, &snapshot.issues);
    section_break(&mut lines);
    sections::pulls(&mut lines, &snapshot.pulls);
    section_break(&mut lines);
    sections::issue_comments(&mut lines, &snapshot.issue_comments);
    section_break(&mut lines);
    sections::reviews(&mut lines, &snapshot.reviews, &snapshot.review_comments);
    section_break(&mut lines);
    sections::releases(&mut lines, &snapshot.releases);

    lines.join("\n")
}

fn section_break(lines: &mut Vec<String>) {
    lines.push(String::new());
    lines.push(String::new());
}
