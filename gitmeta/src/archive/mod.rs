//! Archive packaging of a snapshot.
//!
//! Every file lives under the `.gitmeta/` root:
//!
//! ```text
//! .gitmeta/
//! ├── raw/                 pretty-printed entities as fetched
//! ├── llm/issues/          {number}.thread.jsonl per issue
//! ├── llm/pulls/           {number}.thread.jsonl per pull request
//! ├── archive/gitmeta.txt  the text digest
//! └── sync_state.json
//! ```

mod error;
mod file_map;
mod sync_state;

pub use error::ArchiveError;
pub use file_map::FileMap;
pub use sync_state::SyncState;

use crate::digest::build_digest;
use crate::models::ParentLink;
use crate::snapshot::Snapshot;
use crate::threads::{build_issue_thread, build_pull_thread, group_by};
use serde::Serialize;
use tracing::info;

/// Directory every archive path starts with.
pub const ARCHIVE_ROOT: &str = ".gitmeta";

/// Path of the digest inside the archive.
pub const DIGEST_PATH: &str = "archive/gitmeta.txt";

/// Lays out every file of the archive for `snapshot`.
///
/// # Errors
///
/// Returns [`ArchiveError::Json`] if an entity fails to serialize.
pub fn build_file_map(snapshot: &Snapshot) -> Result<FileMap, ArchiveError> {
    let mut files = FileMap::new();

    write_json(&mut files, "raw/summary.json", &snapshot.summary)?;
    for issue in &snapshot.issues {
        write_json(&mut files, &format!("raw/issues/{}.json", issue.number), issue)?;
    }
    for pull in &snapshot.pulls {
        write_json(&mut files, &format!("raw/pulls/{}.json", pull.number), pull)?;
    }
    for comment in &snapshot.issue_comments {
        let path = format!("raw/issue_comments/{}.json", comment.id);
        write_json(&mut files, &path, comment)?;
    }
    for release in &snapshot.releases {
        write_json(&mut files, &format!("raw/releases/{}.json", release.id), release)?;
    }
    for review in &snapshot.reviews {
        let path = format!("raw/reviews/{}-{}.json", review.parent_number(), review.id);
        write_json(&mut files, &path, review)?;
    }
    for comment in &snapshot.review_comments {
        let path = format!(
            "raw/review_comments/{}-{}.json",
            comment.parent_number(),
            comment.id
        );
        write_json(&mut files, &path, comment)?;
    }

    write_threads(&mut files, snapshot)?;
    files.insert(archive_path(DIGEST_PATH), build_digest(snapshot));
    write_json(&mut files, "sync_state.json", &SyncState::from_snapshot(snapshot))?;

    Ok(files)
}

/// Builds the zip archive for `snapshot`.
///
/// # Errors
///
/// Returns [`ArchiveError`] if serialization or compression fails.
pub fn build_archive(snapshot: &Snapshot) -> Result<Vec<u8>, ArchiveError> {
    let files = build_file_map(snapshot)?;
    let bytes = files.to_zip()?;
    info!(files = files.len(), bytes = bytes.len(), "Packaged archive");
    Ok(bytes)
}

fn write_threads(files: &mut FileMap, snapshot: &Snapshot) -> Result<(), ArchiveError> {
    let repo = snapshot.repo_name();
    let comments_by_issue = group_by(&snapshot.issue_comments, |c| Some(c.parent_number()));
    let reviews_by_pull = group_by(&snapshot.reviews, |r| Some(r.parent_number()));
    let comments_by_pull = group_by(&snapshot.review_comments, |c| Some(c.parent_number()));

    for issue in &snapshot.issues {
        let key = issue.number.to_string();
        let comments = comments_by_issue.get(&key).map_or(&[][..], Vec::as_slice);
        let path = format!("llm/issues/{key}.thread.jsonl");
        let thread = build_issue_thread(issue, comments, repo)
            .map_err(|source| json_error(&path, source))?;
        files.insert(archive_path(&path), thread);
    }

    for pull in &snapshot.pulls {
        let key = pull.number.to_string();
        let reviews = reviews_by_pull.get(&key).map_or(&[][..], Vec::as_slice);
        let comments = comments_by_pull.get(&key).map_or(&[][..], Vec::as_slice);
        let path = format!("llm/pulls/{key}.thread.jsonl");
        let thread = build_pull_thread(pull, reviews, comments, repo)
            .map_err(|source| json_error(&path, source))?;
        files.insert(archive_path(&path), thread);
    }

    Ok(())
}

fn write_json<S: Serialize>(
    files: &mut FileMap,
    path: &str,
    value: &S,
) -> Result<(), ArchiveError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| json_error(path, source))?;
    files.insert(archive_path(path), json);
    Ok(())
}

fn archive_path(relative: &str) -> String {
    format!("{ARCHIVE_ROOT}/{relative}")
}

fn json_error(path: &str, source: serde_json::Error) -> ArchiveError {
    ArchiveError::Json {
        path: archive_path(path),
        source,
    }
}
