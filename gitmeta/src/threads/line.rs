//! JSON shapes of thread lines.

use serde::Serialize;

/// One line of a thread document, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ThreadLine<'a> {
    Meta(MetaLine<'a>),
    Message(MessageLine<'a>),
    Review(ReviewLine<'a>),
}

/// Kind of discussion a thread describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjType {
    Issue,
    Pull,
}

/// First line of every thread.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaLine<'a> {
    pub obj_type: ObjType,
    pub repo: &'a str,
    pub number: u64,
    pub title: &'a str,
    pub state: &'a str,
    /// Only present on pull threads, where it may be null.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<Option<&'a str>>,
    pub author: &'a str,
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
    pub milestone: Option<&'a str>,
    pub created_at: Option<&'a str>,
    pub closed_at: Option<&'a str>,
}

/// Who wrote a message line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Author,
    Participant,
    ReviewComment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageLine<'a> {
    pub role: Role,
    pub author: &'a str,
    pub created_at: Option<&'a str>,
    pub text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewLine<'a> {
    pub author: &'a str,
    pub state: &'a str,
    pub created_at: Option<&'a str>,
    pub text: &'a str,
}
