//! Releases.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A release from `GET /repos/{owner}/{repo}/releases`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Release {
    /// Release id.
    pub id: u64,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Git tag.
    #[serde(default)]
    pub tag_name: String,

    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,

    /// Publication timestamp. Drafts have none.
    #[serde(default)]
    pub published_at: Option<String>,

    /// Release notes.
    #[serde(default)]
    pub body: Option<String>,

    /// Remaining fields as returned by GitHub.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
