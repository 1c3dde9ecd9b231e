//! Actions for the post collection reducer
//!
//! Actions are plain data describing a requested transition. They serialize
//! with a `kind` tag so they can be logged or replayed; kinds this build does
//! not know deserialize to [`Action::Unknown`], which the reducer ignores.

use serde::{Deserialize, Serialize};

use crate::types::{Post, PostId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Action {
    /// Append a new post; the reducer allocates its id
    Create { title: String, content: String },

    /// Append a post whose id the remote store already assigned
    Insert { post: Post },

    /// Drop every post with this id
    Delete { id: PostId },

    /// Replace every post with the same id as `post`
    Update { post: Post },

    /// Replace the whole collection
    ReplaceAll { posts: Vec<Post> },

    /// Any kind this build does not recognise
    #[serde(other)]
    Unknown,
}

impl Action {
    pub fn create(title: impl Into<String>, content: impl Into<String>) -> Self {
        Action::Create {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Tag used in the serialized form
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Create { .. } => "create",
            Action::Insert { .. } => "insert",
            Action::Delete { .. } => "delete",
            Action::Update { .. } => "update",
            Action::ReplaceAll { .. } => "replaceAll",
            Action::Unknown => "unknown",
        }
    }
}
