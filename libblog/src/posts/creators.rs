//! Action creators bound to a dispatch capability
//!
//! Views call these operations; each one either dispatches straight away
//! (local backend) or talks to the remote store first and dispatches only
//! once the store has answered. A failed remote call dispatches nothing and
//! returns the error to the caller.

use std::sync::Arc;

use async_trait::async_trait;

use super::action::Action;
use crate::config::Backend;
use crate::context::Dispatch;
use crate::error::Result;
use crate::remote::PostsApi;
use crate::types::{Post, PostId, PostInput};

/// Dispatch capability over the post collection
pub type PostDispatch = Dispatch<Vec<Post>, Action>;

/// Operations a view can invoke on the post collection
///
/// Callers continue (navigate, close a form) after `Ok`; on `Err` the
/// collection is unchanged.
#[async_trait]
pub trait PostActions: Send + Sync {
    /// Create a post from a title and content
    async fn add_post(&self, title: String, content: String) -> Result<()>;

    /// Remove the post with this id
    async fn delete_post(&self, id: PostId) -> Result<()>;

    /// Replace the title and content of the post with this id
    async fn edit_post(&self, id: PostId, title: String, content: String) -> Result<()>;

    /// Reload the whole collection from the backing store
    async fn fetch_posts(&self) -> Result<()>;

    /// Which backend these operations act on
    fn backend(&self) -> Backend;
}

/// Operations on in-process state only
pub struct LocalPostActions {
    dispatch: PostDispatch,
}

impl LocalPostActions {
    pub fn new(dispatch: PostDispatch) -> Self {
        Self { dispatch }
    }
}

#[async_trait]
impl PostActions for LocalPostActions {
    async fn add_post(&self, title: String, content: String) -> Result<()> {
        self.dispatch.dispatch(Action::Create { title, content });
        Ok(())
    }

    async fn delete_post(&self, id: PostId) -> Result<()> {
        self.dispatch.dispatch(Action::Delete { id });
        Ok(())
    }

    async fn edit_post(&self, id: PostId, title: String, content: String) -> Result<()> {
        self.dispatch.dispatch(Action::Update {
            post: Post { id, title, content },
        });
        Ok(())
    }

    async fn fetch_posts(&self) -> Result<()> {
        // Local state is already authoritative
        Ok(())
    }

    fn backend(&self) -> Backend {
        Backend::Local
    }
}

/// Operations backed by a remote store
pub struct RemotePostActions {
    dispatch: PostDispatch,
    api: Arc<dyn PostsApi>,
}

impl RemotePostActions {
    pub fn new(dispatch: PostDispatch, api: Arc<dyn PostsApi>) -> Self {
        Self { dispatch, api }
    }
}

#[async_trait]
impl PostActions for RemotePostActions {
    async fn add_post(&self, title: String, content: String) -> Result<()> {
        let input = PostInput { title, content };
        let post = self.api.create(&input).await.inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to create post");
        })?;

        // The store assigned the id; append its copy rather than waiting
        // for the next fetch
        self.dispatch.dispatch(Action::Insert { post });
        Ok(())
    }

    async fn delete_post(&self, id: PostId) -> Result<()> {
        self.api.delete(id).await.inspect_err(|e| {
            tracing::warn!(id, error = %e, "Failed to delete post");
        })?;

        self.dispatch.dispatch(Action::Delete { id });
        Ok(())
    }

    async fn edit_post(&self, id: PostId, title: String, content: String) -> Result<()> {
        let input = PostInput { title, content };
        let post = self.api.update(id, &input).await.inspect_err(|e| {
            tracing::warn!(id, error = %e, "Failed to update post");
        })?;

        self.dispatch.dispatch(Action::Update { post });
        Ok(())
    }

    async fn fetch_posts(&self) -> Result<()> {
        let posts = self.api.list().await.inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to fetch posts");
        })?;

        tracing::debug!(count = posts.len(), "Fetched posts");
        self.dispatch.dispatch(Action::ReplaceAll { posts });
        Ok(())
    }

    fn backend(&self) -> Backend {
        Backend::Remote
    }
}
