//! Mock post store for testing
//!
//! An in-memory [`PostsApi`] that can be told to fail and records how often
//! each operation was called. Integration tests use it to exercise the
//! remote action creators without a server.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::PostsApi;
use crate::error::{RemoteError, Result};
use crate::types::{id_after, lowest_free_id, Post, PostId, PostInput};

/// Mock store state shared between clones
#[derive(Debug, Default)]
struct MockState {
    posts: Vec<Post>,
    /// `None` once the counter has run past `PostId::MAX`
    next_id: Option<PostId>,
    fail_with: Option<RemoteError>,
    list_calls: usize,
    create_calls: usize,
    update_calls: usize,
    delete_calls: usize,
}

/// In-memory remote store
#[derive(Clone)]
pub struct MockPostsApi {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockPostsApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPostsApi {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_posts(Vec::new())
    }

    /// Create a store holding these posts
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let next_id = id_after(&posts);
        Self {
            state: Arc::new(Mutex::new(MockState {
                posts,
                next_id,
                ..Default::default()
            })),
        }
    }

    /// Create a store where every call fails with a network error
    pub fn unreachable(message: &str) -> Self {
        let api = Self::new();
        api.fail_with(RemoteError::Network(message.to_string()));
        api
    }

    /// Make every subsequent call fail with this error
    pub fn fail_with(&self, error: RemoteError) {
        self.lock().fail_with = Some(error);
    }

    /// Stop injecting failures
    pub fn recover(&self) {
        self.lock().fail_with = None;
    }

    /// Posts currently held by the store
    pub fn posts(&self) -> Vec<Post> {
        self.lock().posts.clone()
    }

    pub fn list_call_count(&self) -> usize {
        self.lock().list_calls
    }

    pub fn create_call_count(&self) -> usize {
        self.lock().create_calls
    }

    pub fn update_call_count(&self) -> usize {
        self.lock().update_calls
    }

    pub fn delete_call_count(&self) -> usize {
        self.lock().delete_calls
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A panicking test must not poison the store for the others
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn not_found(id: PostId) -> RemoteError {
    RemoteError::Api {
        status: 404,
        message: format!("post {} not found", id),
    }
}

fn check(state: &MockState) -> Result<()> {
    match &state.fail_with {
        Some(error) => Err(error.clone().into()),
        None => Ok(()),
    }
}

#[async_trait]
impl PostsApi for MockPostsApi {
    async fn list(&self) -> Result<Vec<Post>> {
        let mut state = self.lock();
        state.list_calls += 1;
        check(&state)?;
        Ok(state.posts.clone())
    }

    async fn get(&self, id: PostId) -> Result<Post> {
        let state = self.lock();
        check(&state)?;
        state
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found(id).into())
    }

    async fn create(&self, input: &PostInput) -> Result<Post> {
        let mut state = self.lock();
        state.create_calls += 1;
        check(&state)?;

        let id = state.next_id.unwrap_or_else(|| lowest_free_id(&state.posts));
        state.next_id = state.next_id.and_then(|id| id.checked_add(1));
        let post = input.clone().with_id(id);
        state.posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, id: PostId, input: &PostInput) -> Result<Post> {
        let mut state = self.lock();
        state.update_calls += 1;
        check(&state)?;

        let existing = state
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found(id))?;
        *existing = input.clone().with_id(id);
        Ok(existing.clone())
    }

    async fn delete(&self, id: PostId) -> Result<()> {
        let mut state = self.lock();
        state.delete_calls += 1;
        check(&state)?;

        let before = state.posts.len();
        state.posts.retain(|p| p.id != id);
        if state.posts.len() == before {
            return Err(not_found(id).into());
        }
        Ok(())
    }
}
