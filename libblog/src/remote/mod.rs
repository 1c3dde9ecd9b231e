//! Remote post store abstraction
//!
//! The remote variant persists posts in a REST-like JSON server:
//!
//! | Method | Path          | Body                 | Response        |
//! |--------|---------------|----------------------|-----------------|
//! | GET    | `/posts`      |                      | array of posts  |
//! | GET    | `/posts/{id}` |                      | post            |
//! | POST   | `/posts`      | `{title, content}`   | created post    |
//! | PUT    | `/posts/{id}` | `{title, content}`   | updated post    |
//! | DELETE | `/posts/{id}` |                      | ignored         |
//!
//! # Examples
//!
//! ```no_run
//! use libblog::remote::{PostsApi, http::HttpPostsClient};
//! use libblog::config::RemoteConfig;
//! use libblog::PostInput;
//!
//! # async fn example() -> libblog::Result<()> {
//! let client = HttpPostsClient::new(&RemoteConfig::default())?;
//!
//! let created = client.create(&PostInput::new("Hello", "First post")).await?;
//! println!("Created post {}", created.id);
//!
//! for post in client.list().await? {
//!     println!("{}: {}", post.id, post.title);
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Post, PostId, PostInput};

pub mod http;

// Mock store is available for all builds (not just tests) to support integration tests
pub mod mock;

/// CRUD interface to a remote post store
#[async_trait]
pub trait PostsApi: Send + Sync {
    /// Fetch every post, in the store's order
    async fn list(&self) -> Result<Vec<Post>>;

    /// Fetch a single post
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Api` with status 404 if the store has no such post.
    async fn get(&self, id: PostId) -> Result<Post>;

    /// Create a post and return it with its assigned id
    async fn create(&self, input: &PostInput) -> Result<Post>;

    /// Replace title and content of an existing post
    async fn update(&self, id: PostId, input: &PostInput) -> Result<Post>;

    /// Delete a post
    async fn delete(&self, id: PostId) -> Result<()>;
}
