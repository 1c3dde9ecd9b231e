//! Service facade for Blogcast
//!
//! `BlogService` is the composition root: it reads the configuration, picks
//! the backend and owns the provider for the post collection. Views receive
//! a [`PostHandle`] from it instead of reaching for shared globals.
//!
//! # Example
//!
//! ```no_run
//! use libblog::service::BlogService;
//!
//! # async fn example() -> libblog::Result<()> {
//! let service = BlogService::new()?;
//! let handle = service.handle();
//!
//! handle.actions().fetch_posts().await?;
//! handle.actions().add_post("Title".to_string(), "Body".to_string()).await?;
//!
//! for post in handle.state() {
//!     println!("{}: {}", post.id, post.title);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::config::{Backend, Config};
use crate::context::{ContextHandle, Provider};
use crate::error::Result;
use crate::posts::{local_context, remote_context, BoxedPostActions, PostContext};
use crate::remote::http::HttpPostsClient;
use crate::remote::PostsApi;
use crate::types::{seed_posts, Post};

/// Handle to the post collection and its operations
pub type PostHandle = ContextHandle<Vec<Post>, BoxedPostActions>;

/// Composition root owning the post provider
pub struct BlogService {
    backend: Backend,
    provider: Provider<Vec<Post>, BoxedPostActions>,
}

impl BlogService {
    /// Create a service from the default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the HTTP
    /// client cannot be built.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::from_config(&config)
    }

    /// Create a service from an explicit configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.store.backend {
            Backend::Local => {
                let initial = if config.store.seed { seed_posts() } else { Vec::new() };
                Ok(Self::local(initial))
            }
            Backend::Remote => {
                let client = HttpPostsClient::new(&config.remote)?;
                tracing::info!(base_url = client.base_url(), "Using remote post store");
                Ok(Self::remote(Arc::new(client)))
            }
        }
    }

    /// Service over in-process state starting from `initial`
    pub fn local(initial: Vec<Post>) -> Self {
        Self::with_context(Backend::Local, local_context(initial))
    }

    /// Service backed by a remote store
    pub fn remote(api: Arc<dyn PostsApi>) -> Self {
        Self::with_context(Backend::Remote, remote_context(api))
    }

    fn with_context(backend: Backend, context: PostContext) -> Self {
        Self {
            backend,
            provider: context.provide(),
        }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Handle for a view
    pub fn handle(&self) -> PostHandle {
        self.provider.handle()
    }

    /// Current collection
    pub fn posts(&self) -> Vec<Post> {
        self.provider.state()
    }
}
