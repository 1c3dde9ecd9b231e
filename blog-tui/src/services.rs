//! Service layer adapter for the TUI
//!
//! The event loop is synchronous; `ServiceHandle` owns a tokio runtime and
//! blocks on each store operation, turning its outcome into an [`Action`]
//! for the reducer.
//!
//! # Example
//!
//! ```no_run
//! use blog_tui::services::ServiceHandle;
//! use blog_tui::{Action, Effect};
//! use libblog::Config;
//!
//! # fn example() -> blog_tui::error::Result<()> {
//! let mut services = ServiceHandle::new(&Config::default())?;
//!
//! match services.run(Effect::FetchPosts) {
//!     Action::EffectSucceeded(_) => {}
//!     other => println!("{other:?}"),
//! }
//!
//! if let Some(posts) = services.poll_posts() {
//!     println!("{} posts", posts.len());
//! }
//! # Ok(())
//! # }
//! ```

use libblog::service::PostHandle;
use libblog::{Backend, BlogService, Config, Post};

use crate::app::{Action, Effect};
use crate::error::Result;

pub struct ServiceHandle {
    service: BlogService,
    handle: PostHandle,
    runtime: tokio::runtime::Runtime,
}

impl ServiceHandle {
    /// Build the post service for `config` with its own runtime
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be created or the service
    /// rejects the configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let service = BlogService::from_config(config)?;
        Self::from_service(service)
    }

    /// Wrap an already built service
    pub fn from_service(service: BlogService) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let handle = service.handle();

        Ok(Self {
            service,
            handle,
            runtime,
        })
    }

    pub fn backend(&self) -> Backend {
        self.service.backend()
    }

    /// Current collection
    pub fn posts(&self) -> Vec<Post> {
        self.handle.state()
    }

    /// The collection, if it changed since the last poll
    pub fn poll_posts(&mut self) -> Option<Vec<Post>> {
        if !self.handle.has_changed() {
            return None;
        }
        Some(self.handle.value().state)
    }

    /// Perform a store operation, blocking until it completes
    pub fn run(&self, effect: Effect) -> Action {
        tracing::debug!(?effect, "Running effect");

        let actions = self.handle.actions();
        let result = self.runtime.block_on(async {
            match &effect {
                Effect::FetchPosts => actions.fetch_posts().await,
                Effect::CreatePost(input) => {
                    actions
                        .add_post(input.title.clone(), input.content.clone())
                        .await
                }
                Effect::UpdatePost { id, input } => {
                    actions
                        .edit_post(*id, input.title.clone(), input.content.clone())
                        .await
                }
                Effect::DeletePost(id) => actions.delete_post(*id).await,
            }
        });

        match result {
            Ok(()) => Action::EffectSucceeded(effect),
            Err(e) => {
                tracing::warn!(?effect, error = %e, "Effect failed");
                Action::EffectFailed {
                    effect,
                    error: e.to_string(),
                }
            }
        }
    }
}
