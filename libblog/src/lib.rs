//! Blogcast - short text posts backed by local state or a JSON server
//!
//! This library provides the state container, CRUD action creators and the
//! remote client shared by the blogcast binaries.

pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod posts;
pub mod remote;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use config::{Backend, Config};
pub use context::{create_data_context, ContextHandle, ContextValue, DataContext, Dispatch, Provider};
pub use error::{BlogError, Result};
pub use posts::{Action, PostActions};
pub use service::BlogService;
pub use types::{Post, PostId, PostInput};
