//! The post collection: actions, reducer and bound operations
//!
//! - Actions: what can happen to the collection
//! - Reducer: pure function `(Vec<Post>, Action) -> Vec<Post>`
//! - Creators: operations views call, bound to a provider's dispatch

pub mod action;
pub mod creators;
pub mod reducer;

pub use action::Action;
pub use creators::{LocalPostActions, PostActions, PostDispatch, RemotePostActions};
pub use reducer::reduce;

use std::sync::Arc;

use crate::context::{create_data_context, DataContext};
use crate::remote::PostsApi;
use crate::types::Post;

/// Operation bundle exposed to views, whichever backend is bound
pub type BoxedPostActions = Box<dyn PostActions>;

/// Context over the post collection
pub type PostContext = DataContext<Vec<Post>, Action, BoxedPostActions>;

/// Context whose operations only touch in-process state
pub fn local_context(initial: Vec<Post>) -> PostContext {
    create_data_context(
        reduce,
        |dispatch| Box::new(LocalPostActions::new(dispatch)) as BoxedPostActions,
        initial,
    )
}

/// Context whose operations go through a remote store first
pub fn remote_context(api: Arc<dyn PostsApi>) -> PostContext {
    create_data_context(
        reduce,
        move |dispatch| Box::new(RemotePostActions::new(dispatch, Arc::clone(&api))) as BoxedPostActions,
        Vec::new(),
    )
}
