//! Pure reducer for the post collection
//!
//! `(Vec<Post>, Action) -> Vec<Post>`. No I/O, no randomness, no failure
//! path: anything it cannot apply leaves the collection as it was.

use super::action::Action;
use crate::types::{id_after, lowest_free_id, Post, PostId};

/// Apply an action to a collection
///
/// Id matching for `Delete` and `Update` is naive: every post carrying the
/// id is affected.
pub fn reduce(posts: Vec<Post>, action: Action) -> Vec<Post> {
    match action {
        Action::Create { title, content } => {
            let id = next_id(&posts);
            let mut posts = posts;
            posts.push(Post { id, title, content });
            posts
        }

        Action::Insert { post } => {
            let mut posts = posts;
            posts.push(post);
            posts
        }

        Action::Delete { id } => posts.into_iter().filter(|post| post.id != id).collect(),

        Action::Update { post } => posts
            .into_iter()
            .map(|existing| {
                if existing.id == post.id {
                    post.clone()
                } else {
                    existing
                }
            })
            .collect(),

        Action::ReplaceAll { posts } => posts,

        Action::Unknown => posts,
    }
}

/// Smallest id greater than every id in the collection
///
/// Once the largest id is `PostId::MAX`, the lowest unused id is taken instead.
pub fn next_id(posts: &[Post]) -> PostId {
    id_after(posts).unwrap_or_else(|| lowest_free_id(posts))
}
