//! Core types for Blogcast

use serde::{Deserialize, Serialize};

use crate::error::{BlogError, Result};

/// Identifier of a post, assigned locally or by the remote store
pub type PostId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
}

impl Post {
    pub fn new(id: PostId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Title and content of a post without its id
///
/// This is the request body for create/update calls and the value a post
/// form submits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostInput {
    pub title: String,
    pub content: String,
}

impl PostInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Attach an id, producing a full post
    pub fn with_id(self, id: PostId) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
        }
    }
}

impl From<&Post> for PostInput {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
        }
    }
}

/// The fixed collection a seeded provider starts from
pub fn seed_posts() -> Vec<Post> {
    vec![Post::new(37, "Test Post #1", "Test Content #1")]
}

/// Find a post by id
///
/// Returns `None` instead of dereferencing a missing entry.
pub fn find_post(posts: &[Post], id: PostId) -> Option<&Post> {
    posts.iter().find(|post| post.id == id)
}

/// Like [`find_post`], but a missing id is an error
pub fn require_post(posts: &[Post], id: PostId) -> Result<&Post> {
    find_post(posts, id).ok_or(BlogError::NotFound(id))
}

/// Id one past the largest in the collection, or `None` past `PostId::MAX`
pub fn id_after(posts: &[Post]) -> Option<PostId> {
    posts
        .iter()
        .map(|post| post.id)
        .max()
        .map_or(Some(1), |max| max.checked_add(1))
}

/// Smallest positive id no post carries
pub fn lowest_free_id(posts: &[Post]) -> PostId {
    let mut used: Vec<PostId> = posts.iter().map(|post| post.id).filter(|id| *id > 0).collect();
    used.sort_unstable();
    used.dedup();

    let mut candidate = 1;
    for id in used {
        if id != candidate {
            break;
        }
        candidate = candidate.saturating_add(1);
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_json_shape() {
        let post = Post::new(1, "Hello", "World");
        let json = serde_json::to_value(&post).unwrap();

        assert_eq!(json, serde_json::json!({"id": 1, "title": "Hello", "content": "World"}));
    }

    #[test]
    fn test_post_input_has_no_id() {
        let input = PostInput::new("Hello", "World");
        let json = serde_json::to_value(&input).unwrap();

        assert_eq!(json, serde_json::json!({"title": "Hello", "content": "World"}));
    }

    #[test]
    fn test_post_input_from_post() {
        let post = Post::new(5, "T", "C");
        let input = PostInput::from(&post);

        assert_eq!(input.with_id(5), post);
    }

    #[test]
    fn test_find_post_missing_returns_none() {
        let posts = seed_posts();

        assert_eq!(find_post(&posts, 37).map(|p| p.title.as_str()), Some("Test Post #1"));
        assert!(find_post(&posts, 38).is_none());
        assert!(find_post(&[], 37).is_none());
    }

    #[test]
    fn test_require_post_missing_is_not_found() {
        let posts = seed_posts();

        assert_eq!(require_post(&posts, 37).unwrap().id, 37);

        let err = require_post(&posts, 12).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Post not found: 12");
    }

    #[test]
    fn test_id_after_stops_at_max() {
        assert_eq!(id_after(&[]), Some(1));
        assert_eq!(id_after(&seed_posts()), Some(38));
        assert_eq!(id_after(&[Post::new(PostId::MAX, "big", "id")]), None);
    }

    #[test]
    fn test_lowest_free_id_fills_first_gap() {
        assert_eq!(lowest_free_id(&[]), 1);
        assert_eq!(lowest_free_id(&seed_posts()), 1);

        let posts = vec![
            Post::new(-4, "", ""),
            Post::new(2, "", ""),
            Post::new(1, "", ""),
            Post::new(1, "", ""),
            Post::new(PostId::MAX, "", ""),
        ];
        assert_eq!(lowest_free_id(&posts), 3);
    }
}
