//! In-memory post table with optional JSON file persistence
//!
//! The file layout is `{"posts": [...]}`, the same shape json-server uses
//! for its `db.json`, so an existing database can be pointed at directly.
//! Other top-level collections in that file are carried through untouched.

use std::path::{Path, PathBuf};

use libblog::types::{id_after, lowest_free_id};
use libblog::{Post, PostId, PostInput};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access database file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse database file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default, Deserialize)]
struct DbFile {
    #[serde(default)]
    posts: Vec<Post>,
    #[serde(flatten)]
    other: Map<String, Value>,
}

#[derive(Serialize)]
struct DbFileRef<'a> {
    posts: &'a [Post],
    #[serde(flatten)]
    other: &'a Map<String, Value>,
}

/// Post table; ids come from a counter and are never reused
///
/// Once the counter runs past `PostId::MAX`, new posts take the lowest free
/// id instead.
#[derive(Debug)]
pub struct PostStore {
    posts: Vec<Post>,
    next_id: Option<PostId>,
    other: Map<String, Value>,
    path: Option<PathBuf>,
}

impl PostStore {
    /// Store holding `posts`, kept in memory only
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            next_id: id_after(&posts),
            posts,
            other: Map::new(),
            path: None,
        }
    }

    /// Store backed by a JSON file
    ///
    /// A missing file starts an empty store; the file is written on the
    /// first mutation.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let db = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str::<DbFile>(&content)?
        } else {
            DbFile::default()
        };

        tracing::info!(path = %path.display(), count = db.posts.len(), "Opened post database");

        let mut store = Self::new(db.posts);
        store.other = db.other;
        store.path = Some(path.to_path_buf());
        Ok(store)
    }

    pub fn list(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn create(&mut self, input: PostInput) -> Result<Post, StoreError> {
        let id = self.next_id.unwrap_or_else(|| lowest_free_id(&self.posts));
        let post = input.with_id(id);

        let mut posts = self.posts.clone();
        posts.push(post.clone());
        self.commit(posts)?;

        self.next_id = self.next_id.and_then(|id| id.checked_add(1));
        Ok(post)
    }

    /// Returns `None` if no post has this id
    pub fn update(&mut self, id: PostId, input: PostInput) -> Result<Option<Post>, StoreError> {
        let Some(index) = self.posts.iter().position(|p| p.id == id) else {
            return Ok(None);
        };
        let updated = input.with_id(id);

        let mut posts = self.posts.clone();
        posts[index] = updated.clone();
        self.commit(posts)?;

        Ok(Some(updated))
    }

    /// Returns false if no post has this id
    pub fn delete(&mut self, id: PostId) -> Result<bool, StoreError> {
        let posts: Vec<Post> = self.posts.iter().filter(|p| p.id != id).cloned().collect();
        if posts.len() == self.posts.len() {
            return Ok(false);
        }
        self.commit(posts)?;
        Ok(true)
    }

    /// Persist `posts`, then make them the current table
    ///
    /// On error the table is left as it was.
    fn commit(&mut self, posts: Vec<Post>) -> Result<(), StoreError> {
        self.save(&posts)?;
        self.posts = posts;
        Ok(())
    }

    fn save(&self, posts: &[Post]) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let db = DbFileRef {
            posts,
            other: &self.other,
        };
        let content = serde_json::to_string_pretty(&db)?;

        // Replace the file in one step so a partial write never lands on it
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, content)?;
        if let Err(e) = std::fs::rename(&temp_path, path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }

        tracing::debug!(path = %path.display(), "Saved post database");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ids_are_not_reused() {
        let mut store = PostStore::new(Vec::new());

        let first = store.create(PostInput::new("a", "1")).unwrap();
        assert!(store.delete(first.id).unwrap());

        let second = store.create(PostInput::new("b", "2")).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_update_and_delete_missing() {
        let mut store = PostStore::new(vec![Post::new(1, "a", "b")]);

        assert!(store.update(2, PostInput::new("x", "y")).unwrap().is_none());
        assert!(!store.delete(2).unwrap());
        assert_eq!(store.list(), &[Post::new(1, "a", "b")]);
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("db.json");

        let mut store = PostStore::open(&path).unwrap();
        assert!(store.list().is_empty());
        store.create(PostInput::new("Saved", "to disk")).unwrap();
        store.update(1, PostInput::new("Saved", "edited")).unwrap();

        let reopened = PostStore::open(&path).unwrap();
        assert_eq!(reopened.list(), &[Post::new(1, "Saved", "edited")]);
    }

    #[test]
    fn test_open_json_server_db() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("db.json");
        std::fs::write(
            &path,
            r#"{"posts":[{"id":3,"title":"Existing","content":"post"}],"comments":[]}"#,
        )
        .unwrap();

        let mut store = PostStore::open(&path).unwrap();
        assert_eq!(store.get(3).map(|p| p.title.as_str()), Some("Existing"));

        let created = store.create(PostInput::new("Next", "one")).unwrap();
        assert_eq!(created.id, 4);

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["comments"], serde_json::json!([]));
        assert_eq!(written["posts"].as_array().map(Vec::len), Some(2));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_other_collections_survive_writes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("db.json");
        std::fs::write(&path, r#"{"posts":[],"comments":[{"id":1}],"profile":{"name":"x"}}"#).unwrap();

        let mut store = PostStore::open(&path).unwrap();
        let post = store.create(PostInput::new("a", "b")).unwrap();
        store.delete(post.id).unwrap();

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!({"posts": [], "comments": [{"id": 1}], "profile": {"name": "x"}})
        );
    }

    #[test]
    fn test_failed_save_leaves_table_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing_dir").join("db.json");

        let mut store = PostStore::open(&path).unwrap();
        assert!(matches!(store.create(PostInput::new("a", "b")), Err(StoreError::Io(_))));
        assert!(store.list().is_empty());

        // The failed create did not consume an id
        std::fs::create_dir(path.parent().unwrap()).unwrap();
        let post = store.create(PostInput::new("a", "b")).unwrap();
        assert_eq!(post.id, 1);

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
        assert!(store.update(1, PostInput::new("x", "y")).is_err());
        assert!(store.delete(1).is_err());
        assert_eq!(store.list(), &[Post::new(1, "a", "b")]);
    }

    #[test]
    fn test_create_past_max_id_takes_lowest_free() {
        let mut store = PostStore::new(vec![Post::new(PostId::MAX, "big", "id")]);

        let first = store.create(PostInput::new("a", "1")).unwrap();
        let second = store.create(PostInput::new("b", "2")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_open_corrupt_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("db.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(PostStore::open(&path), Err(StoreError::Json(_))));
    }
}
