//! End-to-end tests: libblog's HTTP client against a live server

use std::sync::Arc;

use blog_server::PostStore;
use libblog::error::RemoteError;
use libblog::remote::http::HttpPostsClient;
use libblog::remote::PostsApi;
use libblog::types::seed_posts;
use libblog::{BlogError, BlogService, Post, PostInput};
use tempfile::TempDir;

/// Start a server on an ephemeral port and return its base URL
async fn spawn_server(store: PostStore) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(blog_server::serve(listener, store, std::future::pending()));

    format!("http://{addr}")
}

fn client(base_url: &str) -> HttpPostsClient {
    HttpPostsClient::with_client(reqwest::Client::new(), base_url)
}

#[tokio::test]
async fn test_crud_round_trip() {
    let base_url = spawn_server(PostStore::new(Vec::new())).await;
    let api = client(&base_url);

    assert!(api.list().await.unwrap().is_empty());

    let created = api.create(&PostInput::new("Hello", "World")).await.unwrap();
    assert_eq!(created, Post::new(1, "Hello", "World"));
    assert_eq!(api.get(1).await.unwrap(), created);

    let updated = api.update(1, &PostInput::new("Hello", "Again")).await.unwrap();
    assert_eq!(updated, Post::new(1, "Hello", "Again"));

    api.delete(1).await.unwrap();
    assert!(api.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_post_is_404() {
    let base_url = spawn_server(PostStore::new(seed_posts())).await;
    let api = client(&base_url);

    let err = api.get(99).await.unwrap_err();
    assert!(err.is_not_found());

    let err = api.update(99, &PostInput::new("x", "y")).await.unwrap_err();
    assert!(matches!(err, BlogError::Remote(RemoteError::Api { status: 404, .. })));

    assert!(api.delete(99).await.unwrap_err().is_not_found());
    assert_eq!(api.list().await.unwrap(), seed_posts());
}

#[tokio::test]
async fn test_create_status_and_delete_body() {
    let base_url = spawn_server(PostStore::new(Vec::new())).await;
    let http = reqwest::Client::new();

    let response = http
        .post(format!("{base_url}/posts"))
        .json(&serde_json::json!({"title": "T", "content": "C"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);

    let response = http
        .delete(format!("{base_url}/posts/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({}));
}

#[tokio::test]
async fn test_remote_service_against_server() {
    let base_url = spawn_server(PostStore::new(seed_posts())).await;
    let service = BlogService::remote(Arc::new(client(&base_url)));
    let handle = service.handle();

    handle.actions().fetch_posts().await.unwrap();
    assert_eq!(handle.state(), seed_posts());

    handle
        .actions()
        .add_post("Second".to_string(), "post".to_string())
        .await
        .unwrap();
    handle
        .actions()
        .edit_post(37, "Edited".to_string(), "seed".to_string())
        .await
        .unwrap();
    handle.actions().delete_post(38).await.unwrap();

    assert_eq!(handle.state(), vec![Post::new(37, "Edited", "seed")]);

    // Server agrees with the local view
    let server_posts = client(&base_url).list().await.unwrap();
    assert_eq!(server_posts, handle.state());
}

#[tokio::test]
async fn test_database_file_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("db.json");

    let base_url = spawn_server(PostStore::open(&path).unwrap()).await;
    client(&base_url)
        .create(&PostInput::new("Persisted", "post"))
        .await
        .unwrap();

    let base_url = spawn_server(PostStore::open(&path).unwrap()).await;
    let posts = client(&base_url).list().await.unwrap();
    assert_eq!(posts, vec![Post::new(1, "Persisted", "post")]);
}
