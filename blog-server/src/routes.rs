use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use libblog::{PostId, PostInput};
use tracing::{info, warn};

use crate::store::StoreError;
use crate::AppState;

fn not_found(id: PostId) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"error": format!("Post {id} not found")})),
    )
        .into_response()
}

fn store_failed(e: StoreError) -> Response {
    warn!(error = %e, "Failed to persist posts");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"error": "Failed to persist posts"})),
    )
        .into_response()
}

pub async fn list_posts(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.store.read().await;
    Json(store.list().to_vec())
}

pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<PostId>,
) -> impl IntoResponse {
    let store = state.store.read().await;
    match store.get(id) {
        Some(post) => Json(post.clone()).into_response(),
        None => not_found(id),
    }
}

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(input): Json<PostInput>,
) -> impl IntoResponse {
    let mut store = state.store.write().await;
    match store.create(input) {
        Ok(post) => {
            info!(id = post.id, "Created post");
            (StatusCode::CREATED, Json(post)).into_response()
        }
        Err(e) => store_failed(e),
    }
}

pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<PostId>,
    Json(input): Json<PostInput>,
) -> impl IntoResponse {
    let mut store = state.store.write().await;
    match store.update(id, input) {
        Ok(Some(post)) => {
            info!(id, "Updated post");
            Json(post).into_response()
        }
        Ok(None) => not_found(id),
        Err(e) => store_failed(e),
    }
}

pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<PostId>,
) -> impl IntoResponse {
    let mut store = state.store.write().await;
    match store.delete(id) {
        Ok(true) => {
            info!(id, "Deleted post");
            Json(serde_json::json!({})).into_response()
        }
        Ok(false) => not_found(id),
        Err(e) => store_failed(e),
    }
}
