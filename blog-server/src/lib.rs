//! JSON post server for Blogcast
//!
//! Serves the `/posts` resource the remote backend of `libblog` talks to:
//!
//! | Method   | Path          | Success               | Missing id |
//! |----------|---------------|-----------------------|------------|
//! | `GET`    | `/posts`      | 200, array of posts   |            |
//! | `GET`    | `/posts/{id}` | 200, the post         | 404        |
//! | `POST`   | `/posts`      | 201, the created post |            |
//! | `PUT`    | `/posts/{id}` | 200, the updated post | 404        |
//! | `DELETE` | `/posts/{id}` | 200, `{}`             | 404        |

pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::RwLock;

pub use store::{PostStore, StoreError};

pub struct AppState {
    pub store: RwLock<PostStore>,
}

impl AppState {
    pub fn new(store: PostStore) -> Arc<Self> {
        Arc::new(Self {
            store: RwLock::new(store),
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route(
            "/posts",
            get(routes::list_posts).post(routes::create_post),
        )
        .route(
            "/posts/{id}",
            get(routes::get_post)
                .put(routes::update_post)
                .delete(routes::delete_post),
        )
        .with_state(state)
}

/// Serve `store` on an already bound listener until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, store: PostStore, shutdown: F) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = router(AppState::new(store));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
