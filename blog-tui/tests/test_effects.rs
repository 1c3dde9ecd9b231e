//! Reducer and service handle together, the way the event loop drives them

use std::sync::Arc;

use blog_tui::app::{reduce, Action, AppState, Effect, Screen};
use blog_tui::services::ServiceHandle;
use libblog::error::RemoteError;
use libblog::remote::mock::MockPostsApi;
use libblog::types::seed_posts;
use libblog::{Backend, BlogService, Config, Post};
use tempfile::TempDir;

/// Run queued effects until none is left, as the event loop does
fn settle(mut state: AppState, services: &mut ServiceHandle) -> AppState {
    while let Some(effect) = state.pending_effect.take() {
        let outcome = services.run(effect);
        if let Some(posts) = services.poll_posts() {
            state = reduce(state, Action::PostsUpdated(posts));
        }
        state = reduce(state, outcome);
    }
    state
}

fn local() -> (AppState, ServiceHandle) {
    let mut services = ServiceHandle::from_service(BlogService::local(seed_posts())).unwrap();
    let state = AppState::with_posts(services.posts());
    let state = settle(state, &mut services);
    (state, services)
}

#[test]
fn test_boot_fetch_settles() {
    let (state, _services) = local();

    assert!(!state.busy);
    assert_eq!(state.posts, seed_posts());
    assert!(state.error.is_none());
}

#[test]
fn test_create_appears_on_index() {
    let (state, mut services) = local();

    let state = reduce(state, Action::NavigateTo(Screen::Create));
    let mut state = state;
    state.form.title = "A".to_string();
    state.form.content = "B".to_string();
    let state = reduce(state, Action::FormSubmit);
    let state = settle(state, &mut services);

    assert_eq!(state.current_screen, Screen::Index);
    assert_eq!(state.posts.len(), 2);
    assert_eq!(state.posts[1].title, "A");
    assert_eq!(state.status.message.as_deref(), Some("Post created"));
}

#[test]
fn test_edit_returns_to_show_with_new_values() {
    let (state, mut services) = local();

    let state = reduce(state, Action::NavigateTo(Screen::Edit(37)));
    let mut state = state;
    state.form.content = "Edited".to_string();
    let state = reduce(state, Action::FormSubmit);
    let state = settle(state, &mut services);

    assert_eq!(state.current_screen, Screen::Show(37));
    assert_eq!(state.posts, vec![Post::new(37, "Test Post #1", "Edited")]);
}

#[test]
fn test_delete_empties_seed_collection() {
    let (state, mut services) = local();

    let state = reduce(state, Action::Request(Effect::DeletePost(37)));
    let state = settle(state, &mut services);

    assert!(state.posts.is_empty());
    assert!(state.selected_post().is_none());
}

#[test]
fn test_remote_failure_shows_error_and_keeps_posts() {
    let api = MockPostsApi::with_posts(vec![Post::new(1, "Remote", "post")]);
    let mut services = ServiceHandle::from_service(BlogService::remote(Arc::new(api.clone()))).unwrap();
    assert_eq!(services.backend(), Backend::Remote);

    let state = settle(AppState::new(), &mut services);
    assert_eq!(state.posts, api.posts());

    api.fail_with(RemoteError::Network("connection refused".to_string()));
    let state = reduce(state, Action::Request(Effect::DeletePost(1)));
    let state = settle(state, &mut services);

    assert_eq!(state.posts, vec![Post::new(1, "Remote", "post")]);
    assert_eq!(
        state.error.as_deref(),
        Some("Deleting post 1 failed: Remote error: Network error: connection refused")
    );
    assert!(!state.busy);
}

#[test]
fn test_service_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "[store]\nbackend = \"local\"\nseed = false\n").unwrap();

    let config = Config::load_from_path(&path).unwrap();
    let mut services = ServiceHandle::new(&config).unwrap();
    let state = settle(AppState::new(), &mut services);

    assert_eq!(services.backend(), Backend::Local);
    assert!(state.posts.is_empty());
}
