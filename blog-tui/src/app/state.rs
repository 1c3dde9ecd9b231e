//! Application state
//!
//! All state transitions happen through the reducer (see `reducer.rs`).

use libblog::{Post, PostInput};

use super::actions::{Effect, Screen};

/// Root application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Should the application quit?
    pub should_quit: bool,

    /// Current active screen
    pub current_screen: Screen,

    /// Help overlay visible?
    pub help_visible: bool,

    /// Latest snapshot of the post collection
    pub posts: Vec<Post>,

    /// Cursor on the index screen
    pub selected: usize,

    /// Shared create/edit form
    pub form: FormState,

    /// An operation is running; keys other than quit are ignored
    pub busy: bool,

    /// Operation waiting for the event loop
    pub pending_effect: Option<Effect>,

    /// Status bar state
    pub status: StatusBarState,

    /// Error overlay state
    pub error: Option<String>,

    /// UI configuration
    pub config: UiConfig,
}

/// Which form field receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Content,
}

/// Title and content being edited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub title: String,
    pub content: String,
    pub focus: FormField,
}

impl FormState {
    /// Form prefilled with an existing post
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            focus: FormField::Title,
        }
    }

    /// What the form submits
    pub fn input(&self) -> PostInput {
        PostInput::new(self.title.clone(), self.content.clone())
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Content => &mut self.content,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusBarState {
    pub message: Option<String>,
}

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Use colors?
    pub colors_enabled: bool,

    /// Tick rate in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            should_quit: false,
            current_screen: Screen::Index,
            help_visible: false,
            posts: Vec::new(),
            selected: 0,
            form: FormState::default(),
            busy: false,
            pending_effect: None,
            status: StatusBarState::default(),
            error: None,
            config: UiConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        let colors_enabled =
            std::env::var("NO_COLOR").is_err() && std::env::var("BLOG_TUI_NO_COLOR").is_err();

        let tick_rate_ms = std::env::var("BLOG_TUI_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        Self {
            colors_enabled,
            tick_rate_ms,
        }
    }
}

impl AppState {
    /// Boot state: the index screen with a fetch queued
    pub fn new() -> Self {
        Self {
            busy: true,
            pending_effect: Some(Effect::FetchPosts),
            ..Self::default()
        }
    }

    /// Boot state starting from a known collection
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts,
            ..Self::new()
        }
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.posts.get(self.selected)
    }

    /// Is a post form on screen?
    pub fn in_form(&self) -> bool {
        matches!(self.current_screen, Screen::Create | Screen::Edit(_))
    }

    /// Is an overlay capturing input?
    pub fn overlay_visible(&self) -> bool {
        self.help_visible || self.error.is_some()
    }
}
