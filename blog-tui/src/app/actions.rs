//! Actions for the reducer pattern
//!
//! All state transitions are triggered by actions. Key presses arrive as
//! `Action::Key` and are mapped to the higher level actions below by the
//! reducer itself.

use crossterm::event::KeyEvent;
use libblog::{PostId, PostInput};

#[derive(Debug, Clone)]
pub enum Action {
    // === UI Events ===
    /// Keyboard input event
    Key(KeyEvent),

    /// Periodic tick
    Tick,

    /// Terminal resize event
    Resize(u16, u16),

    // === Navigation ===
    /// Navigate to a different screen
    NavigateTo(Screen),

    /// Leave the current screen for its parent
    Back,

    Quit,

    ShowHelp,

    HideHelp,

    // === Index ===
    SelectNext,

    SelectPrevious,

    /// The post collection changed
    PostsUpdated(Vec<libblog::Post>),

    // === Post form ===
    /// Character typed into the focused field
    FormInput(char),

    FormBackspace,

    /// Move focus between title and content
    FormSwitchField,

    /// Submit the form from the current screen
    FormSubmit,

    // === Store operations ===
    /// Queue an operation for the event loop
    Request(Effect),

    /// Operation finished; screens continue from here
    EffectSucceeded(Effect),

    /// Operation failed; state is unchanged apart from the error overlay
    EffectFailed { effect: Effect, error: String },

    // === Error Handling ===
    ShowError(String),

    DismissError,

    // === Status Bar ===
    SetStatus(String),

    ClearStatus,
}

/// Screen/View identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// List of post titles
    Index,

    /// One post in full
    Show(PostId),

    /// Empty post form
    Create,

    /// Post form filled from an existing post
    Edit(PostId),
}

/// Operation on the post store, run outside the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPosts,
    CreatePost(PostInput),
    UpdatePost { id: PostId, input: PostInput },
    DeletePost(PostId),
}

impl Effect {
    /// Present-tense label for the status bar while the operation runs
    pub fn label(&self) -> String {
        match self {
            Effect::FetchPosts => "Loading posts".to_string(),
            Effect::CreatePost(_) => "Creating post".to_string(),
            Effect::UpdatePost { id, .. } => format!("Saving post {id}"),
            Effect::DeletePost(id) => format!("Deleting post {id}"),
        }
    }
}
