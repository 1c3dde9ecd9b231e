//! Application module
//!
//! - Actions: what can happen
//! - State: what is true right now
//! - Reducer: pure `(State, Action) -> State`
//!
//! Work against the post store is never done in the reducer. It records an
//! [`Effect`] in `AppState::pending_effect`; the event loop takes it, runs it
//! through the service handle and feeds the outcome back as an action.

pub mod actions;
pub mod state;
pub mod reducer;
pub mod event;

pub use actions::{Action, Effect, Screen};
pub use state::{AppState, FormField, FormState, StatusBarState, UiConfig};
pub use reducer::reduce;
