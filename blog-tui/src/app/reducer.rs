//! Pure reducer function for state transitions
//!
//! `(State, Action) -> State` with no I/O. Store operations are only
//! requested here (see [`Effect`]); the event loop performs them.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use libblog::types::require_post;

use super::actions::{Action, Effect, Screen};
use super::state::{AppState, FormField, FormState, StatusBarState};

pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Key(key) => handle_key(state, key),
        Action::Tick => state,
        Action::Resize(_, _) => state, // Terminal auto-handles resize

        // === Navigation ===
        Action::NavigateTo(screen) => navigate(state, screen),

        Action::Back => match state.current_screen {
            Screen::Index => state,
            Screen::Show(_) | Screen::Create => navigate(state, Screen::Index),
            Screen::Edit(id) => navigate(state, Screen::Show(id)),
        },

        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },

        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },

        // === Index ===
        Action::SelectNext => {
            let last = state.posts.len().saturating_sub(1);
            AppState {
                selected: (state.selected + 1).min(last),
                ..state
            }
        }

        Action::SelectPrevious => AppState {
            selected: state.selected.saturating_sub(1),
            ..state
        },

        Action::PostsUpdated(posts) => {
            let selected = state.selected.min(posts.len().saturating_sub(1));
            AppState {
                posts,
                selected,
                ..state
            }
        }

        // === Post form ===
        Action::FormInput(c) => {
            let mut form = state.form;
            form.focused_mut().push(c);
            AppState { form, ..state }
        }

        Action::FormBackspace => {
            let mut form = state.form;
            form.focused_mut().pop();
            AppState { form, ..state }
        }

        Action::FormSwitchField => {
            let focus = match state.form.focus {
                FormField::Title => FormField::Content,
                FormField::Content => FormField::Title,
            };
            AppState {
                form: FormState {
                    focus,
                    ..state.form
                },
                ..state
            }
        }

        Action::FormSubmit => {
            let input = state.form.input();
            match state.current_screen {
                Screen::Create => reduce(state, Action::Request(Effect::CreatePost(input))),
                Screen::Edit(id) => reduce(state, Action::Request(Effect::UpdatePost { id, input })),
                Screen::Index | Screen::Show(_) => state,
            }
        }

        // === Store operations ===
        Action::Request(effect) => AppState {
            busy: true,
            pending_effect: Some(effect),
            ..state
        },

        Action::EffectSucceeded(effect) => {
            let state = AppState {
                busy: false,
                ..state
            };
            match effect {
                Effect::FetchPosts => state,
                Effect::CreatePost(_) => {
                    let state = navigate(state, Screen::Index);
                    with_status(state, "Post created".to_string())
                }
                Effect::UpdatePost { id, .. } => {
                    let state = navigate(state, Screen::Show(id));
                    with_status(state, format!("Post {id} saved"))
                }
                Effect::DeletePost(id) => {
                    let state = match state.current_screen {
                        Screen::Show(shown) if shown == id => navigate(state, Screen::Index),
                        _ => state,
                    };
                    with_status(state, format!("Post {id} deleted"))
                }
            }
        }

        Action::EffectFailed { effect, error } => AppState {
            busy: false,
            error: Some(format!("{} failed: {}", effect.label(), error)),
            ..state
        },

        // === Error Handling ===
        Action::ShowError(error) => AppState {
            error: Some(error),
            ..state
        },

        Action::DismissError => AppState {
            error: None,
            ..state
        },

        // === Status Bar ===
        Action::SetStatus(message) => with_status(state, message),

        Action::ClearStatus => AppState {
            status: StatusBarState { message: None },
            ..state
        },
    }
}

fn with_status(state: AppState, message: String) -> AppState {
    AppState {
        status: StatusBarState {
            message: Some(message),
        },
        ..state
    }
}

/// Switch screens, preparing what the target screen needs
///
/// A status message belongs to the screen it was set on.
fn navigate(state: AppState, screen: Screen) -> AppState {
    let state = reduce(state, Action::ClearStatus);
    match screen {
        // Every visit to the index reloads the collection
        Screen::Index => reduce(
            AppState {
                current_screen: Screen::Index,
                ..state
            },
            Action::Request(Effect::FetchPosts),
        ),

        Screen::Show(id) => match require_post(&state.posts, id).map(|_| ()) {
            Ok(()) => AppState {
                current_screen: screen,
                ..state
            },
            Err(e) => reduce(state, Action::ShowError(e.to_string())),
        },

        Screen::Create => AppState {
            current_screen: screen,
            form: FormState::default(),
            ..state
        },

        Screen::Edit(id) => match require_post(&state.posts, id).map(FormState::from_post) {
            Ok(form) => AppState {
                current_screen: screen,
                form,
                ..state
            },
            Err(e) => reduce(state, Action::ShowError(e.to_string())),
        },
    }
}

/// Map keys to actions. This is where keybindings are defined.
fn handle_key(state: AppState, key: KeyEvent) -> AppState {
    // Global keybindings
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            return reduce(state, Action::Quit);
        }

        (KeyCode::F(1), _) => {
            let action = if state.help_visible { Action::HideHelp } else { Action::ShowHelp };
            return reduce(state, action);
        }

        (KeyCode::Esc, _) if state.error.is_some() => {
            return reduce(state, Action::DismissError);
        }

        (KeyCode::Esc, _) if state.help_visible => {
            return reduce(state, Action::HideHelp);
        }

        _ => {}
    }

    if state.overlay_visible() || state.busy {
        return state;
    }

    if key.code == KeyCode::Esc {
        return reduce(state, Action::Back);
    }

    match state.current_screen {
        Screen::Index => handle_index_key(state, key),
        Screen::Show(id) => handle_show_key(state, key, id),
        Screen::Create | Screen::Edit(_) => handle_form_key(state, key),
    }
}

fn handle_index_key(state: AppState, key: KeyEvent) -> AppState {
    match key.code {
        KeyCode::Char('q') => reduce(state, Action::Quit),
        KeyCode::Down | KeyCode::Char('j') => reduce(state, Action::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => reduce(state, Action::SelectPrevious),
        KeyCode::Char('n') => reduce(state, Action::NavigateTo(Screen::Create)),
        KeyCode::Char('r') => reduce(state, Action::Request(Effect::FetchPosts)),
        KeyCode::Enter => match state.selected_post().map(|p| p.id) {
            Some(id) => reduce(state, Action::NavigateTo(Screen::Show(id))),
            None => state,
        },
        KeyCode::Char('d') => match state.selected_post().map(|p| p.id) {
            Some(id) => reduce(state, Action::Request(Effect::DeletePost(id))),
            None => state,
        },
        _ => state,
    }
}

fn handle_show_key(state: AppState, key: KeyEvent, id: libblog::PostId) -> AppState {
    match key.code {
        KeyCode::Char('q') => reduce(state, Action::Quit),
        KeyCode::Char('e') => reduce(state, Action::NavigateTo(Screen::Edit(id))),
        KeyCode::Char('d') => reduce(state, Action::Request(Effect::DeletePost(id))),
        _ => state,
    }
}

/// Form keys: every printable character is text, so `q` does not quit here
fn handle_form_key(state: AppState, key: KeyEvent) -> AppState {
    match (key.code, key.modifiers) {
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => reduce(state, Action::FormSwitchField),
        (KeyCode::Enter, _) => reduce(state, Action::FormSubmit),
        (KeyCode::Backspace, _) => reduce(state, Action::FormBackspace),
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            reduce(state, Action::FormInput(c))
        }
        _ => state,
    }
}
