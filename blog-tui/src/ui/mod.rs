//! UI rendering
//!
//! Render functions only read state; they never dispatch.

mod form;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{AppState, Screen};
use libblog::types::find_post;
use libblog::PostId;

/// Main rendering entry point
pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Screen
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    match state.current_screen {
        Screen::Index => render_index(frame, chunks[0], state),
        Screen::Show(id) => render_show(frame, chunks[0], state, id),
        Screen::Create => form::render_form(frame, chunks[0], state, " New Post "),
        Screen::Edit(_) => form::render_form(frame, chunks[0], state, " Edit Post "),
    }

    render_status_bar(frame, chunks[1], state);

    if state.help_visible {
        render_help_overlay(frame, area);
    }

    if let Some(ref error) = state.error {
        render_error_overlay(frame, area, error);
    }
}

fn accent(state: &AppState, color: Color) -> Style {
    if state.config.colors_enabled {
        Style::default().fg(color)
    } else {
        Style::default()
    }
}

fn render_index(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(format!(" Posts ({}) ", state.posts.len()))
        .borders(Borders::ALL);

    if state.posts.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No posts yet", accent(state, Color::Yellow))),
            Line::from(""),
            Line::from("Press n to write one"),
        ])
        .block(block)
        .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .posts
        .iter()
        .map(|post| ListItem::new(post.title.clone()))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(accent(state, Color::Cyan).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_show(frame: &mut Frame, area: Rect, state: &AppState, id: PostId) {
    let Some(post) = find_post(&state.posts, id) else {
        // Removed while on screen
        let gone = Paragraph::new(format!("Post {id} no longer exists. Press Esc to go back."))
            .block(Block::default().title(" Post ").borders(Borders::ALL))
            .alignment(Alignment::Center);
        frame.render_widget(gone, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            post.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(post.content.lines().map(Line::from));

    let body = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!(" Post #{} ", post.id))
                .borders(Borders::ALL),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(body, area);
}

fn hints(state: &AppState) -> &'static str {
    match state.current_screen {
        Screen::Index => "n: New | Enter: Open | d: Delete | r: Refresh | F1: Help | q: Quit",
        Screen::Show(_) => "e: Edit | d: Delete | Esc: Back | F1: Help | q: Quit",
        Screen::Create | Screen::Edit(_) => "Tab: Switch field | Enter: Save | Esc: Cancel",
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let message = if state.busy {
        let label = state
            .pending_effect
            .as_ref()
            .map(|effect| effect.label())
            .unwrap_or_else(|| "Working".to_string());
        Span::styled(format!("{label}..."), accent(state, Color::Yellow))
    } else if let Some(ref message) = state.status.message {
        Span::styled(message.as_str(), accent(state, Color::Green))
    } else {
        Span::raw("")
    };

    let lines = vec![
        Line::from(message),
        Line::from(Span::styled(hints(state), accent(state, Color::Gray))),
    ];

    frame.render_widget(Paragraph::new(lines).block(Block::default().borders(Borders::TOP)), area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 90, area);

    let help_text = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("Global:"),
        Line::from("  Ctrl+C   - Quit"),
        Line::from("  q        - Quit (outside forms)"),
        Line::from("  F1       - Toggle help"),
        Line::from("  Esc      - Dismiss overlay / back"),
        Line::from(""),
        Line::from("Posts:"),
        Line::from("  Up/Down  - Select"),
        Line::from("  Enter    - Open"),
        Line::from("  n        - New post"),
        Line::from("  d        - Delete"),
        Line::from("  r        - Refresh"),
        Line::from(""),
        Line::from("Post:"),
        Line::from("  e        - Edit"),
        Line::from(""),
        Line::from("Form:"),
        Line::from("  Tab      - Switch field"),
        Line::from("  Enter    - Save"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help, popup_area);
}

fn render_error_overlay(frame: &mut Frame, area: Rect, error: &str) {
    let popup_area = centered_rect(70, 30, area);

    let error_text = vec![
        Line::from(Span::styled("Error", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(error),
        Line::from(""),
        Line::from("Press Esc to dismiss"),
    ];

    let error_widget = Paragraph::new(error_text)
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(error_widget, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{reduce, Action, Effect};
    use libblog::types::seed_posts;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn idle() -> AppState {
        reduce(
            AppState::with_posts(seed_posts()),
            Action::EffectSucceeded(Effect::FetchPosts),
        )
    }

    #[test]
    fn test_index_lists_titles() {
        let screen = draw(&idle());

        assert!(screen.contains("Posts (1)"));
        assert!(screen.contains("Test Post #1"));
    }

    #[test]
    fn test_show_renders_content() {
        let state = reduce(idle(), Action::NavigateTo(Screen::Show(37)));
        let screen = draw(&state);

        assert!(screen.contains("Post #37"));
        assert!(screen.contains("Test Content #1"));
    }

    #[test]
    fn test_error_overlay_rendered() {
        let state = reduce(idle(), Action::NavigateTo(Screen::Show(99)));
        let screen = draw(&state);

        assert!(screen.contains("Post not found: 99"));
    }

    #[test]
    fn test_busy_status_shows_effect() {
        let state = AppState::new();
        let screen = draw(&state);

        assert!(screen.contains("Loading posts..."));
    }
}
