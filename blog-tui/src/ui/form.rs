//! The post form shared by the create and edit screens

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{AppState, FormField};

pub(super) fn render_form(frame: &mut Frame, area: Rect, state: &AppState, title: &str) {
    let outer = Block::default().title(title).borders(Borders::ALL);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title field
            Constraint::Min(3),    // Content field
        ])
        .split(inner);

    let form = &state.form;
    let focused = |field: FormField| {
        if form.focus == field && state.config.colors_enabled {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        }
    };

    let title_field = Paragraph::new(form.title.as_str()).block(
        Block::default()
            .title(" Title ")
            .borders(Borders::ALL)
            .border_style(focused(FormField::Title)),
    );
    frame.render_widget(title_field, chunks[0]);

    let content_field = Paragraph::new(form.content.as_str())
        .block(
            Block::default()
                .title(" Content ")
                .borders(Borders::ALL)
                .border_style(focused(FormField::Content)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(content_field, chunks[1]);

    // Cursor at the end of the focused field (wrapping is not tracked)
    let (rect, text) = match form.focus {
        FormField::Title => (chunks[0], &form.title),
        FormField::Content => (chunks[1], &form.content),
    };
    let (column, row) = cursor_offset(text, rect.width.saturating_sub(2));
    frame.set_cursor_position(Position::new(
        rect.x.saturating_add(1).saturating_add(column),
        rect.y
            .saturating_add(1)
            .saturating_add(row.min(rect.height.saturating_sub(3))),
    ));
}

/// Column and row just past `text` in a field `width` cells wide
fn cursor_offset(text: &str, width: u16) -> (u16, u16) {
    let width = width.max(1);
    let cells = u16::try_from(Line::from(text).width()).unwrap_or(u16::MAX);
    (cells % width, cells / width)
}
