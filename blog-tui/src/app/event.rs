//! Terminal event polling

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

use crate::app::Action;

#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Key press (releases and repeats are dropped)
    Key(KeyEvent),

    Resize(u16, u16),

    /// Nothing happened within the tick rate
    Tick,
}

impl From<TuiEvent> for Action {
    fn from(event: TuiEvent) -> Self {
        match event {
            TuiEvent::Key(key) => Action::Key(key),
            TuiEvent::Resize(w, h) => Action::Resize(w, h),
            TuiEvent::Tick => Action::Tick,
        }
    }
}

/// Event handler that polls for terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Wait up to the tick rate for the next event
    pub fn next(&self) -> std::io::Result<TuiEvent> {
        if !event::poll(self.tick_rate)? {
            return Ok(TuiEvent::Tick);
        }

        match event::read()? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(TuiEvent::Key(key)),
            CrosstermEvent::Resize(w, h) => Ok(TuiEvent::Resize(w, h)),
            _ => Ok(TuiEvent::Tick),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_custom_tick_rate() {
        let handler = EventHandler::new(250);
        assert_eq!(handler.tick_rate, Duration::from_millis(250));
    }

    #[test]
    fn test_event_into_action() {
        let key = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);

        assert!(matches!(Action::from(TuiEvent::Key(key)), Action::Key(k) if k == key));
        assert!(matches!(Action::from(TuiEvent::Resize(80, 24)), Action::Resize(80, 24)));
        assert!(matches!(Action::from(TuiEvent::Tick), Action::Tick));
    }
}
