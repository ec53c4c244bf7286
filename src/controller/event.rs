//! Events delivered to the controller

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A single input to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed
    Key(KeyEvent),
    /// The terminal was resized
    Resize { width: u16, height: u16 },
    /// A scheduled one-second tick fired at the given instant
    Tick(Instant),
    /// Anything the controller does not react to
    Other,
}

impl From<crossterm::event::Event> for Event {
    fn from(event: crossterm::event::Event) -> Self {
        match event {
            crossterm::event::Event::Key(key) => Event::Key(key),
            crossterm::event::Event::Resize(width, height) => Event::Resize { width, height },
            _ => Event::Other,
        }
    }
}

/// What a recognized key asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Start,
    Quit,
}

impl KeyAction {
    /// Map a key press to an action. Matching is case-sensitive and only
    /// press events count.
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let bare = key.modifiers == KeyModifiers::NONE;
        let ctrl = key.modifiers == KeyModifiers::CONTROL;
        match key.code {
            KeyCode::Char('s') if bare || ctrl => Some(Self::Start),
            KeyCode::Char('q') if bare => Some(Self::Quit),
            KeyCode::Char('c') if ctrl => Some(Self::Quit),
            _ => None,
        }
    }
}
