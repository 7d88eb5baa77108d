//! Key handling for the plot screen.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Action resulting from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// No action.
    None,
}

/// Maps key events to actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Handles a key event and returns the corresponding action.
    ///
    /// Only presses count; repeats and releases are ignored.
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> Action {
        if event.kind != KeyEventKind::Press {
            return Action::None;
        }

        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return match event.code {
                KeyCode::Char('c') => Action::Quit,
                _ => Action::None,
            };
        }

        match event.code {
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }
}
