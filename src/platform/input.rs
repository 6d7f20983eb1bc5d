//! Key events → logical tick input
//!
//! Only key presses count. Repeats from a held key are ignored so a jump or
//! flap fires once per press.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::TickInput;

/// Latches key presses until the next tick consumes them
#[derive(Debug, Default, Clone)]
pub struct InputCollector {
    pending: TickInput,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: &KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char(' ') | KeyCode::Up => self.pending.activate = true,
            KeyCode::Char('w') | KeyCode::Char('W') => self.pending.activate = true,
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => {
                self.pending.restart = true
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.pending.quit = true
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => self.pending.quit = true,
            _ => {}
        }
    }

    /// Whether quit has been requested since the last `take`
    pub fn quit_requested(&self) -> bool {
        self.pending.quit
    }

    /// Input for the next tick; clears the latch
    pub fn take(&mut self) -> TickInput {
        std::mem::take(&mut self.pending)
    }
}
