use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::Result;
use std::time::Duration;

use crate::state::IntroState;

/// Event handler for the intro overlay
pub struct EventHandler;

impl EventHandler {
    /// Read a pending terminal event without blocking
    pub fn read() -> Result<Option<Event>> {
        match crossterm::event::poll(Duration::ZERO) {
            Ok(true) => Ok(Some(crossterm::event::read()?)),
            _ => Ok(None),
        }
    }

    /// Map a key press to an intro action
    pub fn handle_key_event(event: KeyEvent, state: &IntroState) -> Option<KeyAction> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
            return Some(KeyAction::Exit);
        }

        if state.is_playing() { Self::handle_playing_key(event, state) } else { Self::handle_ready_key(event) }
    }

    fn handle_playing_key(event: KeyEvent, state: &IntroState) -> Option<KeyAction> {
        match event.code {
            KeyCode::Enter => Some(KeyAction::Interrupt),
            KeyCode::Esc => Some(KeyAction::InterruptAndExit),
            KeyCode::Char('s') | KeyCode::Char('S') if state.can_skip() => Some(KeyAction::Skip),
            _ => None,
        }
    }

    fn handle_ready_key(event: KeyEvent) -> Option<KeyAction> {
        match event.code {
            KeyCode::Enter => Some(KeyAction::Continue),
            KeyCode::Esc | KeyCode::Char('q') => Some(KeyAction::Exit),
            _ => None,
        }
    }
}

/// Actions the intro reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Finish typing now and continue
    Interrupt,
    /// Finish typing now and leave
    InterruptAndExit,
    /// Skip the intro (paid plans only)
    Skip,
    /// Continue after the intro finished
    Continue,
    /// Leave the program
    Exit,
}
