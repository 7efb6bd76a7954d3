//! Keyboard input handling
//!
//! Terminals report key presses rather than key state. A key counts as held
//! until its release arrives or, when the terminal cannot report releases,
//! until the hold window passes without another press or repeat.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use pong_core::{Button, Buttons};

/// How long a press without a release counts as held
pub const HOLD_WINDOW: Duration = Duration::from_millis(150);

/// What a key event means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Hold(Button),
    Release(Button),
    Quit,
    Ignore,
}

fn button_for(code: KeyCode) -> Option<Button> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Button::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Button::Down),
        _ => None,
    }
}

/// Handle a key event
pub fn handle_key(key: KeyEvent) -> KeyAction {
    let quit = matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL));
    if quit {
        return match key.kind {
            KeyEventKind::Release => KeyAction::Ignore,
            _ => KeyAction::Quit,
        };
    }

    match (button_for(key.code), key.kind) {
        (Some(button), KeyEventKind::Release) => KeyAction::Release(button),
        (Some(button), _) => KeyAction::Hold(button),
        (None, _) => KeyAction::Ignore,
    }
}

/// Emulated button state for the two buttons the game reads
#[derive(Debug, Clone)]
pub struct HeldKeys {
    up: Option<Instant>,
    down: Option<Instant>,
    /// `None` when the terminal reports releases
    window: Option<Duration>,
}

impl HeldKeys {
    pub fn new(window: Option<Duration>) -> Self {
        Self {
            up: None,
            down: None,
            window,
        }
    }

    fn slot(&mut self, button: Button) -> Option<&mut Option<Instant>> {
        match button {
            Button::Up => Some(&mut self.up),
            Button::Down => Some(&mut self.down),
            _ => None,
        }
    }

    pub fn apply(&mut self, action: KeyAction, now: Instant) {
        match action {
            KeyAction::Hold(button) => {
                if let Some(slot) = self.slot(button) {
                    *slot = Some(now);
                }
            }
            KeyAction::Release(button) => {
                if let Some(slot) = self.slot(button) {
                    *slot = None;
                }
            }
            KeyAction::Quit | KeyAction::Ignore => {}
        }
    }

    fn held(&self, pressed: Option<Instant>, now: Instant) -> bool {
        match (pressed, self.window) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(at), Some(window)) => now.saturating_duration_since(at) <= window,
        }
    }

    pub fn buttons(&self, now: Instant) -> Buttons {
        let mut buttons = Buttons::NONE;
        if self.held(self.up, now) {
            buttons = buttons.with(Button::Up);
        }
        if self.held(self.down, now) {
            buttons = buttons.with(Button::Down);
        }
        buttons
    }
}
