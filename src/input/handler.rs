//! Keyboard handler for terminal environments.
//!
//! Most commands are fire-and-forget, but the soft drop is stateful: it
//! starts on the first down press and must stop on release. Many terminals
//! never emit key release events, so a hold is kept alive by auto-repeat
//! presses and expires after a short timeout without one.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::GameAction;

/// How long a soft drop survives without a repeat press before it is treated
/// as released.
const SOFT_DROP_RELEASE_TIMEOUT_MS: u64 = 150;

/// Whether this key event should terminate the program.
pub fn should_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Maps key presses to commands and tracks the soft-drop hold.
#[derive(Debug, Clone)]
pub struct InputHandler {
    down_held: bool,
    last_down_press_ms: u64,
    release_timeout_ms: u64,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            down_held: false,
            last_down_press_ms: 0,
            release_timeout_ms: SOFT_DROP_RELEASE_TIMEOUT_MS,
        }
    }

    #[cfg(test)]
    fn with_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.release_timeout_ms = timeout_ms;
        self
    }

    /// Translate a key press (or terminal auto-repeat) into a command.
    ///
    /// A repeated down press while the soft drop is already held only
    /// refreshes the hold; it produces no second start command.
    pub fn handle_key_press(&mut self, code: KeyCode, now_ms: u64) -> Option<GameAction> {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::MoveLeft),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::MoveRight),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                let already_held = self.down_held;
                self.down_held = true;
                self.last_down_press_ms = now_ms;
                if already_held {
                    None
                } else {
                    Some(GameAction::SoftDropStart)
                }
            }
            KeyCode::Up | KeyCode::Char('e') | KeyCode::Char('E') => Some(GameAction::RotateCw),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(GameAction::RotateCcw),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::TogglePause),
            KeyCode::Enter => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Translate a key release. Only the down key carries release semantics.
    pub fn handle_key_release(&mut self, code: KeyCode) -> Option<GameAction> {
        match code {
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                if self.down_held {
                    self.down_held = false;
                    Some(GameAction::SoftDropStop)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Per-frame check: expire a soft-drop hold that stopped receiving
    /// repeat presses on a terminal without release events.
    pub fn poll_release(&mut self, now_ms: u64) -> Option<GameAction> {
        if self.down_held && now_ms.saturating_sub(self.last_down_press_ms) > self.release_timeout_ms
        {
            self.down_held = false;
            return Some(GameAction::SoftDropStop);
        }
        None
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_and_rotation_keys_map_directly() {
        let mut ih = InputHandler::new();
        assert_eq!(
            ih.handle_key_press(KeyCode::Left, 0),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            ih.handle_key_press(KeyCode::Char('d'), 0),
            Some(GameAction::MoveRight)
        );
        assert_eq!(
            ih.handle_key_press(KeyCode::Char('e'), 0),
            Some(GameAction::RotateCw)
        );
        assert_eq!(
            ih.handle_key_press(KeyCode::Char('q'), 0),
            Some(GameAction::RotateCcw)
        );
        assert_eq!(
            ih.handle_key_press(KeyCode::Enter, 0),
            Some(GameAction::Restart)
        );
        assert_eq!(ih.handle_key_press(KeyCode::Char('x'), 0), None);
    }

    #[test]
    fn repeated_down_press_does_not_restart_soft_drop() {
        let mut ih = InputHandler::new();
        assert_eq!(
            ih.handle_key_press(KeyCode::Down, 0),
            Some(GameAction::SoftDropStart)
        );
        assert_eq!(ih.handle_key_press(KeyCode::Down, 30), None);
        assert_eq!(
            ih.handle_key_release(KeyCode::Down),
            Some(GameAction::SoftDropStop)
        );
        // A release with nothing held is a no-op.
        assert_eq!(ih.handle_key_release(KeyCode::Down), None);
    }

    #[test]
    fn soft_drop_expires_without_repeat_presses() {
        let mut ih = InputHandler::new().with_release_timeout_ms(50);
        ih.handle_key_press(KeyCode::Char('s'), 0);

        assert_eq!(ih.poll_release(40), None);
        // A repeat press pushes the deadline out.
        ih.handle_key_press(KeyCode::Char('s'), 40);
        assert_eq!(ih.poll_release(80), None);
        assert_eq!(ih.poll_release(91), Some(GameAction::SoftDropStop));
        assert_eq!(ih.poll_release(200), None);
    }

    #[test]
    fn quit_keys() {
        use crossterm::event::{KeyEventKind, KeyEventState};

        let key = |code, modifiers| KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };

        assert!(should_quit(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(should_quit(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!should_quit(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!should_quit(&key(KeyCode::Enter, KeyModifiers::NONE)));
    }
}
