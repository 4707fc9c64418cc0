//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings alongside arrow keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Terminals disagree on whether shifted characters (`?`, `G`) and
    /// Shift+Tab carry the SHIFT modifier, so it is dropped for those codes
    /// before lookup. Event kind and state flags are ignored.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        let modifiers = match key.code {
            KeyCode::Char(_) | KeyCode::BackTab => key.modifiers - KeyModifiers::SHIFT,
            _ => key.modifiers,
        };
        self.bindings
            .get(&KeyEvent::new(key.code, modifiers))
            .copied()
    }

    /// Human-readable key labels for an action, in binding order.
    pub fn labels_for(&self, action: KeyAction) -> Vec<String> {
        let mut labels: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| key_label(key))
            .collect();
        labels.sort();
        labels
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

fn key_label(key: &KeyEvent) -> String {
    let base = match key.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        other => format!("{other:?}"),
    };
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        format!("Ctrl+{base}")
    } else {
        base
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;

        // Vim-style movement
        keys.bind(KeyCode::Char('k'), none, KeyAction::MoveUp);
        keys.bind(KeyCode::Char('j'), none, KeyAction::MoveDown);
        keys.bind(KeyCode::Char('h'), none, KeyAction::MoveLeft);
        keys.bind(KeyCode::Char('l'), none, KeyAction::MoveRight);

        // Arrow keys
        keys.bind(KeyCode::Up, none, KeyAction::MoveUp);
        keys.bind(KeyCode::Down, none, KeyAction::MoveDown);
        keys.bind(KeyCode::Left, none, KeyAction::MoveLeft);
        keys.bind(KeyCode::Right, none, KeyAction::MoveRight);

        // Page navigation
        keys.bind(KeyCode::Char('u'), ctrl, KeyAction::PageUp);
        keys.bind(KeyCode::Char('d'), ctrl, KeyAction::PageDown);
        keys.bind(KeyCode::PageUp, none, KeyAction::PageUp);
        keys.bind(KeyCode::PageDown, none, KeyAction::PageDown);

        // Card navigation
        keys.bind(KeyCode::Enter, none, KeyAction::Activate);
        keys.bind(KeyCode::Char(' '), none, KeyAction::Activate);
        keys.bind(KeyCode::Backspace, none, KeyAction::Back);
        keys.bind(KeyCode::Char('b'), none, KeyAction::Back);
        keys.bind(KeyCode::Tab, none, KeyAction::FocusNextElement);
        keys.bind(KeyCode::BackTab, none, KeyAction::FocusPrevElement);
        keys.bind(KeyCode::Esc, none, KeyAction::CloseOverlay);

        // Application controls
        keys.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), ctrl, KeyAction::Quit);
        keys.bind(KeyCode::Char('?'), none, KeyAction::Help);

        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    #[test]
    fn vim_and_arrow_keys_move_the_same_way() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(KeyAction::MoveDown)
        );
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)),
            Some(KeyAction::MoveDown)
        );
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE)),
            Some(KeyAction::MoveLeft)
        );
    }

    #[test]
    fn question_mark_with_shift_maps_to_help() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT)),
            Some(KeyAction::Help),
            "Shift reported with '?' must still open help"
        );
    }

    #[test]
    fn back_tab_with_shift_maps_to_previous_element() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(KeyAction::FocusPrevElement)
        );
    }

    #[test]
    fn control_modifier_is_significant() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Some(KeyAction::PageDown)
        );
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn event_state_flags_are_ignored() {
        let bindings = KeyBindings::default();
        let key = KeyEvent::new_with_kind_and_state(
            KeyCode::Esc,
            KeyModifiers::NONE,
            KeyEventKind::Press,
            KeyEventState::NUM_LOCK,
        );
        assert_eq!(bindings.get(key), Some(KeyAction::CloseOverlay));
    }

    #[test]
    fn labels_list_every_binding_for_an_action() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.labels_for(KeyAction::Back), vec!["Backspace", "b"]);
        assert_eq!(bindings.labels_for(KeyAction::Quit), vec!["Ctrl+c", "q"]);
    }
}
