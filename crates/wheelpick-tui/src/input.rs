use crossterm::event::KeyEvent;

use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusLeft,
    FocusRight,
    /// Tab: move focus right, wrapping to the first wheel
    CycleFocus,
    NextItem,
    PrevItem,
    /// Scroll the focused wheel by its visible span
    NextPage,
    PrevPage,
    Confirm,
    /// Jump all wheels to today's date
    Today,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, keymap: &Keymap) -> Action {
    let binding = KeyBinding::new(key.code, key.modifiers);
    keymap.get(&binding).copied().unwrap_or(Action::None)
}
