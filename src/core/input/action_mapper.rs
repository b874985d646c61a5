//=========================================================================
// Action Mapper
//=========================================================================
//
// Maps raw keys and mouse buttons to actions.
//
// Architecture:
//   KeyCode     → HashMap → Action
//   MouseButton → HashMap → Action
//
// Several inputs may share an action (W and ArrowUp both move up); each
// input maps to at most one action.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::debug;

//=== Internal Dependencies ===============================================

use super::{
    action::Action,
    event::{InputEvent, KeyCode, MouseButton},
};

//=== ActionMapper ========================================================

/// Binding table from physical inputs to [`Action`]s.
pub struct ActionMapper {
    key_bindings: HashMap<KeyCode, Action>,
    mouse_bindings: HashMap<MouseButton, Action>,
}

impl ActionMapper {
    /// Creates a mapper with no bindings.
    pub fn new() -> Self {
        Self {
            key_bindings: HashMap::new(),
            mouse_bindings: HashMap::new(),
        }
    }

    /// Creates a mapper with the stock layout.
    ///
    /// | Action    | Inputs               |
    /// |-----------|----------------------|
    /// | MoveUp    | W, ArrowUp           |
    /// | MoveDown  | S, ArrowDown         |
    /// | MoveLeft  | A, ArrowLeft         |
    /// | MoveRight | D, ArrowRight        |
    /// | Confirm   | Enter, Space, Left   |
    /// | Cancel    | Escape               |
    pub fn with_defaults() -> Self {
        let mut mapper = Self::new();

        mapper.bind_key(KeyCode::KeyW, Action::MoveUp);
        mapper.bind_key(KeyCode::ArrowUp, Action::MoveUp);
        mapper.bind_key(KeyCode::KeyS, Action::MoveDown);
        mapper.bind_key(KeyCode::ArrowDown, Action::MoveDown);
        mapper.bind_key(KeyCode::KeyA, Action::MoveLeft);
        mapper.bind_key(KeyCode::ArrowLeft, Action::MoveLeft);
        mapper.bind_key(KeyCode::KeyD, Action::MoveRight);
        mapper.bind_key(KeyCode::ArrowRight, Action::MoveRight);
        mapper.bind_key(KeyCode::Enter, Action::Confirm);
        mapper.bind_key(KeyCode::Space, Action::Confirm);
        mapper.bind_key(KeyCode::Escape, Action::Cancel);
        mapper.bind_mouse(MouseButton::Left, Action::Confirm);

        mapper
    }

    //--- Binding API ------------------------------------------------------

    /// Binds `key` to `action`, replacing any previous binding of `key`.
    pub fn bind_key(&mut self, key: KeyCode, action: Action) {
        if let Some(old) = self.key_bindings.insert(key, action) {
            debug!("Rebound {:?}: {:?} → {:?}", key, old, action);
        }
    }

    pub fn bind_mouse(&mut self, button: MouseButton, action: Action) {
        if let Some(old) = self.mouse_bindings.insert(button, action) {
            debug!("Rebound {:?}: {:?} → {:?}", button, old, action);
        }
    }

    pub fn unbind_key(&mut self, key: KeyCode) {
        self.key_bindings.remove(&key);
    }

    pub fn unbind_mouse(&mut self, button: MouseButton) {
        self.mouse_bindings.remove(&button);
    }

    /// Removes every input bound to `action`.
    pub fn clear_action(&mut self, action: Action) {
        self.key_bindings.retain(|_, bound| *bound != action);
        self.mouse_bindings.retain(|_, bound| *bound != action);
    }

    //--- Event Mapping ----------------------------------------------------

    /// Returns the action bound to the key or button in `event`.
    ///
    /// Cursor motion never maps to an action.
    pub fn map_event(&self, event: &InputEvent) -> Option<Action> {
        match event {
            InputEvent::KeyDown(key) | InputEvent::KeyUp(key) => self.map_key(*key),
            InputEvent::MouseButtonDown(button) | InputEvent::MouseButtonUp(button) => {
                self.map_button(*button)
            }
            InputEvent::MouseMoved { .. } => None,
        }
    }

    pub fn map_key(&self, key: KeyCode) -> Option<Action> {
        self.key_bindings.get(&key).copied()
    }

    pub fn map_button(&self, button: MouseButton) -> Option<Action> {
        self.mouse_bindings.get(&button).copied()
    }

    /// Keys currently bound to `action`.
    pub fn keys_for(&self, action: Action) -> impl Iterator<Item = KeyCode> + '_ {
        self.key_bindings
            .iter()
            .filter(move |(_, bound)| **bound == action)
            .map(|(key, _)| *key)
    }
}

impl Default for ActionMapper {
    fn default() -> Self {
        Self::with_defaults()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
