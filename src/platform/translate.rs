//=========================================================================
// Winit Translation
//=========================================================================
//
// Turns winit window events into engine `InputEvent`s.
//
//   KeyboardInput  → key_event()     → KeyDown / KeyUp   (discrete)
//   MouseInput     → mouse_button()  → MouseButtonDown/Up (discrete)
//   CursorMoved    → cursor_moved()  → MouseMoved         (continuous)
//
// Held keys are tracked by the input manager, so OS key repeats are
// dropped here. Keys the engine has no code for are dropped as well.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    dpi::{LogicalPosition, PhysicalPosition},
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, MouseButton};

//=== Events ==============================================================

pub(crate) fn key_event(event: &KeyEvent) -> Option<InputEvent> {
    if event.repeat {
        return None;
    }
    let PhysicalKey::Code(code) = event.physical_key else {
        return None;
    };
    key_edge(KeyCode::from(code), event.state)
}

fn key_edge(key: KeyCode, state: ElementState) -> Option<InputEvent> {
    match (key, state) {
        (KeyCode::Unidentified, _) => None,
        (key, ElementState::Pressed) => Some(InputEvent::KeyDown(key)),
        (key, ElementState::Released) => Some(InputEvent::KeyUp(key)),
    }
}

pub(crate) fn mouse_button(button: WinitMouseButton, state: ElementState) -> InputEvent {
    let button = MouseButton::from(button);
    match state {
        ElementState::Pressed => InputEvent::MouseButtonDown(button),
        ElementState::Released => InputEvent::MouseButtonUp(button),
    }
}

/// Converts a physical cursor position into logical window coordinates,
/// the space the menu lays its buttons out in.
pub(crate) fn cursor_moved(position: PhysicalPosition<f64>, scale_factor: f64) -> InputEvent {
    let LogicalPosition { x, y } = position.to_logical::<f32>(scale_factor);
    InputEvent::MouseMoved { x, y }
}

//=== Conversions =========================================================

/// Maps winit codes onto the engine codes of the same name.
macro_rules! same_named_keys {
    ($code:expr; $($key:ident)*) => {
        match $code {
            $(WinitKeyCode::$key => KeyCode::$key,)*
            _ => KeyCode::Unidentified,
        }
    };
}

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        same_named_keys!(code;
            KeyA KeyB KeyC KeyD KeyE KeyF KeyG KeyH KeyI KeyJ KeyK KeyL KeyM
            KeyN KeyO KeyP KeyQ KeyR KeyS KeyT KeyU KeyV KeyW KeyX KeyY KeyZ
            Digit0 Digit1 Digit2 Digit3 Digit4 Digit5 Digit6 Digit7 Digit8 Digit9
            ArrowUp ArrowDown ArrowLeft ArrowRight
            Space Enter Escape Tab Backspace
        )
    }
}

/// Back, Forward and vendor buttons all become `Other`.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_edges_follow_element_state() {
        assert_eq!(
            key_edge(KeyCode::Escape, ElementState::Pressed),
            Some(InputEvent::KeyDown(KeyCode::Escape))
        );
        assert_eq!(
            key_edge(KeyCode::KeyW, ElementState::Released),
            Some(InputEvent::KeyUp(KeyCode::KeyW))
        );
        assert_eq!(key_edge(KeyCode::Unidentified, ElementState::Pressed), None);
    }

    #[test]
    fn bound_keys_keep_their_names() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyW), KeyCode::KeyW);
        assert_eq!(KeyCode::from(WinitKeyCode::Digit7), KeyCode::Digit7);
        assert_eq!(KeyCode::from(WinitKeyCode::ArrowLeft), KeyCode::ArrowLeft);
        assert_eq!(KeyCode::from(WinitKeyCode::Enter), KeyCode::Enter);
    }

    #[test]
    fn keys_without_engine_code_are_unidentified() {
        assert_eq!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified);
        assert_eq!(KeyCode::from(WinitKeyCode::Delete), KeyCode::Unidentified);
    }

    #[test]
    fn extra_mouse_buttons_collapse_to_other() {
        assert_eq!(
            mouse_button(WinitMouseButton::Right, ElementState::Pressed),
            InputEvent::MouseButtonDown(MouseButton::Right)
        );
        assert_eq!(
            mouse_button(WinitMouseButton::Back, ElementState::Released),
            InputEvent::MouseButtonUp(MouseButton::Other)
        );
    }

    #[test]
    fn cursor_is_reported_in_logical_pixels() {
        let position = PhysicalPosition::new(200.0, 100.0);

        assert_eq!(cursor_moved(position, 2.0), InputEvent::MouseMoved { x: 100.0, y: 50.0 });
        assert_eq!(cursor_moved(position, 1.0), InputEvent::MouseMoved { x: 200.0, y: 100.0 });
    }
}
