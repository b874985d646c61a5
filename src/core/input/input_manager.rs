//=========================================================================
// Input Manager
//=========================================================================
//
// Turns raw input events into per-frame action state.
//
// Architecture:
//   InputEvent → ActionMapper → StateTracker → pressed/released/held
//
// Frame lifecycle:
//   handle_event()* → layers query → end_frame() (from the present layer)
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::{
    action::Action,
    action_mapper::ActionMapper,
    event::InputEvent,
    state_tracker::StateTracker,
};

//=== InputManager ========================================================

/// Action-level input state for the game-loop thread.
///
/// # Example
///
/// ```
/// use conquest_engine::core::input::{Action, InputEvent, InputManager, KeyCode};
///
/// let mut input = InputManager::new();
/// input.handle_event(&InputEvent::KeyDown(KeyCode::Escape));
///
/// assert!(input.pressed(Action::Cancel));
/// input.end_frame();
/// assert!(!input.pressed(Action::Cancel));
/// assert!(input.held(Action::Cancel));
/// ```
pub struct InputManager {
    mapper: ActionMapper,
    tracker: StateTracker,
}

impl InputManager {
    /// Creates a manager with the default bindings.
    pub fn new() -> Self {
        Self::with_mapper(ActionMapper::with_defaults())
    }

    pub fn with_mapper(mapper: ActionMapper) -> Self {
        Self {
            mapper,
            tracker: StateTracker::new(),
        }
    }

    //--- Event Intake -----------------------------------------------------

    /// Applies one raw event.
    pub fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(_) | InputEvent::MouseButtonDown(_) => {
                if let Some(action) = self.mapper.map_event(event) {
                    trace!("{:?} → {:?} down", event, action);
                    self.tracker.press(action);
                }
            }
            InputEvent::KeyUp(_) | InputEvent::MouseButtonUp(_) => {
                if let Some(action) = self.mapper.map_event(event) {
                    trace!("{:?} → {:?} up", event, action);
                    self.tracker.release(action);
                }
            }
            InputEvent::MouseMoved { x, y } => self.tracker.move_mouse(*x, *y),
        }
    }

    /// Applies a batch of raw events in order.
    pub fn handle_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.handle_event(event);
        }
    }

    /// Raises [`Action::Quit`] for this frame (window close request).
    pub fn request_quit(&mut self) {
        debug!("Quit requested");
        self.tracker.pulse(Action::Quit);
    }

    /// Clears this frame's pressed/released flags.
    pub fn end_frame(&mut self) {
        self.tracker.end_frame();
    }

    //--- Queries ----------------------------------------------------------

    /// `true` only on the frame `action` went down.
    pub fn pressed(&self, action: Action) -> bool {
        self.tracker.is_pressed(action)
    }

    /// `true` only on the frame `action` went up.
    pub fn released(&self, action: Action) -> bool {
        self.tracker.is_released(action)
    }

    /// `true` while `action` is down.
    pub fn held(&self, action: Action) -> bool {
        self.tracker.is_held(action)
    }

    /// Last known cursor position in window pixels.
    pub fn mouse_position(&self) -> (f32, f32) {
        self.tracker.mouse_position()
    }

    //--- Bindings ---------------------------------------------------------

    pub fn mapper(&self) -> &ActionMapper {
        &self.mapper
    }

    pub fn mapper_mut(&mut self) -> &mut ActionMapper {
        &mut self.mapper
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
