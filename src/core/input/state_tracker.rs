//=========================================================================
// State Tracker
//=========================================================================
//
// Per-action held state plus per-frame pressed/released deltas.
//
// Architecture:
//   Action down/up → HashSet (held) + HashSet (pressed/released) → query
//
// Frame lifecycle: press()/release() … → query → end_frame()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::action::Action;

//=== StateTracker ========================================================

/// Tracks which actions are held and which changed this frame.
#[derive(Debug, Default)]
pub(super) struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    held: HashSet<Action>,
    mouse_position: (f32, f32),

    //--- Frame Deltas (reset by end_frame) ------------------------------
    pressed: HashSet<Action>,
    released: HashSet<Action>,
}

impl StateTracker {
    pub(super) fn new() -> Self {
        Self::default()
    }

    //--- Updates ----------------------------------------------------------

    /// Marks `action` as held. Only the UP → DOWN edge counts as pressed.
    pub(super) fn press(&mut self, action: Action) {
        if self.held.insert(action) {
            self.pressed.insert(action);
        }
    }

    /// Marks `action` as released.
    pub(super) fn release(&mut self, action: Action) {
        self.held.remove(&action);
        self.released.insert(action);
    }

    /// Flags `action` as pressed for this frame without holding it.
    pub(super) fn pulse(&mut self, action: Action) {
        self.pressed.insert(action);
    }

    pub(super) fn move_mouse(&mut self, x: f32, y: f32) {
        self.mouse_position = (x, y);
    }

    /// Clears the per-frame deltas. Held state survives.
    pub(super) fn end_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }

    //--- Queries ----------------------------------------------------------

    pub(super) fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    pub(super) fn is_released(&self, action: Action) -> bool {
        self.released.contains(&action)
    }

    pub(super) fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    pub(super) fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_sets_pressed_and_held() {
        let mut tracker = StateTracker::new();
        tracker.press(Action::Confirm);

        assert!(tracker.is_pressed(Action::Confirm));
        assert!(tracker.is_held(Action::Confirm));
        assert!(!tracker.is_released(Action::Confirm));
    }

    #[test]
    fn repeat_press_while_held_is_not_a_new_edge() {
        let mut tracker = StateTracker::new();
        tracker.press(Action::MoveUp);
        tracker.end_frame();

        tracker.press(Action::MoveUp);

        assert!(!tracker.is_pressed(Action::MoveUp));
        assert!(tracker.is_held(Action::MoveUp));
    }

    #[test]
    fn end_frame_keeps_held_state() {
        let mut tracker = StateTracker::new();
        tracker.press(Action::MoveLeft);
        tracker.end_frame();

        assert!(!tracker.is_pressed(Action::MoveLeft));
        assert!(tracker.is_held(Action::MoveLeft));
    }

    #[test]
    fn release_clears_held() {
        let mut tracker = StateTracker::new();
        tracker.press(Action::Cancel);
        tracker.end_frame();

        tracker.release(Action::Cancel);

        assert!(tracker.is_released(Action::Cancel));
        assert!(!tracker.is_held(Action::Cancel));

        tracker.end_frame();
        assert!(!tracker.is_released(Action::Cancel));
    }

    #[test]
    fn pulse_is_pressed_for_one_frame_only() {
        let mut tracker = StateTracker::new();
        tracker.pulse(Action::Quit);

        assert!(tracker.is_pressed(Action::Quit));
        assert!(!tracker.is_held(Action::Quit));

        tracker.end_frame();
        assert!(!tracker.is_pressed(Action::Quit));
    }

    #[test]
    fn mouse_position_persists() {
        let mut tracker = StateTracker::new();
        tracker.move_mouse(12.0, 34.0);
        tracker.end_frame();

        assert_eq!(tracker.mouse_position(), (12.0, 34.0));
    }
}
