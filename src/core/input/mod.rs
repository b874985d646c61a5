//=========================================================================
// Input System
//=========================================================================
//
// Raw input events in, per-frame action state out.
//
// Architecture:
//   InputManager
//     ├─ ActionMapper: KeyCode/MouseButton → Action
//     └─ StateTracker: held / pressed / released per Action
//
//=========================================================================

//=== Module Declarations =================================================

pub mod action;
pub mod action_mapper;
pub mod event;
mod input_manager;
mod state_tracker;

//=== Public API ==========================================================

pub use action::Action;
pub use action_mapper::ActionMapper;
pub use event::{InputEvent, KeyCode, MouseButton};
pub use input_manager::InputManager;
