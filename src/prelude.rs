//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use conquest_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Services
pub use crate::core::services::{ServiceRegistry, ServiceType};

// Frame pipeline
pub use crate::core::compute::ComputationStack;
pub use crate::core::game_loop::{Game, GameConfig, GameHandle};

// State machine
pub use crate::core::state::{GameState, StateBehavior, StateManager};

// Events
pub use crate::core::event_bus::{Event, EventBus, EventType, MenuSignal};

// Input system
pub use crate::core::input::{Action, InputEvent, InputManager, KeyCode, MouseButton};

// Rendering
pub use crate::core::platform_bridge::Surface;
pub use crate::core::render::{Color, Rect, RenderService, RenderTarget};

// Audio
pub use crate::core::audio::{AudioManager, AudioSink, Sound};
