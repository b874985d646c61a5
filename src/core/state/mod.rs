//=========================================================================
// State System
//=========================================================================
//
// Finite state machine over the top-level game modes.
//
// Architecture:
//   StateManager
//     ├─ current: Cell<GameState>
//     ├─ states: [RefCell<Option<Box<dyn StateBehavior>>>; GameState::COUNT]
//     ├─ transitions: SharedTransitionQueue ← menu signal listener
//     └─ services: Weak<ServiceRegistry>
//
// Flow:
//   handle_input() → apply_transitions() → exit(old) → enter(new)
//   update() → StateBehavior::update() of the current state
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::services::ServiceRegistry;

//=== Module Declarations =================================================

mod state_manager;
mod states;
mod transition_queue;

//=== Public API ==========================================================

pub use state_manager::{StateManager, TransitionError};
pub use states::{MenuState, PauseState, PlayState, QuitState};
pub use transition_queue::{SharedTransitionQueue, TransitionQueue};

//=== GameState ===========================================================

/// Top-level game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Menu,
    Play,
    Pause,
    Quit,
}

impl GameState {
    pub const COUNT: usize = 4;

    pub const ALL: [GameState; Self::COUNT] = [Self::Menu, Self::Play, Self::Pause, Self::Quit];

    /// Slot of this state in the state table.
    pub fn index(self) -> usize {
        self as usize
    }

    /// `Quit` ends the run; nothing transitions out of it.
    pub fn is_terminal(self) -> bool {
        self == Self::Quit
    }
}

//=== StateBehavior =======================================================

/// Lifecycle hooks of one game state.
///
/// Every hook defaults to doing nothing, so a state only overrides what
/// it needs.
///
/// ```rust
/// # use conquest_engine::core::state::StateBehavior;
/// # use conquest_engine::core::services::ServiceRegistry;
/// struct Credits;
///
/// impl StateBehavior for Credits {
///     fn enter(&mut self, services: &ServiceRegistry) {
///         // set up render layers
///     }
/// }
/// ```
pub trait StateBehavior {
    /// Called when the state becomes current.
    fn enter(&mut self, _services: &ServiceRegistry) {}

    /// Called once per frame while the state is current.
    fn update(&mut self, _services: &ServiceRegistry) {}

    /// Called right before another state replaces this one.
    fn exit(&mut self, _services: &ServiceRegistry) {}
}
