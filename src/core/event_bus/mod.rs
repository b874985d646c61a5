//=========================================================================
// Event Bus
//=========================================================================
//
// Synchronous publish/subscribe between decoupled subsystems.
//
// Architecture:
//   EventBus
//     └─ channels: Vec<Channel { name, listeners: Vec<Listener> }>
//
// Flow:
//   menu click → emit("menu_signals", Event) → state machine listener
//
//=========================================================================

//=== Module Declarations =================================================

mod event;
mod event_bus;

//=== Public API ==========================================================

pub use event::{Event, EventType, MenuSignal};
pub use event_bus::{listener, EventBus, Listener};

/// Channel carrying [`MenuSignal`] payloads from the menu to the states.
pub const MENU_SIGNALS: &str = "menu_signals";
