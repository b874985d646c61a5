//=========================================================================
// Platform Bridge
//=========================================================================
//
// Hand-off between the platform thread (winit) and the game-loop thread.
//
// Architecture:
//   Platform ──PlatformEvent──> bounded channel ──> EventCollector
//   (main thread)                                   (game-loop thread)
//   Platform ──Surface (once)──> rendezvous channel ──> render factory
//
// Components:
// - `interface`: message, surface and error types shared by both sides
// - `event_collector`: game-loop side, per-frame draining
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub use interface::{PlatformError, Surface};

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::PlatformEvent;
