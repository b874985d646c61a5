//=========================================================================
// Conquest Engine: Library Root
//
// Public API surface of the Conquest engine.
//
// Responsibilities:
// - Expose the engine facade (`EngineBuilder`, `Engine`)
// - Expose the core services for games that extend the engine
// - Keep OS integration (`platform`) private
//
// Typical usage:
// ```no_run
// use conquest_engine::EngineBuilder;
//
// fn main() {
//     EngineBuilder::new().build().run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the services, state machine and frame pipeline.
// `gui` holds the menu widgets drawn by the menu state.
//
pub mod core;
pub mod gui;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the window and the Winit event loop.
// `engine` wires the platform and the game-loop thread together.
//
mod platform;
mod engine;

//--- Public Exports ------------------------------------------------------

pub use crate::core::platform_bridge::Surface;
pub use engine::{Engine, EngineBuilder, RenderTargetFactory};
