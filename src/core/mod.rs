//=========================================================================
// Core Systems
//
// Everything that runs on the game-loop thread.
//
// Architecture:
// ```text
//  Game (game_loop)
//    ├─ ServiceRegistry (services)
//    │    ├─ SettingsStore   (settings)
//    │    ├─ InputManager    (input)
//    │    ├─ AudioManager    (audio)
//    │    ├─ ClockService    (clock)
//    │    ├─ EventBus        (event_bus)
//    │    ├─ RenderService   (render)
//    │    └─ StateManager    (state)
//    ├─ ComputationStack     (compute)
//    └─ EventCollector       (platform_bridge) ← platform thread
// ```
//
// Nothing in here is Send. The platform thread reaches the core only
// through `platform_bridge`.
//
//=========================================================================

pub mod audio;
pub mod clock;
pub mod compute;
pub mod event_bus;
pub mod game_loop;
pub mod input;
pub mod platform_bridge;
pub mod render;
pub mod services;
pub mod settings;
pub mod state;
