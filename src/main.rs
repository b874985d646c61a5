//=========================================================================
// Conquest
//=========================================================================
//
// Launches the engine with default settings. Set RUST_LOG to control
// log output (e.g. `RUST_LOG=info`).
//
//=========================================================================

use conquest_engine::EngineBuilder;

fn main() {
    env_logger::init();

    EngineBuilder::new().build().run();
}
