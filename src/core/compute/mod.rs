//=========================================================================
// Compute
//=========================================================================
//
// Frame scheduler: a priority-ordered stack of per-frame callbacks and
// the standard layers that drive a game.
//
// Architecture:
//   ComputationStack<GameHandle>
//     └─ layers: Vec<ComputationLayer> (descending priority)
//
//=========================================================================

//=== Module Declarations =================================================

mod computation_stack;
pub mod layers;

//=== Public API ==========================================================

pub use computation_stack::{ComputationFn, ComputationLayer, ComputationStack};
pub use layers::register_standard_layers;
