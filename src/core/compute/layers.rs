//=========================================================================
// Standard Layers
//=========================================================================
//
// The per-frame pipeline every game runs.
//
// Architecture (highest priority first):
//   clock   400  ClockService::update
//   input   300  StateManager::handle_input + apply_transitions
//   update  250  StateManager::update + apply_transitions
//   render  200  RenderService::begin_frame
//   present 100  RenderService::present + InputManager::end_frame
//
// Layers look their services up each frame. A missing service turns the
// layer into a no-op.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::ComputationStack;
use crate::core::clock::ClockService;
use crate::core::game_loop::GameHandle;
use crate::core::input::InputManager;
use crate::core::render::RenderService;
use crate::core::services::ServiceType;
use crate::core::state::StateManager;

//=== Priorities ==========================================================

pub const LAYER_PRIORITY_CLOCK: i32 = 400;
pub const LAYER_PRIORITY_INPUT: i32 = 300;
pub const LAYER_PRIORITY_UPDATE: i32 = 250;
pub const LAYER_PRIORITY_RENDER: i32 = 200;
pub const LAYER_PRIORITY_PRESENT: i32 = 100;

//=== Registration ========================================================

/// Pushes the five standard layers onto `stack`.
pub fn register_standard_layers(stack: &mut ComputationStack<GameHandle>) {
    stack.push("clock", clock_layer, LAYER_PRIORITY_CLOCK);
    stack.push("input", input_layer, LAYER_PRIORITY_INPUT);
    stack.push("update", update_layer, LAYER_PRIORITY_UPDATE);
    stack.push("render", render_layer, LAYER_PRIORITY_RENDER);
    stack.push("present", present_layer, LAYER_PRIORITY_PRESENT);
}

//=== Layers ==============================================================

fn clock_layer(game: &mut GameHandle) {
    if let Some(clock) = game.service::<ClockService>(ServiceType::Clock) {
        clock.borrow_mut().update();
    }
}

/// Queued transitions are applied here, so the rest of the frame already
/// sees the new state.
fn input_layer(game: &mut GameHandle) {
    let (Some(input), Some(states)) = (
        game.service::<InputManager>(ServiceType::Input),
        game.service::<StateManager>(ServiceType::StateManager),
    ) else {
        return;
    };

    // Shared borrows only: state hooks may look the manager up themselves.
    let states = states.borrow();
    states.handle_input(&input.borrow());
    states.apply_transitions();
}

/// Transitions requested by `update` hooks are applied before rendering.
fn update_layer(game: &mut GameHandle) {
    if let Some(states) = game.service::<StateManager>(ServiceType::StateManager) {
        let states = states.borrow();
        states.update();
        states.apply_transitions();
    }
}

fn render_layer(game: &mut GameHandle) {
    if let Some(render) = game.service::<RenderService>(ServiceType::Render) {
        render.borrow_mut().begin_frame();
    }
}

/// Transient input flags are only cleared once the frame is on screen.
fn present_layer(game: &mut GameHandle) {
    if let Some(render) = game.service::<RenderService>(ServiceType::Render) {
        render.borrow_mut().present();
    }
    if let Some(input) = game.service::<InputManager>(ServiceType::Input) {
        input.borrow_mut().end_frame();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
