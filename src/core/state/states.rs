//=========================================================================
// Game States
//=========================================================================
//
// Behaviour of each GameState.
//
// Entering a state rebuilds the render layer stack from scratch, so the
// layers on screen depend only on the current state.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

use log::error;

//=== Internal Dependencies ===============================================

use super::StateBehavior;
use crate::core::event_bus::MenuSignal;
use crate::core::render::{Color, Rect, RenderService, RenderTarget};
use crate::core::services::{ServiceRegistry, ServiceType};
use crate::gui::Menu;

//=== Constants ===========================================================

const PLAY_BACKGROUND: Color = Color::rgb(0, 20, 40);
const PAUSE_SHADE: Color = Color::rgba(0, 0, 0, 160);

//=== Helpers =============================================================

fn with_render(services: &ServiceRegistry, f: impl FnOnce(&mut RenderService)) {
    match services.get::<RenderService>(ServiceType::Render) {
        Some(render) => f(&mut render.borrow_mut()),
        None => error!("Render service missing, cannot reset layers"),
    }
}

/// Clears the render stack and installs `layer` as its only entry.
fn replace_layers<F>(services: &ServiceRegistry, name: &str, layer: F)
where
    F: FnMut(&mut dyn RenderTarget) + 'static,
{
    with_render(services, |render| {
        render.remove_all();
        if let Err(e) = render.add(layer, name) {
            error!("Failed to add render layer '{}': {}", name, e);
        }
    });
}

//=== MenuState ===========================================================

/// Shows the main menu.
pub struct MenuState {
    menu: Rc<RefCell<Menu>>,
}

impl MenuState {
    pub fn new(menu: Rc<RefCell<Menu>>) -> Self {
        Self { menu }
    }
}

impl StateBehavior for MenuState {
    fn enter(&mut self, services: &ServiceRegistry) {
        self.menu.borrow_mut().build_from_signal(MenuSignal::Main);

        let menu = Rc::clone(&self.menu);
        replace_layers(services, "menu", move |target| menu.borrow().render(target));
    }
}

//=== PlayState ===========================================================

/// In-game. Only a background for now.
#[derive(Debug, Default)]
pub struct PlayState;

impl StateBehavior for PlayState {
    fn enter(&mut self, services: &ServiceRegistry) {
        replace_layers(services, "play_background", |target| target.clear(PLAY_BACKGROUND));
    }
}

//=== PauseState ==========================================================

/// Dimmed overlay with a caption.
#[derive(Debug, Default)]
pub struct PauseState;

impl StateBehavior for PauseState {
    fn enter(&mut self, services: &ServiceRegistry) {
        replace_layers(services, "pause_overlay", |target| {
            let (w, h) = target.size();
            let (w, h) = (w as f32, h as f32);
            target.fill_rect(Rect::new(0.0, 0.0, w, h), PAUSE_SHADE);
            target.draw_label(
                "PAUSED",
                Rect::new(w / 2.0 - 60.0, h / 2.0 - 20.0, 120.0, 40.0),
                Color::WHITE,
            );
        });
    }
}

//=== QuitState ===========================================================

/// Terminal state. Leaves nothing on screen.
#[derive(Debug, Default)]
pub struct QuitState;

impl StateBehavior for QuitState {
    fn enter(&mut self, services: &ServiceRegistry) {
        with_render(services, RenderService::remove_all);
    }
}
