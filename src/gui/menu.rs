//=========================================================================
// Menu
//=========================================================================
//
// Main menu screen and its placeholder sub-screens.
//
// Architecture:
//   handle_input(input) → hover pass → Confirm? → clicked button
//                                                    ↓
//                    select sound + EventBus::emit("menu_signals", signal)
//                                                    ↓
//                                      rebuild buttons for next screen
//
// The menu never changes game state itself. Whoever listens on the
// signal channel decides what a click means.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, error};

//=== Internal Dependencies ===============================================

use super::button::{Button, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::core::audio::{AudioManager, Sound, SoundHandle};
use crate::core::event_bus::{Event, EventBus, MenuSignal, MENU_SIGNALS};
use crate::core::input::{Action, InputManager};
use crate::core::render::{Color, Rect, RenderTarget};

//=== Constants ===========================================================

const TITLE: &str = "CONQUEST";
const TITLE_SCALE: f32 = 64.0 / GLYPH_HEIGHT;

const BACKGROUND: Color = Color::rgb(10, 10, 30);
const BUTTON_COLOR: Color = Color::rgb(100, 100, 100);

/// Bottom margin buttons are clamped against.
const BOTTOM_MARGIN: f32 = 90.0;

const SELECT_SOUND: &str = "resources/sounds/sfx/menu_select.wav";

//=== MenuScreen ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuScreen {
    Main,
    Continue,
    NewGame,
    Options,
}

//=== Menu ================================================================

/// Button-driven main menu.
///
/// Clicks are published as [`MenuSignal`]s on the [`MENU_SIGNALS`]
/// channel of the shared [`EventBus`].
pub struct Menu {
    size: (f32, f32),
    offset_y: f32,
    screen: MenuScreen,
    buttons: Vec<Button>,
    bus: Rc<RefCell<EventBus>>,

    //--- Audio (optional) -------------------------------------------------
    audio: Option<Rc<RefCell<AudioManager>>>,
    select_sound: Option<SoundHandle>,
}

impl Menu {
    /// Creates the menu on its main screen for a `width × height` window.
    pub fn new(width: u32, height: u32, bus: Rc<RefCell<EventBus>>) -> Self {
        let size = (width as f32, height as f32);
        let mut menu = Self {
            size,
            offset_y: size.1 / 5.0,
            screen: MenuScreen::Main,
            buttons: Vec::new(),
            bus,
            audio: None,
            select_sound: None,
        };
        menu.build_main();
        menu
    }

    /// Attaches the audio manager and registers the select sound at
    /// `volume` (0..=128).
    ///
    /// If registration fails the menu stays silent.
    pub fn with_audio(mut self, audio: Rc<RefCell<AudioManager>>, volume: u8) -> Self {
        match audio.borrow_mut().register(Sound::sfx(SELECT_SOUND, volume)) {
            Ok(handle) => self.select_sound = Some(handle),
            Err(e) => error!("Menu select sound unavailable: {}", e),
        }
        self.audio = Some(audio);
        self
    }

    //--- Frame ------------------------------------------------------------

    /// Updates hover highlighting and handles a click.
    pub fn handle_input(&mut self, input: &InputManager) {
        let mouse = input.mouse_position();
        for button in &mut self.buttons {
            button.hover(mouse);
        }

        if !input.pressed(Action::Confirm) {
            return;
        }
        let Some(signal) = self.buttons.iter().find(|b| b.is_hovered()).map(Button::signal) else {
            return;
        };

        debug!("Menu button clicked: {:?}", signal);
        self.play_select_sound();
        self.bus.borrow().emit(MENU_SIGNALS, &Event::signal(&signal));
        self.build_from_signal(signal);
    }

    pub fn render(&self, target: &mut dyn RenderTarget) {
        target.clear(BACKGROUND);

        let title_w = TITLE.len() as f32 * GLYPH_WIDTH * TITLE_SCALE;
        let title_h = GLYPH_HEIGHT * TITLE_SCALE;
        target.draw_label(
            TITLE,
            Rect::new((self.size.0 - title_w) / 2.0, self.offset_y, title_w, title_h),
            Color::WHITE,
        );

        for button in &self.buttons {
            button.render(target);
        }
    }

    //--- Screens ----------------------------------------------------------

    /// Switches to the screen a signal leads to.
    ///
    /// `Quit` and `None` leave the current screen as is.
    pub fn build_from_signal(&mut self, signal: MenuSignal) {
        match signal {
            MenuSignal::Continue => self.build_placeholder(MenuScreen::Continue, "Continue Game"),
            MenuSignal::NewGame => self.build_placeholder(MenuScreen::NewGame, "New Game"),
            MenuSignal::Options => self.build_placeholder(MenuScreen::Options, "Options"),
            MenuSignal::Main => self.build_main(),
            MenuSignal::Quit | MenuSignal::None => {}
        }
    }

    fn build_main(&mut self) {
        self.buttons.clear();
        self.add_button("Continue", MenuSignal::Continue, 200.0);
        self.add_button("New Game", MenuSignal::NewGame, 260.0);
        self.add_button("Options", MenuSignal::Options, 320.0);
        self.add_button("Quit", MenuSignal::Quit, 380.0);
        self.screen = MenuScreen::Main;
    }

    fn build_placeholder(&mut self, screen: MenuScreen, title: &str) {
        self.buttons.clear();
        let y = self.size.1 - 100.0;
        self.add_button(&format!("< {} - [Back] >", title), MenuSignal::Main, y);
        self.screen = screen;
    }

    fn add_button(&mut self, label: &str, signal: MenuSignal, y: f32) {
        let max_y = (self.size.1 - BOTTOM_MARGIN).max(0.0);
        let y = (y + self.offset_y).clamp(0.0, max_y);
        self.buttons
            .push(Button::new(label, signal, self.size.0 / 2.0, y, BUTTON_COLOR));
    }

    fn play_select_sound(&self) {
        let (Some(audio), Some(sound)) = (&self.audio, self.select_sound) else {
            return;
        };
        if let Err(e) = audio.borrow_mut().play(sound) {
            error!("Failed to play menu select sound: {}", e);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn screen(&self) -> MenuScreen {
        self.screen
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
