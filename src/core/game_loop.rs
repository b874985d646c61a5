//=========================================================================
// Game Loop
//=========================================================================
//
// Wires the services together and drives frames on the game-loop thread.
//
// Architecture:
//   Game::new(config, target, sink)
//     ├─ ServiceRegistry ← settings, input, audio, clock, bus, render, states
//     ├─ ComputationStack<GameHandle> ← standard layers
//     └─ FramePacer (target fps)
//
// Per frame:
//   1. Drain platform input into the InputManager
//   2. Quit pressed → running = false
//   3. Execute the computation stack
//   4. Sleep the rest of the frame interval
//
// The loop ends once `running` is false or the current state is Quit.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use log::{error, info};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::audio::{AudioManager, AudioSink, Sound, DEFAULT_MAX_SOUNDS, MAX_VOLUME};
use crate::core::clock::ClockService;
use crate::core::compute::{register_standard_layers, ComputationStack};
use crate::core::event_bus::{EventBus, Listener, MENU_SIGNALS};
use crate::core::input::{Action, InputEvent, InputManager};
use crate::core::platform_bridge::{EventCollector, TickControl};
use crate::core::render::{RenderService, RenderTarget};
use crate::core::services::{ServiceError, ServiceRegistry, ServiceType};
use crate::core::settings::defaults::{MASTER_VOLUME, MUSIC_VOLUME, SFX_VOLUME};
use crate::core::settings::{install_default_settings, SettingsError, SettingsStore};
use crate::core::state::{GameState, StateManager, TransitionError};
use crate::gui::Menu;

//=== Constants ===========================================================

const MENU_MUSIC: &str = "resources/music/Music_1.mp3";

/// Services in registration order. Shutdown walks it backwards.
const SERVICE_ORDER: [ServiceType; 7] = [
    ServiceType::Settings,
    ServiceType::Input,
    ServiceType::Audio,
    ServiceType::Clock,
    ServiceType::EventBus,
    ServiceType::Render,
    ServiceType::StateManager,
];

//=== GameError ===========================================================

/// Startup failures.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("service setup failed: {0}")]
    Service(#[from] ServiceError),

    #[error("settings setup failed: {0}")]
    Settings(#[from] SettingsError),

    #[error("initial state failed: {0}")]
    Transition(#[from] TransitionError),
}

//=== GameConfig ==========================================================

/// Startup parameters of the game-loop thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub fps: u32,
    pub initial_state: GameState,
    pub width: u32,
    pub height: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            initial_state: GameState::Menu,
            width: 1280,
            height: 720,
        }
    }
}

//=== GameHandle ==========================================================

/// Context handed to every computation layer.
pub struct GameHandle {
    pub services: Rc<ServiceRegistry>,
    pub running: bool,
}

impl GameHandle {
    pub fn new(services: Rc<ServiceRegistry>) -> Self {
        Self {
            services,
            running: true,
        }
    }

    /// Shorthand for [`ServiceRegistry::get`].
    pub fn service<T: 'static>(&self, tag: ServiceType) -> Option<Rc<RefCell<T>>> {
        self.services.get(tag)
    }
}

//=== FramePacer ==========================================================

/// Caps the frame rate by sleeping out the rest of each frame.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    frame: Duration,
}

impl FramePacer {
    /// # Panics
    ///
    /// Panics if `fps == 0`.
    pub fn new(fps: u32) -> Self {
        assert!(fps > 0, "FPS must be positive");
        Self {
            frame: Duration::from_secs(1) / fps,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Time left in the frame after `elapsed`. `None` on overrun.
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        self.frame.checked_sub(elapsed).filter(|rest| !rest.is_zero())
    }

    /// Sleeps until one frame interval has passed since `frame_start`.
    pub fn wait(&self, frame_start: Instant) {
        if let Some(rest) = self.remaining(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
}

//=== Game ================================================================

/// The running game: services, frame pipeline and pacing.
///
/// Lives entirely on the game-loop thread.
pub struct Game {
    handle: GameHandle,
    stack: ComputationStack<GameHandle>,
    pacer: FramePacer,

    //--- Typed Handles ----------------------------------------------------
    input: Rc<RefCell<InputManager>>,
    audio: Rc<RefCell<AudioManager>>,
    bus: Rc<RefCell<EventBus>>,
    states: Rc<RefCell<StateManager>>,
    signal_listener: Listener,
}

impl Game {
    /// Builds every service, registers the standard layers, starts the
    /// menu music and enters the initial state.
    ///
    /// `target` and `sink` are the render and audio backends.
    pub fn new(
        config: GameConfig,
        target: Box<dyn RenderTarget>,
        sink: Box<dyn AudioSink>,
    ) -> Result<Self, GameError> {
        info!(
            "Initializing game ({}x{}, {} fps, initial state {:?})",
            config.width, config.height, config.fps, config.initial_state
        );

        let services = Rc::new(ServiceRegistry::new());

        //--- Leaf services ------------------------------------------------
        let mut store = SettingsStore::new();
        install_default_settings(&mut store)?;
        let music_volume = channel_volume(&store, MUSIC_VOLUME)?;
        let select_volume = channel_volume(&store, SFX_VOLUME)?;
        let settings = Rc::new(RefCell::new(store));
        let input = Rc::new(RefCell::new(InputManager::new()));
        let audio = Rc::new(RefCell::new(AudioManager::with_sink(DEFAULT_MAX_SOUNDS, sink)));
        let clock = Rc::new(RefCell::new(ClockService::new()));
        let bus = Rc::new(RefCell::new(EventBus::new()));
        let render = Rc::new(RefCell::new(RenderService::new(target)));

        services.register(ServiceType::Settings, Rc::clone(&settings))?;
        services.register(ServiceType::Input, Rc::clone(&input))?;
        services.register(ServiceType::Audio, Rc::clone(&audio))?;
        services.register(ServiceType::Clock, clock)?;
        services.register(ServiceType::EventBus, Rc::clone(&bus))?;
        services.register(ServiceType::Render, render)?;

        //--- State machine ------------------------------------------------
        let menu = Menu::new(config.width, config.height, Rc::clone(&bus))
            .with_audio(Rc::clone(&audio), select_volume);
        let states = Rc::new(RefCell::new(StateManager::with_default_states(
            config.initial_state,
            Rc::new(RefCell::new(menu)),
            &services,
        )));
        let signal_listener = states.borrow().subscribe(&bus.borrow());
        services.register(ServiceType::StateManager, Rc::clone(&states))?;

        start_menu_music(&mut audio.borrow_mut(), music_volume);

        //--- Frame pipeline -----------------------------------------------
        let mut stack = ComputationStack::new();
        register_standard_layers(&mut stack);

        states.borrow().start()?;

        info!("Game initialized ({} services, {} layers)", services.len(), stack.len());
        Ok(Self {
            handle: GameHandle::new(services),
            stack,
            pacer: FramePacer::new(config.fps),
            input,
            audio,
            bus,
            states,
            signal_listener,
        })
    }

    //--- Frame ------------------------------------------------------------

    /// Feeds one frame's worth of platform input to the input manager.
    ///
    /// A closed window counts as a Quit press.
    pub fn process_input(&mut self, batches: &[Vec<InputEvent>], window_closed: bool) {
        let mut input = self.input.borrow_mut();
        for batch in batches {
            input.handle_events(batch);
        }
        if window_closed {
            input.request_quit();
        }
    }

    /// Checks the global quit hot-key, then runs every computation layer.
    pub fn frame(&mut self) {
        if self.input.borrow().pressed(Action::Quit) {
            info!("Quit pressed, stopping");
            self.handle.running = false;
        }
        self.stack.execute(&mut self.handle);
    }

    pub fn should_continue(&self) -> bool {
        self.handle.running && !self.states.borrow().is_terminal()
    }

    /// Runs frames until the game stops, then shuts down.
    pub(crate) fn run(mut self, mut collector: EventCollector) {
        info!("Entering game loop");

        while self.should_continue() {
            let frame_start = Instant::now();

            //--- Step 1: Gather platform input -----------------------------
            let control = collector.collect_frame();
            self.process_input(collector.batches(), control == TickControl::Exit);

            //--- Step 2: Run the frame pipeline ----------------------------
            self.frame();

            //--- Step 3: Cap the frame rate --------------------------------
            self.pacer.wait(frame_start);
        }

        info!("Game loop exited in state {:?}", self.state());
        self.shutdown();
    }

    /// Tears down in reverse setup order.
    pub fn shutdown(mut self) {
        info!("Shutting down game");

        self.bus.borrow().unsubscribe(MENU_SIGNALS, &self.signal_listener);
        self.audio.borrow_mut().stop_all();
        self.stack.destroy();
        if let Some(render) = self.handle.service::<RenderService>(ServiceType::Render) {
            render.borrow_mut().remove_all();
        }
        for tag in SERVICE_ORDER.iter().rev() {
            self.handle.services.unregister(*tag);
        }

        info!("Game shutdown complete");
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> GameState {
        self.states.borrow().current()
    }

    pub fn services(&self) -> &Rc<ServiceRegistry> {
        &self.handle.services
    }

    pub fn states(&self) -> &Rc<RefCell<StateManager>> {
        &self.states
    }

    pub fn stack(&self) -> &ComputationStack<GameHandle> {
        &self.stack
    }

    pub fn pacer(&self) -> FramePacer {
        self.pacer
    }
}

//=== Volume ==============================================================

/// Channel volume on the 0..=128 scale from the 0..=1 settings.
fn mixed_volume(channel: f32, master: f32) -> u8 {
    (channel * master * MAX_VOLUME as f32).clamp(0.0, MAX_VOLUME as f32) as u8
}

/// Volume of a channel setting (music, sfx) scaled by the master volume.
fn channel_volume(settings: &SettingsStore, channel: &str) -> Result<u8, SettingsError> {
    Ok(mixed_volume(settings.float(channel)?, settings.float(MASTER_VOLUME)?))
}

fn start_menu_music(audio: &mut AudioManager, volume: u8) {
    let result = audio
        .register(Sound::music(MENU_MUSIC, volume))
        .and_then(|theme| audio.play(theme));
    if let Err(e) = result {
        error!("Failed to start menu music: {}", e);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audio::{AudioKind, RecordingSink, SinkCall, SinkLog};
    use crate::core::event_bus::MenuSignal;
    use crate::core::input::{KeyCode, MouseButton};
    use crate::core::render::{Color, DrawCommand, DrawLog, RecordingTarget};
    use crate::core::state::StateBehavior;

    fn game() -> (Game, DrawLog) {
        let (game, draws, _) = game_with_sound();
        (game, draws)
    }

    fn game_with_sound() -> (Game, DrawLog, SinkLog) {
        let target = RecordingTarget::new(1280, 720);
        let draws = target.log();
        let sink = RecordingSink::new();
        let sounds = sink.log();
        let game = Game::new(GameConfig::default(), Box::new(target), Box::new(sink)).unwrap();
        (game, draws, sounds)
    }

    fn audio(game: &Game) -> Rc<RefCell<AudioManager>> {
        game.services().get::<AudioManager>(ServiceType::Audio).unwrap()
    }

    /// Runs one paced iteration whose only layer takes `body`.
    fn paced_iteration(fps: u32, body: Duration) -> Duration {
        let pacer = FramePacer::new(fps);
        let mut stack = ComputationStack::<()>::new();
        stack.push("work", move |_| thread::sleep(body), 0);

        let start = Instant::now();
        stack.execute(&mut ());
        pacer.wait(start);
        start.elapsed()
    }

    fn click(game: &mut Game, signal: MenuSignal) {
        let bounds = {
            let states = game.states().borrow();
            let menu = states.menu().borrow();
            let bounds = menu
                .buttons()
                .iter()
                .find(|b| b.signal() == signal)
                .map(|b| b.bounds())
                .unwrap();
            bounds
        };
        game.process_input(
            &[vec![
                InputEvent::MouseMoved { x: bounds.x + 5.0, y: bounds.y + 5.0 },
                InputEvent::MouseButtonDown(MouseButton::Left),
                InputEvent::MouseButtonUp(MouseButton::Left),
            ]],
            false,
        );
    }

    //--- FramePacer -------------------------------------------------------

    #[test]
    fn pacer_sleeps_the_remainder() {
        let pacer = FramePacer::new(50);

        assert_eq!(pacer.frame_duration(), Duration::from_millis(20));
        assert_eq!(pacer.remaining(Duration::from_millis(5)), Some(Duration::from_millis(15)));
    }

    #[test]
    fn pacer_never_sleeps_on_overrun() {
        let pacer = FramePacer::new(50);

        assert_eq!(pacer.remaining(Duration::from_millis(20)), None);
        assert_eq!(pacer.remaining(Duration::from_millis(35)), None);
    }

    #[test]
    fn pacer_wait_fills_the_frame() {
        let pacer = FramePacer::new(100);
        let start = Instant::now();

        pacer.wait(start);

        let elapsed = start.elapsed();
        assert!(elapsed >= pacer.frame_duration(), "woke after {:?}", elapsed);
        assert!(elapsed < Duration::from_millis(500), "slept {:?}", elapsed);
    }

    #[test]
    fn short_frame_is_padded_to_the_interval() {
        let elapsed = paced_iteration(50, Duration::from_millis(5));

        assert!(elapsed >= Duration::from_millis(20), "woke after {:?}", elapsed);
        assert!(elapsed < Duration::from_millis(45), "slept {:?}", elapsed);
    }

    #[test]
    fn overrunning_frame_gets_no_extra_sleep() {
        let elapsed = paced_iteration(50, Duration::from_millis(30));

        assert!(elapsed >= Duration::from_millis(30), "body cut short: {:?}", elapsed);
        assert!(elapsed < Duration::from_millis(45), "slept after overrun: {:?}", elapsed);
    }

    #[test]
    #[should_panic(expected = "FPS must be positive")]
    fn pacer_rejects_zero_fps() {
        FramePacer::new(0);
    }

    //--- Game -------------------------------------------------------------

    #[test]
    fn starts_in_menu_with_music() {
        let (game, _, sounds) = game_with_sound();

        assert_eq!(game.state(), GameState::Menu);
        assert_eq!(game.stack().names(), ["clock", "input", "update", "render", "present"]);
        assert!(game.should_continue());

        let audio = audio(&game);
        let audio = audio.borrow();
        let theme = audio.current_music().unwrap();
        assert_eq!(audio.sound(theme).map(Sound::volume), Some(102));
        assert_eq!(*sounds.borrow(), [SinkCall::Play(theme)]);
    }

    #[test]
    fn menu_click_plays_the_mixed_select_sound() {
        let (mut game, _, sounds) = game_with_sound();

        click(&mut game, MenuSignal::Options);
        game.frame();

        let select = match sounds.borrow().as_slice() {
            [SinkCall::Play(_theme), SinkCall::Play(select)] => *select,
            other => panic!("unexpected sink calls {:?}", other),
        };
        let audio = audio(&game);
        let audio = audio.borrow();
        let sound = audio.sound(select).unwrap();
        assert_eq!(sound.kind(), AudioKind::Sfx);
        assert_eq!(sound.volume(), mixed_volume(1.0, 1.0));
    }

    #[test]
    fn channel_volume_follows_master() {
        let mut store = SettingsStore::new();
        install_default_settings(&mut store).unwrap();
        store.set_float(SFX_VOLUME, 0.5).unwrap();
        store.set_float(MASTER_VOLUME, 0.5).unwrap();

        assert_eq!(channel_volume(&store, SFX_VOLUME), Ok(32));
        assert_eq!(channel_volume(&store, MUSIC_VOLUME), Ok(51));
        assert!(channel_volume(&store, "no_such_volume").is_err());
    }

    #[test]
    fn all_services_are_registered() {
        let (game, _) = game();

        assert_eq!(game.services().tags(), SERVICE_ORDER);
    }

    #[test]
    fn menu_frame_draws_menu_and_presents() {
        let (mut game, log) = game();

        game.frame();

        let log = log.borrow();
        assert_eq!(log.first(), Some(&DrawCommand::Clear(Color::BLACK)));
        assert_eq!(log.get(1), Some(&DrawCommand::Clear(Color::rgb(10, 10, 30))));
        assert_eq!(log.last(), Some(&DrawCommand::Present));
    }

    #[test]
    fn new_game_click_takes_effect_in_the_same_frame() {
        let (mut game, log) = game();

        click(&mut game, MenuSignal::NewGame);
        game.frame();

        assert_eq!(game.state(), GameState::Play);
        assert_eq!(
            *log.borrow(),
            [
                DrawCommand::Clear(Color::BLACK),
                DrawCommand::Clear(Color::rgb(0, 20, 40)),
                DrawCommand::Present,
            ]
        );
    }

    #[test]
    fn escape_in_play_returns_to_menu() {
        let (mut game, _) = game();
        click(&mut game, MenuSignal::Continue);
        game.frame();

        game.process_input(&[vec![InputEvent::KeyDown(KeyCode::Escape)]], false);
        game.frame();

        assert_eq!(game.state(), GameState::Menu);
        assert!(game.should_continue());
    }

    /// Play behaviour that immediately asks for Pause via the registry.
    struct PauseOnEnter;

    impl StateBehavior for PauseOnEnter {
        fn enter(&mut self, services: &ServiceRegistry) {
            let states = services.get::<StateManager>(ServiceType::StateManager).unwrap();
            states.borrow().request(GameState::Pause);
        }
    }

    #[test]
    fn state_hooks_reach_the_manager_during_a_frame() {
        let (mut game, _) = game();
        game.states().borrow_mut().register(GameState::Play, Box::new(PauseOnEnter));

        game.states().borrow().request(GameState::Play);
        game.frame();

        assert_eq!(game.state(), GameState::Pause);
        let render = game.services().get::<RenderService>(ServiceType::Render).unwrap();
        assert_eq!(render.borrow().layer_names(), ["pause_overlay"]);
    }

    #[test]
    fn quit_button_stops_the_loop() {
        let (mut game, _) = game();

        click(&mut game, MenuSignal::Quit);
        game.frame();

        assert_eq!(game.state(), GameState::Quit);
        assert!(!game.should_continue());
    }

    #[test]
    fn window_close_stops_the_loop() {
        let (mut game, _) = game();

        game.process_input(&[], true);
        game.frame();

        assert!(!game.handle.running);
        assert!(!game.should_continue());
    }

    #[test]
    fn input_flags_are_cleared_after_the_frame() {
        let (mut game, _) = game();

        game.process_input(&[vec![InputEvent::KeyDown(KeyCode::KeyW)]], false);
        assert!(game.input.borrow().pressed(Action::MoveUp));
        game.frame();

        assert!(!game.input.borrow().pressed(Action::MoveUp));
        assert!(game.input.borrow().held(Action::MoveUp));
    }

    #[test]
    fn shutdown_unregisters_everything() {
        let (game, _) = game();
        let services = Rc::clone(game.services());
        let bus = services.get::<EventBus>(ServiceType::EventBus).unwrap();

        game.shutdown();

        assert!(services.is_empty());
        assert_eq!(bus.borrow().listener_count(MENU_SIGNALS), 0);
    }

    #[test]
    fn mixed_volume_scales_and_clamps() {
        assert_eq!(mixed_volume(0.8, 1.0), 102);
        assert_eq!(mixed_volume(0.5, 0.5), 32);
        assert_eq!(mixed_volume(2.0, 1.0), MAX_VOLUME);
        assert_eq!(mixed_volume(0.0, 1.0), 0);
    }
}
