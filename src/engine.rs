//=========================================================================
// Conquest Engine
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_fps()              ├─ spawns the game-loop thread
//         ├─ with_channel_capacity() ├─ runs the platform (main thread)
//         ├─ with_initial_state()    └─ blocks until both have stopped
//         ├─ with_window_title()
//         ├─ with_window_size()
//         ├─ with_render_target()
//         └─ with_audio_sink()
// ```
//
// The game thread waits for the platform's window before it builds the
// render and audio backends, then the Game.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::audio::{AudioSink, NullSink, SinkFactory};
use crate::core::game_loop::{Game, GameConfig};
use crate::core::platform_bridge::{EventCollector, PlatformError, PlatformEvent, Surface};
use crate::core::render::{HeadlessTarget, RenderTarget};
use crate::core::state::GameState;
use crate::platform::{Platform, WindowConfig};

//=== Types ===============================================================

/// Builds the render target on the game-loop thread from the window surface.
pub type RenderTargetFactory = Box<dyn FnOnce(&Surface) -> Box<dyn RenderTarget> + Send>;

/// Backend factories, run on the game-loop thread.
struct Backends {
    render: RenderTargetFactory,
    audio: SinkFactory,
}

const GAME_THREAD_NAME: &str = "conquest-game";

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **FPS**: 60
/// - **Channel capacity**: 128 events
/// - **Initial state**: `GameState::Menu`
/// - **Window**: "Conquest", 1280x720
/// - **Render target**: [`HeadlessTarget`]
/// - **Audio sink**: [`NullSink`]
///
/// # Examples
///
/// ```no_run
/// use conquest_engine::EngineBuilder;
///
/// EngineBuilder::new()
///     .with_fps(120)
///     .with_window_size(1920, 1080)
///     .build()
///     .run();
/// ```
pub struct EngineBuilder {
    fps: u32,
    channel_capacity: usize,
    initial_state: GameState,
    window_title: String,
    window_size: (u32, u32),
    render_target: Option<RenderTargetFactory>,
    audio_sink: Option<SinkFactory>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            fps: 60,
            channel_capacity: 128,
            initial_state: GameState::Menu,
            window_title: "Conquest".to_string(),
            window_size: (1280, 720),
            render_target: None,
            audio_sink: None,
        }
    }

    /// Sets the frame rate cap of the game loop.
    ///
    /// # Panics
    ///
    /// Panics if `fps == 0`.
    pub fn with_fps(mut self, fps: u32) -> Self {
        assert!(fps > 0, "FPS must be positive, got {}", fps);
        self.fps = fps;
        self
    }

    /// Sets the channel capacity for platform → game communication.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_initial_state(mut self, state: GameState) -> Self {
        self.initial_state = state;
        self
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive");
        self.window_size = (width, height);
        self
    }

    /// Replaces the default headless target with a real backend.
    ///
    /// The factory runs on the game-loop thread once the window exists;
    /// [`Surface::window`] is the handle to draw into.
    pub fn with_render_target<F>(mut self, factory: F) -> Self
    where
        F: FnOnce(&Surface) -> Box<dyn RenderTarget> + Send + 'static,
    {
        self.render_target = Some(Box::new(factory));
        self
    }

    /// Replaces the silent default mixer. Runs on the game-loop thread.
    pub fn with_audio_sink<F>(mut self, factory: F) -> Self
    where
        F: FnOnce() -> Box<dyn AudioSink> + Send + 'static,
    {
        self.audio_sink = Some(Box::new(factory));
        self
    }

    pub fn build(self) -> Engine {
        info!(
            "Building engine (FPS: {}, channel: {}, window: {}x{})",
            self.fps, self.channel_capacity, self.window_size.0, self.window_size.1
        );

        let (width, height) = self.window_size;
        Engine {
            config: GameConfig {
                fps: self.fps,
                initial_state: self.initial_state,
                width,
                height,
            },
            channel_capacity: self.channel_capacity,
            window_title: self.window_title,
            backends: Backends {
                render: self.render_target.unwrap_or_else(|| Box::new(headless_target)),
                audio: self.audio_sink.unwrap_or_else(|| Box::new(null_sink)),
            },
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Conquest runtime.
///
/// ```text
/// Engine (Main Thread)
///   ├─► Game (game-loop thread @ FPS)
///   │     └─► services, state machine, computation stack
///   │
///   └─► Platform (Winit event loop)
///         └─► Window, input polling
///
/// Communication: bounded crossbeam channel (PlatformEvent)
/// ```
pub struct Engine {
    config: GameConfig,
    channel_capacity: usize,
    window_title: String,
    backends: Backends,
}

impl Engine {
    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Starts the engine and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the bounded platform → game channels
    /// 2. Spawns the game-loop thread, which waits for the window surface
    ///    and then builds the backends and the [`Game`]
    /// 3. Runs the platform event loop (blocks here)
    /// 4. Joins the game-loop thread
    ///
    /// Window close ends the game through the channel; a finished game
    /// closes the window through a shared flag.
    pub fn run(self) {
        info!("Starting engine runtime (FPS: {})", self.config.fps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);
        let (surface_tx, surface_rx) = bounded::<Surface>(1);
        let game_finished = Arc::new(AtomicBool::new(false));

        //--- 2. Spawn the game-loop thread --------------------------------
        let game_handle = match spawn_game_thread(
            self.config,
            self.backends,
            surface_rx,
            rx,
            Arc::clone(&game_finished),
        ) {
            Ok(handle) => handle,
            Err(e) => {
                error!("{}", e);
                return;
            }
        };
        info!("Game thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let window = WindowConfig {
            title: self.window_title,
            width: self.config.width,
            height: self.config.height,
        };
        let platform = Platform::new(tx, surface_tx, window, game_finished);

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Wait for the game thread ----------------------------------
        match game_handle.join() {
            Ok(()) => info!("Game thread terminated cleanly"),
            Err(e) => error!("Game thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
    }
}

//=== Game Thread =========================================================

fn headless_target(surface: &Surface) -> Box<dyn RenderTarget> {
    let (width, height) = surface.size();
    Box::new(HeadlessTarget::new(width, height))
}

fn null_sink() -> Box<dyn AudioSink> {
    Box::new(NullSink)
}

fn spawn_game_thread(
    config: GameConfig,
    backends: Backends,
    surface: Receiver<Surface>,
    receiver: Receiver<PlatformEvent>,
    finished: Arc<AtomicBool>,
) -> Result<thread::JoinHandle<()>, PlatformError> {
    thread::Builder::new()
        .name(GAME_THREAD_NAME.to_string())
        .spawn(move || {
            match surface.recv() {
                Ok(surface) => {
                    let target = (backends.render)(&surface);
                    let sink = (backends.audio)();
                    match Game::new(config, target, sink) {
                        Ok(game) => game.run(EventCollector::new(receiver)),
                        Err(e) => error!("Game startup failed: {}", e),
                    }
                }
                Err(_) => info!("Platform stopped before a window was created"),
            }
            finished.store(true, Ordering::Release);
        })
        .map_err(|e| PlatformError::GameThread(e.to_string()))
}

//=========================================================================
// Unit Tests
//=========================================================================
