//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the game-loop thread.
//
// Architecture:
// ```text
//  Main Thread:                     Game Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  EventCollector  │
//  │   ↓                      │    │  ↓               │
//  │  translate               │    │  InputManager    │
//  │   ↓                      │    │  ↓               │
//  │  InputBuffer             │    │  Computation     │
//  │   ├─ edges: Vec<>        │    │  stack           │
//  │   └─ latest: Vec<>       │    └──────────────────┘
//  │   ↓                      │             ↑
//  │  RedrawRequested (flush) │             │
//  │   ↓                      │             │
//  │  Bounded channel ────────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
// ```
//
// RedrawRequested is the frame boundary: everything buffered since the
// previous redraw is sent as one `PlatformEvent::Inputs`. Empty buffers
// are not sent.
//
// Once the window exists it is shared with the game thread as a
// `Surface`, which the render factory builds its backend on. Cursor
// positions are reported in logical pixels.
//
// The game thread raises `game_finished` when it stops (Quit state or a
// fatal error). The platform closes the window on the next redraw.
//
// Winit requires the event loop on the main thread (macOS/iOS), so this
// runs on the thread that called `Engine::run()`.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod translate;

//=== External Crates =====================================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent, Surface};
use input_buffer::InputBuffer;

//=== WindowConfig ========================================================

/// Window attributes applied when the window is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

//=== Platform ============================================================

/// Window owner and input aggregator.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(..)` (no window yet)
/// 2. **Execution**: `platform.run()` blocks in the Winit event loop
/// 3. **Window**: created lazily in `resumed()`
/// 4. **Shutdown**: close request or `game_finished` → exits the loop
///
/// This type is not Send; it stays on the main thread and talks to the
/// game thread only through the channel.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Arc<Window>>,

    window_config: WindowConfig,

    /// Buffers discrete/continuous input until frame boundary.
    buffer: InputBuffer,

    event_sender: Sender<PlatformEvent>,

    /// Taken when the window is handed to the game thread.
    surface_sender: Option<Sender<Surface>>,

    /// Raised by the game thread once it has stopped.
    game_finished: Arc<AtomicBool>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub fn new(
        event_sender: Sender<PlatformEvent>,
        surface_sender: Sender<Surface>,
        window_config: WindowConfig,
        game_finished: Arc<AtomicBool>,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            window_config,
            buffer: InputBuffer::new(),
            event_sender,
            surface_sender: Some(surface_sender),
            game_finished,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new()
            .map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends the buffered input to the game thread.
    ///
    /// A disconnected channel means the game thread is gone; the events are
    /// dropped with a warning so the window can still be closed.
    fn flush_input_buffer(&mut self) {
        let Some(event) = self.buffer.take_event() else {
            return;
        };
        trace!(target: "platform::input", "Flushing {:?}", event);

        if let Err(e) = self.event_sender.send(event) {
            warn!(target: "platform::input", "Channel disconnected, dropping {:?}", e.into_inner());
        }
    }

    /// Gives the game thread its surface. Only the first window is sent.
    fn share_surface(&mut self, window: &Arc<Window>) {
        let Some(sender) = self.surface_sender.take() else {
            return;
        };
        if sender.send(Surface::from_window(Arc::clone(window))).is_err() {
            warn!(target: "platform", "Game thread gone before the window was shared");
        }
    }

    fn scale_factor(&self) -> f64 {
        self.window.as_ref().map_or(1.0, |w| w.scale_factor())
    }

    fn game_finished(&self) -> bool {
        self.game_finished.load(Ordering::Acquire)
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Arc<Window>> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first resume. Later resumes (mobile) reuse it.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.window_config.title.as_str())
            .with_inner_size(LogicalSize::new(
                self.window_config.width,
                self.window_config.height,
            ));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                let window = Arc::new(window);
                self.share_surface(&window);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = translate::cursor_moved(*position, self.scale_factor());
                self.buffer.push(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = translate::key_event(key_event) {
                    self.buffer.push(event);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.buffer.push(translate::mouse_button(*button, *state));
            }

            WindowEvent::RedrawRequested => {
                if self.game_finished() {
                    info!(target: "platform", "Game finished, closing window");
                    event_loop.exit();
                    return;
                }

                self.flush_input_buffer();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode};
    use crossbeam_channel::{unbounded, Receiver};

    fn platform() -> (Platform, Receiver<PlatformEvent>, Receiver<Surface>, Arc<AtomicBool>) {
        let (tx, rx) = unbounded();
        let (surface_tx, surface_rx) = unbounded();
        let finished = Arc::new(AtomicBool::new(false));
        let config = WindowConfig {
            title: "Test".to_string(),
            width: 320,
            height: 240,
        };
        let platform = Platform::new(tx, surface_tx, config, Arc::clone(&finished));
        (platform, rx, surface_rx, finished)
    }

    #[test]
    fn window_is_created_lazily() {
        let (platform, _rx, surface_rx, _) = platform();

        assert!(platform.window().is_none());
        assert_eq!(platform.scale_factor(), 1.0);
        assert!(surface_rx.try_recv().is_err());
    }

    #[test]
    fn flush_sends_one_message_per_frame() {
        let (mut platform, rx, _, _) = platform();

        platform.flush_input_buffer();
        assert!(rx.try_recv().is_err(), "empty buffer must not be sent");

        platform.buffer.push(InputEvent::KeyDown(KeyCode::Space));
        platform.buffer.push(InputEvent::MouseMoved { x: 4.0, y: 2.0 });
        platform.flush_input_buffer();
        platform.flush_input_buffer();

        match rx.try_recv() {
            Ok(PlatformEvent::Inputs { discrete, continuous }) => {
                assert_eq!(discrete, [InputEvent::KeyDown(KeyCode::Space)]);
                assert_eq!(continuous, [InputEvent::MouseMoved { x: 4.0, y: 2.0 }]);
            }
            other => panic!("Expected Inputs event, got {:?}", other),
        }
        assert!(rx.try_recv().is_err(), "second flush must not send");
    }

    #[test]
    fn flush_survives_a_departed_game_thread() {
        let (mut platform, rx, _, _) = platform();

        platform.buffer.push(InputEvent::KeyDown(KeyCode::Space));
        drop(rx);

        platform.flush_input_buffer();
        assert!(platform.buffer.is_empty());
    }

    #[test]
    fn game_finished_flag_is_shared() {
        let (platform, _rx, _, flag) = platform();

        flag.store(true, Ordering::Release);

        assert!(platform.game_finished());
    }
}
