//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Contract between the platform (main) thread and the game-loop thread.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use thiserror::Error;
use winit::window::Window;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== Surface =============================================================

/// What a render backend draws into.
///
/// The platform hands one over once its window exists. Without a window
/// (headless runs, tests) only the size is known.
#[derive(Debug, Clone)]
pub struct Surface {
    window: Option<Arc<Window>>,
    width: u32,
    height: u32,
}

impl Surface {
    /// Wraps a live window; the size is its inner size in physical pixels.
    pub fn from_window(window: Arc<Window>) -> Self {
        let size = window.inner_size();
        Self {
            window: Some(window),
            width: size.width,
            height: size.height,
        }
    }

    pub fn headless(width: u32, height: u32) -> Self {
        Self {
            window: None,
            width,
            height,
        }
    }

    /// The window to build a swapchain or pixel buffer on, if any.
    pub fn window(&self) -> Option<&Arc<Window>> {
        self.window.as_ref()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

//=== PlatformEvent =======================================================

/// Messages sent from the platform thread over the bounded channel.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// Input gathered since the previous redraw.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// The user asked to close the window.
    WindowClosed,
}

//=== PlatformError =======================================================

/// Fatal platform failures. Any of these ends the run.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(String),

    #[error("event loop error: {0}")]
    EventLoopExecution(String),

    #[error("game thread could not start: {0}")]
    GameThread(String),
}
