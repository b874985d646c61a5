//=========================================================================
// Audio Sink
//=========================================================================
//
// Backend contract for actually producing sound.
//
// The manager decides what plays; the sink only starts and stops it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

use log::info;

//=== Internal Dependencies ===============================================

use super::{AudioError, Sound, SoundHandle};

//=== AudioSink ===========================================================

/// Mixer backend.
///
/// Sinks live on the game-loop thread; [`SinkFactory`] builds one there.
pub trait AudioSink {
    /// Starts `sound`. An error leaves the sound stopped.
    fn play(&mut self, handle: SoundHandle, sound: &Sound) -> Result<(), AudioError>;

    fn stop(&mut self, handle: SoundHandle, sound: &Sound);
}

//=== NullSink ============================================================

/// Silent backend that only logs what would play.
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, handle: SoundHandle, sound: &Sound) -> Result<(), AudioError> {
        info!(
            target: "audio",
            "▶ {:?} {} ({:?}, volume {}, loop {})",
            handle,
            sound.path().display(),
            sound.kind(),
            sound.volume(),
            sound.is_looping()
        );
        Ok(())
    }

    fn stop(&mut self, handle: SoundHandle, sound: &Sound) {
        info!(target: "audio", "■ {:?} {}", handle, sound.path().display());
    }
}

//=== RecordingSink =======================================================

/// A single call received by a [`RecordingSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkCall {
    Play(SoundHandle),
    Stop(SoundHandle),
}

/// Shared handle to the calls captured by a [`RecordingSink`].
pub type SinkLog = Rc<RefCell<Vec<SinkCall>>>;

/// Sink that records calls instead of producing sound.
///
/// Failed plays are not recorded.
#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: SinkLog,
    plays_left: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `play` after the first `successes` fail with
    /// [`AudioError::Backend`].
    pub fn failing_after(mut self, successes: usize) -> Self {
        self.plays_left = Some(successes);
        self
    }

    pub fn log(&self) -> SinkLog {
        Rc::clone(&self.calls)
    }
}

impl AudioSink for RecordingSink {
    fn play(&mut self, handle: SoundHandle, _sound: &Sound) -> Result<(), AudioError> {
        if let Some(left) = self.plays_left.as_mut() {
            if *left == 0 {
                return Err(AudioError::Backend("no device".into()));
            }
            *left -= 1;
        }
        self.calls.borrow_mut().push(SinkCall::Play(handle));
        Ok(())
    }

    fn stop(&mut self, handle: SoundHandle, _sound: &Sound) {
        self.calls.borrow_mut().push(SinkCall::Stop(handle));
    }
}

//=== SinkFactory =========================================================

/// Builds the audio backend on the game-loop thread.
pub type SinkFactory = Box<dyn FnOnce() -> Box<dyn AudioSink> + Send>;
