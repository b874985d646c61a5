//=========================================================================
// Audio Manager
//=========================================================================
//
// Bounded table of registered sounds with single-track music.
//
// Architecture:
//   register(Sound) → slots: Vec<SoundSlot> (≤ max_sounds) → SoundHandle
//                                   ↓
//   play(handle) → sink.play() → Ok: stop previous music (if music)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::{Path, PathBuf};

use log::{debug, error, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::{AudioSink, NullSink};

//=== Constants ===========================================================

/// Loudest volume accepted by [`Sound`].
pub const MAX_VOLUME: u8 = 128;

/// Default size of the sound table.
pub const DEFAULT_MAX_SOUNDS: usize = 10;

//=== AudioError ==========================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AudioError {
    #[error("sound table is full ({max} sounds)")]
    Full { max: usize },

    #[error("no sound registered for {0:?}")]
    UnknownSound(SoundHandle),

    #[error("audio backend failed: {0}")]
    Backend(String),
}

//=== Sound ===============================================================

/// How a sound is mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioKind {
    /// Streamed; only one music track plays at a time.
    Music,
    Sfx,
    Voice,
    Ambient,
}

/// Description of a playable sound.
#[derive(Debug, Clone, PartialEq)]
pub struct Sound {
    path: PathBuf,
    kind: AudioKind,
    volume: u8,
    looping: bool,
}

impl Sound {
    /// Volume is clamped to [`MAX_VOLUME`].
    pub fn new(path: impl Into<PathBuf>, kind: AudioKind, volume: u8, looping: bool) -> Self {
        Self {
            path: path.into(),
            kind,
            volume: volume.min(MAX_VOLUME),
            looping,
        }
    }

    pub fn music(path: impl Into<PathBuf>, volume: u8) -> Self {
        Self::new(path, AudioKind::Music, volume, true)
    }

    pub fn sfx(path: impl Into<PathBuf>, volume: u8) -> Self {
        Self::new(path, AudioKind::Sfx, volume, false)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> AudioKind {
        self.kind
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }
}

/// Index of a registered sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(usize);

impl SoundHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

struct SoundSlot {
    sound: Sound,
    playing: bool,
}

//=== AudioManager ========================================================

/// Owns the sound table and forwards play/stop to an [`AudioSink`].
///
/// # Example
///
/// ```
/// use conquest_engine::core::audio::{AudioManager, Sound};
///
/// let mut audio = AudioManager::new(4);
/// let theme = audio.register(Sound::music("assets/theme.ogg", 100)).unwrap();
///
/// audio.play(theme).unwrap();
/// assert_eq!(audio.current_music(), Some(theme));
/// ```
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    slots: Vec<SoundSlot>,
    max_sounds: usize,
    current_music: Option<SoundHandle>,
}

impl AudioManager {
    /// Creates a manager with a silent [`NullSink`].
    pub fn new(max_sounds: usize) -> Self {
        Self::with_sink(max_sounds, Box::new(NullSink))
    }

    pub fn with_sink(max_sounds: usize, sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            slots: Vec::with_capacity(max_sounds),
            max_sounds,
            current_music: None,
        }
    }

    //--- Registration -----------------------------------------------------

    pub fn register(&mut self, sound: Sound) -> Result<SoundHandle, AudioError> {
        if self.slots.len() >= self.max_sounds {
            warn!(target: "audio", "Cannot register {}: table full", sound.path().display());
            return Err(AudioError::Full { max: self.max_sounds });
        }

        debug!(target: "audio", "Registered {} as #{}", sound.path().display(), self.slots.len());
        self.slots.push(SoundSlot { sound, playing: false });
        Ok(SoundHandle(self.slots.len() - 1))
    }

    //--- Playback ---------------------------------------------------------

    /// Starts a sound. Already playing sounds are left alone.
    ///
    /// Playing music stops whatever music was playing before, once the new
    /// track has started. If the backend fails, the previous track keeps
    /// playing. Non-looping effects are one-shots: they never stay marked
    /// as playing, so every call retriggers them.
    pub fn play(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        let slot = self.slots.get(handle.0).ok_or(AudioError::UnknownSound(handle))?;
        if slot.playing {
            return Ok(());
        }

        if let Err(e) = self.sink.play(handle, &slot.sound) {
            error!(target: "audio", "Failed to play {}: {}", slot.sound.path().display(), e);
            return Err(e);
        }
        let is_music = slot.sound.kind == AudioKind::Music;
        let keeps_playing = is_music || slot.sound.looping;

        if is_music {
            if let Some(previous) = self.current_music.filter(|&p| p != handle) {
                self.stop(previous)?;
            }
            self.current_music = Some(handle);
        }
        self.slots[handle.0].playing = keeps_playing;
        Ok(())
    }

    /// Stops a sound. Stopped sounds are left alone.
    pub fn stop(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        let slot = self.slots.get_mut(handle.0).ok_or(AudioError::UnknownSound(handle))?;

        if slot.playing {
            self.sink.stop(handle, &slot.sound);
            slot.playing = false;
        }
        if self.current_music == Some(handle) {
            self.current_music = None;
        }
        Ok(())
    }

    /// Stops every playing sound.
    pub fn stop_all(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.playing {
                self.sink.stop(SoundHandle(index), &slot.sound);
                slot.playing = false;
            }
        }
        self.current_music = None;
    }

    /// Changes the volume used the next time the sound starts.
    pub fn set_volume(&mut self, handle: SoundHandle, volume: u8) -> Result<(), AudioError> {
        let slot = self.slots.get_mut(handle.0).ok_or(AudioError::UnknownSound(handle))?;
        slot.sound.volume = volume.min(MAX_VOLUME);
        Ok(())
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_playing(&self, handle: SoundHandle) -> bool {
        self.slots.get(handle.0).is_some_and(|slot| slot.playing)
    }

    pub fn current_music(&self) -> Option<SoundHandle> {
        self.current_music
    }

    pub fn sound(&self, handle: SoundHandle) -> Option<&Sound> {
        self.slots.get(handle.0).map(|slot| &slot.sound)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SOUNDS)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audio::{RecordingSink, SinkCall, SinkLog};

    fn recorded(sink: RecordingSink) -> (AudioManager, SinkLog) {
        let calls = sink.log();
        (AudioManager::with_sink(3, Box::new(sink)), calls)
    }

    fn spy(fail: bool) -> (AudioManager, SinkLog) {
        let sink = RecordingSink::new();
        recorded(if fail { sink.failing_after(0) } else { sink })
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn register_is_bounded() {
        let (mut audio, _) = spy(false);
        for i in 0..3 {
            assert_eq!(audio.register(Sound::sfx(format!("{}.wav", i), 64)).map(|h| h.index()), Ok(i));
        }

        assert_eq!(audio.register(Sound::sfx("x.wav", 64)), Err(AudioError::Full { max: 3 }));
    }

    #[test]
    fn volume_is_clamped() {
        let sound = Sound::sfx("loud.wav", 255);
        assert_eq!(sound.volume(), MAX_VOLUME);
    }

    #[test]
    fn new_music_stops_previous_music() {
        let (mut audio, calls) = spy(false);
        let a = audio.register(Sound::music("a.ogg", 100)).unwrap();
        let b = audio.register(Sound::music("b.ogg", 100)).unwrap();

        audio.play(a).unwrap();
        audio.play(b).unwrap();

        assert_eq!(*calls.borrow(), [SinkCall::Play(b), SinkCall::Stop(a)]);
        assert!(!audio.is_playing(a));
        assert!(audio.is_playing(b));
        assert_eq!(audio.current_music(), Some(b));
    }

    #[test]
    fn sfx_does_not_touch_music() {
        let (mut audio, calls) = spy(false);
        let theme = audio.register(Sound::music("theme.ogg", 100)).unwrap();
        let click = audio.register(Sound::sfx("click.wav", 128)).unwrap();

        audio.play(theme).unwrap();
        audio.play(click).unwrap();

        assert_eq!(*calls.borrow(), [SinkCall::Play(theme), SinkCall::Play(click)]);
        assert_eq!(audio.current_music(), Some(theme));
    }

    #[test]
    fn play_while_playing_is_noop() {
        let (mut audio, calls) = spy(false);
        let theme = audio.register(Sound::music("theme.ogg", 100)).unwrap();

        audio.play(theme).unwrap();
        audio.play(theme).unwrap();

        assert_eq!(*calls.borrow(), [SinkCall::Play(theme)]);
    }

    #[test]
    fn one_shot_effects_retrigger() {
        let (mut audio, calls) = spy(false);
        let click = audio.register(Sound::sfx("click.wav", 128)).unwrap();

        audio.play(click).unwrap();
        audio.play(click).unwrap();

        assert_eq!(*calls.borrow(), [SinkCall::Play(click), SinkCall::Play(click)]);
        assert!(!audio.is_playing(click));
    }

    #[test]
    fn stop_clears_current_music() {
        let (mut audio, _) = spy(false);
        let theme = audio.register(Sound::music("theme.ogg", 100)).unwrap();

        audio.play(theme).unwrap();
        audio.stop(theme).unwrap();

        assert!(!audio.is_playing(theme));
        assert_eq!(audio.current_music(), None);
    }

    #[test]
    fn unknown_handle_is_an_error() {
        let (mut audio, _) = spy(false);
        let ghost = SoundHandle(7);

        assert_eq!(audio.play(ghost), Err(AudioError::UnknownSound(ghost)));
        assert_eq!(audio.stop(ghost), Err(AudioError::UnknownSound(ghost)));
        assert!(!audio.is_playing(ghost));
    }

    #[test]
    fn backend_failure_leaves_sound_stopped() {
        let (mut audio, _) = spy(true);
        let click = audio.register(Sound::sfx("click.wav", 128)).unwrap();

        assert!(matches!(audio.play(click), Err(AudioError::Backend(_))));
        assert!(!audio.is_playing(click));
    }

    #[test]
    fn failed_music_keeps_previous_track() {
        let (mut audio, calls) = recorded(RecordingSink::new().failing_after(1));
        let a = audio.register(Sound::music("a.ogg", 100)).unwrap();
        let b = audio.register(Sound::music("b.ogg", 100)).unwrap();
        audio.play(a).unwrap();

        assert_eq!(audio.play(b), Err(AudioError::Backend("no device".into())));

        assert_eq!(audio.current_music(), Some(a));
        assert!(audio.is_playing(a));
        assert!(!audio.is_playing(b));
        assert_eq!(*calls.borrow(), [SinkCall::Play(a)]);
    }

    #[test]
    fn stop_all_halts_everything() {
        let (mut audio, _) = spy(false);
        let theme = audio.register(Sound::music("theme.ogg", 100)).unwrap();
        let rain = audio.register(Sound::new("rain.ogg", AudioKind::Ambient, 80, true)).unwrap();
        audio.play(theme).unwrap();
        audio.play(rain).unwrap();

        audio.stop_all();

        assert!(!audio.is_playing(theme));
        assert!(!audio.is_playing(rain));
        assert_eq!(audio.current_music(), None);
    }

    #[test]
    fn set_volume_updates_sound() {
        let (mut audio, _) = spy(false);
        let theme = audio.register(Sound::music("theme.ogg", 100)).unwrap();

        audio.set_volume(theme, 20).unwrap();

        assert_eq!(audio.sound(theme).map(Sound::volume), Some(20));
    }
}
