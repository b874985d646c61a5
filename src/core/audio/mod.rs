//=========================================================================
// Audio System
//=========================================================================
//
// Sound registration and playback policy over a pluggable mixer.
//
// Architecture:
//   AudioManager
//     ├─ slots: Vec<SoundSlot> (bounded)
//     ├─ current_music: Option<SoundHandle>
//     └─ sink: Box<dyn AudioSink> (NullSink by default)
//
//=========================================================================

//=== Module Declarations =================================================

mod audio_manager;
mod sink;

//=== Public API ==========================================================

pub use audio_manager::{
    AudioError, AudioKind, AudioManager, Sound, SoundHandle, DEFAULT_MAX_SOUNDS, MAX_VOLUME,
};
pub use sink::{AudioSink, NullSink, RecordingSink, SinkCall, SinkFactory, SinkLog};
