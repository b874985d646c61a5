//=========================================================================
// Default Settings
//=========================================================================
//
// Stock categories and settings installed at startup.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{SettingsError, SettingsStore};

//=== Keys ================================================================

pub const FULLSCREEN: &str = "fullscreen";
pub const RESOLUTION_W: &str = "resolution_w";
pub const RESOLUTION_H: &str = "resolution_h";
pub const MASTER_VOLUME: &str = "master_volume";
pub const MUSIC_VOLUME: &str = "music_volume";
pub const SFX_VOLUME: &str = "sfx_volume";
pub const DIFFICULTY: &str = "difficulty";

pub const DIFFICULTY_OPTIONS: [&str; 4] = ["Easy", "Normal", "Hard", "Nightmare"];

//=== install_default_settings ============================================

/// Registers the video, audio, controls and gameplay categories with
/// their stock settings.
pub fn install_default_settings(store: &mut SettingsStore) -> Result<(), SettingsError> {
    store.register_category("video", "Video Settings")?;
    store.register_category("audio", "Audio Settings")?;
    store.register_category("controls", "Control Settings")?;
    store.register_category("gameplay", "Gameplay Settings")?;

    store.register_bool("video", FULLSCREEN, "Fullscreen Mode", false)?;
    store.register_int("video", RESOLUTION_W, "Resolution Width", 1280, 800, 3840)?;
    store.register_int("video", RESOLUTION_H, "Resolution Height", 720, 600, 2160)?;

    store.register_float("audio", MASTER_VOLUME, "Master Volume", 1.0, 0.0, 1.0)?;
    store.register_float("audio", MUSIC_VOLUME, "Music Volume", 0.8, 0.0, 1.0)?;
    store.register_float("audio", SFX_VOLUME, "Sound Effects Volume", 1.0, 0.0, 1.0)?;

    store.register_choice("gameplay", DIFFICULTY, "Difficulty", 1, &DIFFICULTY_OPTIONS)?;

    Ok(())
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installs_expected_defaults() {
        let mut store = SettingsStore::new();
        install_default_settings(&mut store).unwrap();

        assert_eq!(store.boolean(FULLSCREEN), Ok(false));
        assert_eq!(store.int(RESOLUTION_W), Ok(1280));
        assert_eq!(store.int(RESOLUTION_H), Ok(720));
        assert_eq!(store.float(MASTER_VOLUME), Ok(1.0));
        assert_eq!(store.float(MUSIC_VOLUME), Ok(0.8));
        assert_eq!(store.float(SFX_VOLUME), Ok(1.0));
        assert_eq!(store.choice_label(DIFFICULTY), Ok("Normal"));
        assert_eq!(store.categories().count(), 4);
    }

    #[test]
    fn installing_twice_fails() {
        let mut store = SettingsStore::new();
        install_default_settings(&mut store).unwrap();

        assert!(install_default_settings(&mut store).is_err());
    }
}
