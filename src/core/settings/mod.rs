//=========================================================================
// Settings
//=========================================================================
//
// Runtime-tunable values (volume, resolution, difficulty).
//
// Architecture:
//   SettingsStore
//     └─ categories: Vec<Category { settings: Vec<Setting> }>
//
//=========================================================================

//=== Module Declarations =================================================

pub mod defaults;
mod settings_store;

//=== Public API ==========================================================

pub use defaults::install_default_settings;
pub use settings_store::{
    Setting, SettingValue, SettingsError, SettingsStore, MAX_SETTINGS_PER_CATEGORY,
    MAX_SETTING_CATEGORIES,
};
