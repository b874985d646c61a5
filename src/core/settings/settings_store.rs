//=========================================================================
// Settings Store
//=========================================================================
//
// Typed, categorized, range-checked runtime settings.
//
// Architecture:
//   register_category(name) → categories: Vec<Category> (≤ 16)
//   register_*(category, key, default, range) → Category.settings
//                                   ↓
//   float/int/boolean/choice(key) ← lookup by key across categories
//
// Keys are unique across the whole store, not just per category.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};
use thiserror::Error;

//=== Constants ===========================================================

pub const MAX_SETTING_CATEGORIES: usize = 16;
pub const MAX_SETTINGS_PER_CATEGORY: usize = 32;

//=== SettingsError =======================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("too many setting categories (max {})", MAX_SETTING_CATEGORIES)]
    TooManyCategories,

    #[error("setting category '{0}' already exists")]
    DuplicateCategory(String),

    #[error("unknown setting category '{0}'")]
    UnknownCategory(String),

    #[error("category '{0}' is full (max {max} settings)", max = MAX_SETTINGS_PER_CATEGORY)]
    CategoryFull(String),

    #[error("setting '{0}' already exists")]
    DuplicateSetting(String),

    #[error("unknown setting '{0}'")]
    UnknownSetting(String),

    #[error("setting '{key}' is not a {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    #[error("setting '{key}' has an empty or non-numeric range")]
    InvalidRange { key: String },

    #[error("setting '{key}' cannot hold NaN")]
    InvalidValue { key: String },
}

//=== SettingValue ========================================================

/// Current value and constraints of one setting.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Int { value: i32, min: i32, max: i32 },
    Float { value: f32, min: f32, max: f32 },
    Bool(bool),
    /// Index into a fixed list of labels.
    Choice { index: usize, options: Vec<String> },
}

impl SettingValue {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Int { .. } => "int",
            Self::Float { .. } => "float",
            Self::Bool(_) => "bool",
            Self::Choice { .. } => "choice",
        }
    }
}

//=== Setting =============================================================

#[derive(Debug, Clone)]
pub struct Setting {
    key: String,
    display_name: String,
    value: SettingValue,
    default: SettingValue,
}

impl Setting {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn value(&self) -> &SettingValue {
        &self.value
    }
}

#[derive(Debug)]
struct Category {
    name: String,
    display_name: String,
    settings: Vec<Setting>,
}

//=== SettingsStore =======================================================

/// In-memory settings grouped by category.
///
/// Setters clamp into the registered range. Reads of an unknown key or of
/// the wrong type return an error.
///
/// # Example
///
/// ```
/// use conquest_engine::core::settings::SettingsStore;
///
/// let mut settings = SettingsStore::new();
/// settings.register_category("audio", "Audio Settings").unwrap();
/// settings.register_float("audio", "music_volume", "Music Volume", 0.8, 0.0, 1.0).unwrap();
///
/// settings.set_float("music_volume", 3.0).unwrap();
/// assert_eq!(settings.float("music_volume"), Ok(1.0));
/// ```
#[derive(Debug, Default)]
pub struct SettingsStore {
    categories: Vec<Category>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Registration -----------------------------------------------------

    pub fn register_category(&mut self, name: &str, display_name: &str) -> Result<(), SettingsError> {
        if self.categories.len() >= MAX_SETTING_CATEGORIES {
            warn!("Cannot register category '{}': limit reached", name);
            return Err(SettingsError::TooManyCategories);
        }
        if self.categories.iter().any(|c| c.name == name) {
            warn!("Category '{}' already registered", name);
            return Err(SettingsError::DuplicateCategory(name.to_owned()));
        }

        self.categories.push(Category {
            name: name.to_owned(),
            display_name: display_name.to_owned(),
            settings: Vec::new(),
        });
        debug!("Registered settings category '{}'", name);
        Ok(())
    }

    pub fn register_int(
        &mut self,
        category: &str,
        key: &str,
        display_name: &str,
        default: i32,
        min: i32,
        max: i32,
    ) -> Result<(), SettingsError> {
        if min > max {
            warn!("Cannot register '{}': range {}..={} is empty", key, min, max);
            return Err(SettingsError::InvalidRange { key: key.to_owned() });
        }
        let value = SettingValue::Int { value: default.clamp(min, max), min, max };
        self.register(category, key, display_name, value)
    }

    pub fn register_float(
        &mut self,
        category: &str,
        key: &str,
        display_name: &str,
        default: f32,
        min: f32,
        max: f32,
    ) -> Result<(), SettingsError> {
        // Also false when either bound is NaN.
        if !(min <= max) || default.is_nan() {
            warn!("Cannot register '{}': invalid range {}..={} or default {}", key, min, max, default);
            return Err(SettingsError::InvalidRange { key: key.to_owned() });
        }
        let value = SettingValue::Float { value: default.clamp(min, max), min, max };
        self.register(category, key, display_name, value)
    }

    pub fn register_bool(
        &mut self,
        category: &str,
        key: &str,
        display_name: &str,
        default: bool,
    ) -> Result<(), SettingsError> {
        self.register(category, key, display_name, SettingValue::Bool(default))
    }

    /// Registers a setting picking one of `options`. `default` is clamped
    /// to a valid index.
    pub fn register_choice(
        &mut self,
        category: &str,
        key: &str,
        display_name: &str,
        default: usize,
        options: &[&str],
    ) -> Result<(), SettingsError> {
        let value = SettingValue::Choice {
            index: default.min(options.len().saturating_sub(1)),
            options: options.iter().map(|o| (*o).to_owned()).collect(),
        };
        self.register(category, key, display_name, value)
    }

    fn register(
        &mut self,
        category: &str,
        key: &str,
        display_name: &str,
        value: SettingValue,
    ) -> Result<(), SettingsError> {
        if self.find(key).is_some() {
            warn!("Setting '{}' already registered", key);
            return Err(SettingsError::DuplicateSetting(key.to_owned()));
        }

        let Some(cat) = self.categories.iter_mut().find(|c| c.name == category) else {
            warn!("Cannot register '{}': unknown category '{}'", key, category);
            return Err(SettingsError::UnknownCategory(category.to_owned()));
        };
        if cat.settings.len() >= MAX_SETTINGS_PER_CATEGORY {
            warn!("Cannot register '{}': category '{}' is full", key, category);
            return Err(SettingsError::CategoryFull(category.to_owned()));
        }

        cat.settings.push(Setting {
            key: key.to_owned(),
            display_name: display_name.to_owned(),
            default: value.clone(),
            value,
        });
        Ok(())
    }

    //--- Getters ----------------------------------------------------------

    pub fn float(&self, key: &str) -> Result<f32, SettingsError> {
        match self.value(key)? {
            SettingValue::Float { value, .. } => Ok(*value),
            other => Err(mismatch(key, other, "float")),
        }
    }

    pub fn int(&self, key: &str) -> Result<i32, SettingsError> {
        match self.value(key)? {
            SettingValue::Int { value, .. } => Ok(*value),
            other => Err(mismatch(key, other, "int")),
        }
    }

    pub fn boolean(&self, key: &str) -> Result<bool, SettingsError> {
        match self.value(key)? {
            SettingValue::Bool(value) => Ok(*value),
            other => Err(mismatch(key, other, "bool")),
        }
    }

    /// Selected index of a choice setting.
    pub fn choice(&self, key: &str) -> Result<usize, SettingsError> {
        match self.value(key)? {
            SettingValue::Choice { index, .. } => Ok(*index),
            other => Err(mismatch(key, other, "choice")),
        }
    }

    /// Label of the selected option of a choice setting.
    pub fn choice_label(&self, key: &str) -> Result<&str, SettingsError> {
        match self.value(key)? {
            SettingValue::Choice { index, options } => {
                Ok(options.get(*index).map(String::as_str).unwrap_or_default())
            }
            other => Err(mismatch(key, other, "choice")),
        }
    }

    pub fn value(&self, key: &str) -> Result<&SettingValue, SettingsError> {
        self.find(key)
            .map(|s| &s.value)
            .ok_or_else(|| SettingsError::UnknownSetting(key.to_owned()))
    }

    //--- Setters ----------------------------------------------------------

    pub fn set_float(&mut self, key: &str, new: f32) -> Result<(), SettingsError> {
        if new.is_nan() {
            warn!("Ignoring NaN for setting '{}'", key);
            return Err(SettingsError::InvalidValue { key: key.to_owned() });
        }
        match self.value_mut(key)? {
            SettingValue::Float { value, min, max } => {
                *value = new.clamp(*min, *max);
                Ok(())
            }
            other => Err(mismatch(key, other, "float")),
        }
    }

    pub fn set_int(&mut self, key: &str, new: i32) -> Result<(), SettingsError> {
        match self.value_mut(key)? {
            SettingValue::Int { value, min, max } => {
                *value = new.clamp(*min, *max);
                Ok(())
            }
            other => Err(mismatch(key, other, "int")),
        }
    }

    pub fn set_bool(&mut self, key: &str, new: bool) -> Result<(), SettingsError> {
        match self.value_mut(key)? {
            SettingValue::Bool(value) => {
                *value = new;
                Ok(())
            }
            other => Err(mismatch(key, other, "bool")),
        }
    }

    pub fn set_choice(&mut self, key: &str, new: usize) -> Result<(), SettingsError> {
        match self.value_mut(key)? {
            SettingValue::Choice { index, options } => {
                *index = new.min(options.len().saturating_sub(1));
                Ok(())
            }
            other => Err(mismatch(key, other, "choice")),
        }
    }

    //--- Reset ------------------------------------------------------------

    pub fn reset(&mut self, key: &str) -> Result<(), SettingsError> {
        let setting = self
            .find_mut(key)
            .ok_or_else(|| SettingsError::UnknownSetting(key.to_owned()))?;
        setting.value = setting.default.clone();
        Ok(())
    }

    pub fn reset_category(&mut self, category: &str) -> Result<(), SettingsError> {
        let cat = self
            .categories
            .iter_mut()
            .find(|c| c.name == category)
            .ok_or_else(|| SettingsError::UnknownCategory(category.to_owned()))?;
        for setting in &mut cat.settings {
            setting.value = setting.default.clone();
        }
        Ok(())
    }

    pub fn reset_to_defaults(&mut self) {
        for setting in self.categories.iter_mut().flat_map(|c| c.settings.iter_mut()) {
            setting.value = setting.default.clone();
        }
    }

    //--- Introspection ----------------------------------------------------

    /// `(name, display_name)` of every category in registration order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &str)> {
        self.categories.iter().map(|c| (c.name.as_str(), c.display_name.as_str()))
    }

    /// Settings of `category` in registration order (empty if unknown).
    pub fn settings(&self, category: &str) -> &[Setting] {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map_or(&[], |c| c.settings.as_slice())
    }

    //--- Internal Helpers -------------------------------------------------

    fn find(&self, key: &str) -> Option<&Setting> {
        self.categories
            .iter()
            .flat_map(|c| c.settings.iter())
            .find(|s| s.key == key)
    }

    fn find_mut(&mut self, key: &str) -> Option<&mut Setting> {
        self.categories
            .iter_mut()
            .flat_map(|c| c.settings.iter_mut())
            .find(|s| s.key == key)
    }

    fn value_mut(&mut self, key: &str) -> Result<&mut SettingValue, SettingsError> {
        self.find_mut(key)
            .map(|s| &mut s.value)
            .ok_or_else(|| SettingsError::UnknownSetting(key.to_owned()))
    }
}

fn mismatch(key: &str, found: &SettingValue, expected: &'static str) -> SettingsError {
    warn!("Setting '{}' is a {}, not a {}", key, found.type_name(), expected);
    SettingsError::TypeMismatch { key: key.to_owned(), expected }
}

//=========================================================================
// Unit Tests
//=========================================================================
