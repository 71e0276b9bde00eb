//! Settings persistence coordination.
//!
//! Settings are stored in eframe's persistent storage as JSON strings, one
//! key per setting.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::app::view_state::ViewSettings;

const VIEW_SETTINGS_KEY: &str = "view_settings";

/// Coordinates settings persistence.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Attempts to load a setting, returning None if not found or invalid.
    pub fn try_load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let storage = storage?;
        let json_str = storage.get_string(key)?;
        match serde_json::from_str(&json_str) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "ignoring unreadable setting");
                None
            }
        }
    }

    /// Loads a setting from persistent storage with a default fallback.
    pub fn load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> T
    where
        T: for<'de> Deserialize<'de> + Default,
    {
        Self::try_load_setting(storage, key).unwrap_or_default()
    }

    /// Saves a setting to persistent storage.
    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(json_str) => storage.set_string(key, json_str),
            Err(e) => warn!(key, error = %e, "failed to serialize setting"),
        }
    }

    /// Loads the view settings, replacing invalid list configs with defaults.
    pub fn load_view_settings(storage: Option<&dyn eframe::Storage>) -> ViewSettings {
        let mut settings: ViewSettings = Self::load_setting(storage, VIEW_SETTINGS_KEY);
        let defaults = ViewSettings::default();

        if let Err(e) = settings.list.validate() {
            warn!(error = %e, "invalid list config in storage, using defaults");
            settings.list = defaults.list;
        }
        if let Err(e) = settings.grid.validate() {
            warn!(error = %e, "invalid grid config in storage, using defaults");
            settings.grid = defaults.grid;
        }
        settings
    }

    pub fn save_view_settings(storage: &mut dyn eframe::Storage, settings: &ViewSettings) {
        Self::save_setting(storage, VIEW_SETTINGS_KEY, settings);
    }
}
