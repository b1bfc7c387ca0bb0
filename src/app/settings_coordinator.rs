//! Settings persistence through eframe storage.
//!
//! Every setting is stored as a JSON string under its own key, so a value
//! that fails to parse (for example after a format change) only resets that
//! one setting to its default.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::app::ViewerSettings;
use crate::app::ThemeCoordinator;

const GESTURE_CONFIG_KEY: &str = "gesture_config";
const PRIMARY_MODULE_KEY: &str = "primary_module";
const SECONDARY_MODULE_KEY: &str = "secondary_module";
const LAYOUT_KEY: &str = "layout";

pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads a setting, falling back to `default` when it is missing or
    /// cannot be parsed.
    pub fn load_setting_or<T>(storage: Option<&dyn eframe::Storage>, key: &str, default: T) -> T
    where
        T: for<'de> Deserialize<'de>,
    {
        let Some(json_str) = storage.and_then(|s| s.get_string(key)) else {
            return default;
        };
        match serde_json::from_str(&json_str) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, %e, "ignoring unreadable setting");
                default
            }
        }
    }

    /// Saves a setting as JSON.
    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(json_str) => storage.set_string(key, json_str),
            Err(e) => warn!(key, %e, "failed to serialize setting"),
        }
    }

    /// Restores everything the viewer persists.
    pub fn load_viewer_settings(storage: Option<&dyn eframe::Storage>) -> ViewerSettings {
        let defaults = ViewerSettings::default();
        ViewerSettings {
            theme_name: ThemeCoordinator::load_theme_from_storage(storage),
            config: Self::load_setting_or(storage, GESTURE_CONFIG_KEY, defaults.config),
            primary: Self::load_setting_or(storage, PRIMARY_MODULE_KEY, defaults.primary),
            secondary: Self::load_setting_or(storage, SECONDARY_MODULE_KEY, defaults.secondary),
            layout: Self::load_setting_or(storage, LAYOUT_KEY, defaults.layout),
        }
    }

    pub fn save_viewer_settings(storage: &mut dyn eframe::Storage, settings: &ViewerSettings) {
        ThemeCoordinator::save_theme_to_storage(storage, &settings.theme_name);
        Self::save_setting(storage, GESTURE_CONFIG_KEY, &settings.config);
        Self::save_setting(storage, PRIMARY_MODULE_KEY, &settings.primary);
        Self::save_setting(storage, SECONDARY_MODULE_KEY, &settings.secondary);
        Self::save_setting(storage, LAYOUT_KEY, &settings.layout);
        storage.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdas::GestureConfig;
    use std::collections::HashMap;
    use eframe::Storage;

    /// Simple mock storage for testing
    #[derive(Default)]
    struct MockStorage {
        data: HashMap<String, String>,
    }

    impl eframe::Storage for MockStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.data.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.data.insert(key.to_string(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn test_defaults_without_storage() {
        let settings = SettingsCoordinator::load_viewer_settings(None);
        assert_eq!(settings.config, GestureConfig::default());
        assert_eq!(settings.primary, "Box Zoom");
        assert_eq!(settings.secondary, "Zoom Pan");
        assert_eq!(settings.theme_name, "Dark");
    }

    #[test]
    fn test_round_trip() {
        let mut storage = MockStorage::default();
        let mut settings = ViewerSettings::default();
        settings.config.history_depth = 10;
        settings.config.wheel_coalesce_ms = 80;
        settings.primary = "Crosshair Digitizer".to_string();
        settings.theme_name = "Light".to_string();
        SettingsCoordinator::save_viewer_settings(&mut storage, &settings);

        let loaded = SettingsCoordinator::load_viewer_settings(Some(&storage));
        assert_eq!(loaded.config, settings.config);
        assert_eq!(loaded.primary, "Crosshair Digitizer");
        assert_eq!(loaded.secondary, "Zoom Pan");
        assert_eq!(loaded.theme_name, "Light");
        assert_eq!(loaded.layout, settings.layout);
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let mut storage = MockStorage::default();
        storage.set_string(GESTURE_CONFIG_KEY, r#"{"drag_threshold_px": 6}"#.to_string());
        let loaded = SettingsCoordinator::load_viewer_settings(Some(&storage));
        assert_eq!(loaded.config.drag_threshold_px, 6);
        assert_eq!(loaded.config.history_depth, 50);
    }

    #[test]
    fn test_garbage_falls_back() {
        let mut storage = MockStorage::default();
        storage.set_string(PRIMARY_MODULE_KEY, "not json".to_string());
        let primary: String =
            SettingsCoordinator::load_setting_or(Some(&storage), PRIMARY_MODULE_KEY, "x".to_string());
        assert_eq!(primary, "x");
    }
}
