// Jobflow Settings Engine
// Manages client settings: loading, saving, updating individual values, and resetting to defaults.
// Settings are stored as a JSON file at the platform-specific config path.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::ClientSettings;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<ClientSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &ClientSettings;
    fn get_value(&self, key: &str) -> Result<Value, SettingsError>;
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine implementation that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: ClientSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses `settings.json` in the platform config directory.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            platform::default_settings_path()
                .to_string_lossy()
                .to_string()
        });

        Self {
            config_path,
            settings: ClientSettings::default(),
        }
    }

    /// Local storage database path: the configured one, else the platform default.
    pub fn database_path(&self) -> PathBuf {
        match self.settings.storage.database_path.as_deref() {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => platform::default_database_path(),
        }
    }

    fn to_json(&self) -> Result<Value, SettingsError> {
        serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })
    }
}

fn split_key(key: &str) -> Result<Vec<&str>, SettingsError> {
    if key.is_empty() {
        return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
    }
    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(SettingsError::InvalidKey(format!(
            "Key '{}' has an empty segment",
            key
        )));
    }
    Ok(parts)
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// A missing file yields defaults; a malformed or invalid one is an error.
    fn load(&mut self) -> Result<ClientSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            debug!(path = %self.config_path, "No settings file, using defaults");
            self.settings = ClientSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let settings: ClientSettings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        settings.validate().map_err(SettingsError::InvalidValue)?;

        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Saves the current settings, creating parent directories as needed.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        info!(path = %self.config_path, "Settings saved");
        Ok(())
    }

    fn get_settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Reads one value by dot path, e.g. `"api.page_size"`.
    fn get_value(&self, key: &str) -> Result<Value, SettingsError> {
        let parts = split_key(key)?;
        let json = self.to_json()?;
        let mut current = &json;
        for part in parts {
            current = current.get(part).ok_or_else(|| {
                SettingsError::InvalidKey(format!("Key '{}' not found in settings", key))
            })?;
        }
        Ok(current.clone())
    }

    /// Updates one value by dot path and persists.
    ///
    /// The whole document is re-deserialized and validated, so a value of the
    /// wrong type (or a zero page size) is rejected and nothing changes.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        let parts = split_key(key)?;
        let mut json_value = self.to_json()?;

        {
            let (last, parents) = match parts.split_last() {
                Some(split) => split,
                None => return Err(SettingsError::InvalidKey("Key cannot be empty".to_string())),
            };

            let mut current = &mut json_value;
            for part in parents {
                current = current.get_mut(*part).ok_or_else(|| {
                    SettingsError::InvalidKey(format!("Key '{}' not found in settings", key))
                })?;
            }

            match current {
                Value::Object(map) if map.contains_key(*last) => {
                    map.insert(last.to_string(), value);
                }
                Value::Object(_) => {
                    return Err(SettingsError::InvalidKey(format!(
                        "Key '{}' not found in settings",
                        key
                    )));
                }
                _ => {
                    return Err(SettingsError::InvalidKey(format!(
                        "Cannot navigate to key '{}': intermediate value is not an object",
                        key
                    )));
                }
            }
        }

        let new_settings: ClientSettings = serde_json::from_value(json_value).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;
        new_settings
            .validate()
            .map_err(SettingsError::InvalidValue)?;

        self.settings = new_settings;
        self.save()
    }

    /// Restores defaults and persists.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = ClientSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
