// Jobflow platform paths
// Where the client keeps its settings file and its local storage database.
//
// `cfg(target_os)` selects the implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// File name of the settings document inside [`get_config_dir`].
pub const SETTINGS_FILE: &str = "settings.json";

/// File name of the local storage database inside [`get_data_dir`].
pub const DATABASE_FILE: &str = "jobflow.db";

/// Returns the platform-specific configuration directory.
///
/// - **Linux**: `~/.config/jobflow` (or `$XDG_CONFIG_HOME/jobflow`)
/// - **macOS**: `~/Library/Application Support/Jobflow`
/// - **Windows**: `%APPDATA%/Jobflow`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the platform-specific data directory.
///
/// - **Linux**: `~/.local/share/jobflow` (or `$XDG_DATA_HOME/jobflow`)
/// - **macOS**: `~/Library/Application Support/Jobflow`
/// - **Windows**: `%LOCALAPPDATA%/Jobflow`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}

/// Default settings file path.
pub fn default_settings_path() -> PathBuf {
    get_config_dir().join(SETTINGS_FILE)
}

/// Default local storage database path.
pub fn default_database_path() -> PathBuf {
    get_data_dir().join(DATABASE_FILE)
}
