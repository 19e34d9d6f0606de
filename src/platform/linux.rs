// Linux paths follow the XDG base directory layout.
// Config: ~/.config/jobflow
// Data:   ~/.local/share/jobflow

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

fn xdg_dir(var: &str, fallback: &[&str]) -> PathBuf {
    match env::var(var) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir).join("jobflow"),
        _ => fallback
            .iter()
            .fold(home_dir(), |path, part| path.join(part))
            .join("jobflow"),
    }
}

/// `$XDG_CONFIG_HOME/jobflow`, otherwise `~/.config/jobflow`.
pub fn get_config_dir() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", &[".config"])
}

/// `$XDG_DATA_HOME/jobflow`, otherwise `~/.local/share/jobflow`.
pub fn get_data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", &[".local", "share"])
}
