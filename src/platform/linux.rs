// Tabspace platform paths for Linux
// Config: ~/.config/tabspace
// Data:   ~/.local/share/tabspace

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Uses `$XDG_CONFIG_HOME/tabspace` if set, otherwise `~/.config/tabspace`.
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("tabspace"),
        _ => home_dir().join(".config").join("tabspace"),
    }
}

/// Uses `$XDG_DATA_HOME/tabspace` if set, otherwise `~/.local/share/tabspace`.
pub fn get_data_dir() -> PathBuf {
    match env::var("XDG_DATA_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("tabspace"),
        _ => home_dir().join(".local").join("share").join("tabspace"),
    }
}
