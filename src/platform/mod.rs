// Tabspace platform abstraction
// Provides platform-specific locations for the settings file and session database.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// File name of the session database inside the data directory.
pub const SESSION_DB_FILE: &str = "sessions.db";

/// Returns the platform-specific configuration directory for Tabspace.
///
/// - **Linux**: `~/.config/tabspace` (or `$XDG_CONFIG_HOME/tabspace`)
/// - **macOS**: `~/Library/Application Support/Tabspace`
/// - **Windows**: `%APPDATA%/Tabspace`
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

/// Returns the platform-specific data directory for Tabspace.
///
/// - **Linux**: `~/.local/share/tabspace` (or `$XDG_DATA_HOME/tabspace`)
/// - **macOS**: `~/Library/Application Support/Tabspace`
/// - **Windows**: `%APPDATA%/Tabspace`
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

/// Default location of the session database.
pub fn default_session_db_path() -> PathBuf {
    get_data_dir().join(SESSION_DB_FILE)
}
