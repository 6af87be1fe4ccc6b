// ChatFolders platform paths
// Resolves where settings and the document database live on each OS.
//
// - Linux:   $XDG_CONFIG_HOME/chatfolders, $XDG_DATA_HOME/chatfolders
// - macOS:   ~/Library/Application Support/ChatFolders (both)
// - Windows: %APPDATA%/ChatFolders (both)

use std::env;
use std::path::PathBuf;

const DATABASE_FILE: &str = "chatfolders.db";

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

#[cfg(target_os = "linux")]
fn xdg_dir(var: &str, fallback: &[&str]) -> PathBuf {
    match env::var(var) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir).join("chatfolders"),
        _ => fallback
            .iter()
            .fold(home_dir(), |path, part| path.join(part))
            .join("chatfolders"),
    }
}

/// Returns the platform-specific configuration directory.
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        xdg_dir("XDG_CONFIG_HOME", &[".config"])
    }
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join("ChatFolders")
    }
    #[cfg(target_os = "windows")]
    {
        let appdata = env::var("APPDATA")
            .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
        PathBuf::from(appdata).join("ChatFolders")
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        home_dir().join(".chatfolders")
    }
}

/// Returns the platform-specific data directory.
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        xdg_dir("XDG_DATA_HOME", &[".local", "share"])
    }
    #[cfg(not(target_os = "linux"))]
    {
        get_config_dir()
    }
}

/// Default location of the SQLite database holding the document.
pub fn default_database_path() -> PathBuf {
    get_data_dir().join(DATABASE_FILE)
}
