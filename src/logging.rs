//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Installs a stderr `fmt` subscriber. `RUST_LOG` wins over `default_filter`.
/// Calling it twice is harmless; the second install is ignored.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Filter directive from the settings file, `"info"` when unreadable.
pub fn configured_filter(settings_path: Option<String>) -> String {
    use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

    let mut engine = SettingsEngine::new(settings_path);
    engine
        .load()
        .map(|s| s.logging.filter)
        .unwrap_or_else(|_| "info".to_string())
}
