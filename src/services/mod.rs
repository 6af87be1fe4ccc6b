// ChatFolders services
// Stateless or self-contained logic: rendering, import/export, host page
// observation and settings.

pub mod host_watcher;
pub mod html_renderer;
pub mod import_export;
pub mod render_engine;
pub mod settings_engine;
