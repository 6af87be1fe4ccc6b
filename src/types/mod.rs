// ChatFolders shared type definitions
// Each submodule defines types used across the application.

pub mod chat;
pub mod document;
pub mod errors;
pub mod folder;
pub mod item;
pub mod settings;
pub mod ui;
