//! ChatFolders UI layer.
//!
//! Uses `wry` to open the host chat site in a native webview and inject the
//! sidebar script into it. The script reports the anchor element and title
//! changes over IPC; Rust answers by pushing rendered sidebar HTML back with
//! `evaluate_script`.

pub mod webview_app;
