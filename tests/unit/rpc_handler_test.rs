//! Unit tests for the JSON-RPC method dispatcher.

use std::sync::Mutex;

use chatfolders::app::App;
use chatfolders::managers::clock::TickingClock;
use chatfolders::managers::storage_manager::{KeyValueStore, MemoryStore};
use chatfolders::rpc_handler::handle_method;
use chatfolders::services::settings_engine::SettingsEngine;
use chatfolders::types::errors::StorageError;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Store that refuses every write.
struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write("read-only".to_string()))
    }
}

fn setup() -> (Mutex<App>, TempDir) {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("settings.json").to_string_lossy().to_string();
    let app = App::with_store(
        SettingsEngine::new(Some(settings)),
        Box::new(MemoryStore::new()),
        Box::new(TickingClock::new(1)),
    );
    (Mutex::new(app), dir)
}

fn call(app: &Mutex<App>, method: &str, params: Value) -> Value {
    handle_method(app, method, &params).unwrap()
}

#[test]
fn test_ping() {
    let (app, _dir) = setup();
    assert_eq!(call(&app, "ping", json!({})), json!({"pong": true}));
}

#[test]
fn test_unknown_method() {
    let (app, _dir) = setup();
    let err = handle_method(&app, "folder.explode", &json!({})).unwrap_err();
    assert_eq!(err, "unknown method: folder.explode");
}

#[test]
fn test_missing_param() {
    let (app, _dir) = setup();
    let err = handle_method(&app, "folder.create", &json!({})).unwrap_err();
    assert_eq!(err, "missing name");
}

#[test]
fn test_host_ready_returns_view_every_time() {
    let (app, _dir) = setup();
    let absent = call(&app, "host.ready", json!({"anchor_present": false}));
    assert_eq!(absent, json!({"injected": false}));

    let ready = call(
        &app,
        "host.ready",
        json!({"anchor_present": true, "location": "https://x/1", "title": "Q1 - ChatGPT", "page": "p1"}),
    );
    assert_eq!(ready["injected"], true);
    assert!(ready["html"].as_str().unwrap().contains("cf-sidebar"));
    assert!(ready["tree"]["header"].is_object());

    call(&app, "folder.create", json!({"name": "Work"}));
    let again = call(
        &app,
        "host.ready",
        json!({"anchor_present": true, "location": "https://x/1", "page": "p1"}),
    );
    assert_eq!(again["injected"], true);
    assert!(again["html"].as_str().unwrap().contains("data-folder=\"Work\""));
}

/// A reloaded page reports a new token and gets a freshly rendered sidebar
/// with every folder collapsed.
#[test]
fn test_host_ready_after_reload() {
    let (app, _dir) = setup();
    let first = json!({"anchor_present": true, "location": "https://x/1", "page": "p1"});
    call(&app, "host.ready", first);
    let created = call(&app, "folder.create", json!({"name": "Work"}));
    assert_eq!(created["tree"]["rows"][0]["expanded"], true);

    let reloaded = call(
        &app,
        "host.ready",
        json!({"anchor_present": true, "location": "https://x/1", "page": "p2"}),
    );
    assert_eq!(reloaded["injected"], true);
    assert_eq!(reloaded["rerendered"], true);
    assert!(reloaded["html"].as_str().unwrap().contains("data-folder=\"Work\""));
    assert_eq!(reloaded["tree"]["rows"][0]["expanded"], false);
}

/// A title rename during injection that cannot be saved still warns.
#[test]
fn test_host_ready_reports_title_rename_failure() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("settings.json").to_string_lossy().to_string();
    let app = Mutex::new(App::with_store(
        SettingsEngine::new(Some(settings)),
        Box::new(FailingStore),
        Box::new(TickingClock::new(1)),
    ));
    call(&app, "bookmark.add", json!({"name": "Draft", "href": "https://x/1"}));

    let ready = call(
        &app,
        "host.ready",
        json!({"anchor_present": true, "location": "https://x/1", "title": "Final - ChatGPT", "page": "p1"}),
    );
    assert_eq!(ready["injected"], true);
    assert_eq!(ready["rerendered"], true);
    assert_eq!(ready["notice"]["level"], "warning");
    assert_eq!(ready["tree"]["rows"][1]["name"], "Final");
}

#[test]
fn test_folder_flow() {
    let (app, _dir) = setup();
    call(&app, "host.ready", json!({"anchor_present": true, "location": "https://x/1"}));

    let created = call(&app, "folder.create", json!({"name": "Work"}));
    assert_eq!(created["rerendered"], true);
    assert!(created["notice"].is_null());
    assert_eq!(created["tree"]["rows"][0]["kind"], "folder");
    assert_eq!(created["tree"]["rows"][0]["name"], "Work");

    let dup = call(&app, "folder.create", json!({"name": "Work"}));
    assert_eq!(dup["notice"]["level"], "error");
    assert_eq!(dup["rerendered"], false);

    call(&app, "folder.add_current", json!({"folder": "Work"}));
    call(&app, "folder.rename", json!({"name": "Work", "new_name": "Projects"}));
    let pinned = call(
        &app,
        "folder.toggle_chat_pin",
        json!({"folder": "Projects", "name": "https://x/1", "href": "https://x/1"}),
    );
    let chat = &pinned["tree"]["rows"][0]["body"]["chats"][0];
    assert_eq!(chat["pinned"], true);
    assert_eq!(chat["active"], true);

    let doc = call(&app, "document.get", json!({}));
    assert_eq!(doc["folders"][0]["name"], "Projects");
    assert_eq!(doc["folders"][0]["chats"][0]["pinned"], true);

    call(&app, "folder.delete", json!({"name": "Projects"}));
    let doc = call(&app, "document.get", json!({}));
    assert_eq!(doc["folders"], json!([]));
}

#[test]
fn test_bookmark_and_title_sync() {
    let (app, _dir) = setup();
    call(&app, "host.ready", json!({"anchor_present": true, "location": "https://x/1"}));
    call(&app, "bookmark.add", json!({"name": "Draft", "href": "https://x/1"}));

    let renamed = call(
        &app,
        "host.title_changed",
        json!({"title": "Final - ChatGPT", "location": "https://x/1"}),
    );
    assert_eq!(renamed["rerendered"], true);
    let doc = call(&app, "document.get", json!({}));
    assert_eq!(doc["bookmarks"][0]["name"], "Final");

    let quiet = call(
        &app,
        "host.title_changed",
        json!({"title": "Final - ChatGPT", "location": "https://x/1"}),
    );
    assert_eq!(quiet["rerendered"], false);
    assert!(quiet["notice"].is_null());
}

#[test]
fn test_export_and_import() {
    let (app, _dir) = setup();
    call(&app, "folder.create", json!({"name": "Work"}));
    let exported = call(&app, "document.export", json!({}));
    assert_eq!(exported["mime_type"], "application/json");
    assert!(exported["file_name"].as_str().unwrap().starts_with("chat-folders-"));
    assert!(!exported["base64"].as_str().unwrap().is_empty());

    let (other, _dir2) = setup();
    let imported = call(
        &other,
        "document.import",
        json!({"contents": exported["contents"].clone()}),
    );
    assert_eq!(imported["notice"]["level"], "info");
    let doc = call(&other, "document.get", json!({}));
    assert_eq!(doc["folders"][0]["name"], "Work");
}

#[test]
fn test_settings_get_and_set() {
    let (app, _dir) = setup();
    let settings = call(&app, "settings.get", json!({}));
    assert_eq!(settings["storage"]["storage_key"], "chatFolders");

    let ok = call(&app, "settings.set", json!({"key": "ui.title", "value": "Chats"}));
    assert_eq!(ok, json!({"ok": true}));
    assert_eq!(call(&app, "settings.get", json!({}))["ui"]["title"], "Chats");

    assert!(handle_method(&app, "settings.set", &json!({"key": "ui.title"})).is_err());
    assert!(handle_method(&app, "settings.set", &json!({"key": "nope", "value": 1})).is_err());
}
