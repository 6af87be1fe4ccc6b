//! RPC method handler for the ChatFolders JSON-RPC protocol.
//!
//! Shared by the stdio server (`chatfolders-rpc`) and the webview IPC
//! bridge. `handle_method` dispatches one call to the matching `App`
//! action; mutating calls answer with the notice (if any) and the freshly
//! rendered sidebar.

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::{ActionResult, App};

fn str_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("missing {}", key))
}

/// Sidebar view returned by every mutating method.
fn view(app: &App, result: ActionResult) -> Value {
    json!({
        "notice": result.notice,
        "rerendered": result.rerendered,
        "tree": app.tree(),
        "html": app.html(),
    })
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` for protocol errors
/// (unknown method, missing parameter). Domain failures are not errors
/// here: they come back as a `notice` in the view.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    let mut a = app.lock().map_err(|e| e.to_string())?;
    let result = match method {
        "ping" => return Ok(json!({"pong": true})),

        // ─── Host page ───
        "host.ready" => {
            let present = params.get("anchor_present").and_then(Value::as_bool).unwrap_or(false);
            let location = params.get("location").and_then(Value::as_str);
            let title = params.get("title").and_then(Value::as_str);
            let page = params.get("page").and_then(Value::as_str);
            let Some(mut result) = a.host_ready(present, location, page) else {
                return Ok(json!({"injected": false}));
            };
            if let (Some(title), Some(location)) = (title, location) {
                result = result.merge(a.title_changed(title, location));
            }
            let mut v = view(&a, result);
            v["injected"] = json!(true);
            return Ok(v);
        }
        "host.title_changed" => {
            let title = str_param(params, "title")?;
            let location = str_param(params, "location")?;
            a.title_changed(title, location)
        }
        "render" => {
            a.ensure_loaded();
            a.render();
            ActionResult { notice: None, rerendered: true }
        }

        // ─── Folders ───
        "folder.create" => a.create_folder(str_param(params, "name")?),
        "folder.rename" => {
            a.rename_folder(str_param(params, "name")?, str_param(params, "new_name")?)
        }
        "folder.delete" => a.delete_folder(str_param(params, "name")?),
        "folder.toggle_pin" => a.toggle_folder_pin(str_param(params, "name")?),
        "folder.toggle_expanded" => a.toggle_folder_expanded(str_param(params, "name")?),
        "folder.add_chat" => a.add_chat_to_folder(
            str_param(params, "folder")?,
            str_param(params, "name")?,
            str_param(params, "href")?,
        ),
        "folder.add_current" => a.add_current_to_folder(str_param(params, "folder")?),
        "folder.remove_chat" => a.remove_chat_from_folder(
            str_param(params, "folder")?,
            str_param(params, "name")?,
            str_param(params, "href")?,
        ),
        "folder.rename_chat" => a.rename_chat_in_folder(
            str_param(params, "folder")?,
            str_param(params, "name")?,
            str_param(params, "href")?,
            str_param(params, "new_name")?,
        ),
        "folder.toggle_chat_pin" => a.toggle_chat_pin_in_folder(
            str_param(params, "folder")?,
            str_param(params, "name")?,
            str_param(params, "href")?,
        ),

        // ─── Bookmarks ───
        "bookmark.add" => a.add_bookmark(str_param(params, "name")?, str_param(params, "href")?),
        "bookmark.add_current" => a.bookmark_current(),
        "bookmark.remove" => {
            a.remove_bookmark(str_param(params, "name")?, str_param(params, "href")?)
        }
        "bookmark.rename" => a.rename_bookmark(
            str_param(params, "name")?,
            str_param(params, "href")?,
            str_param(params, "new_name")?,
        ),
        "bookmark.toggle_pin" => {
            a.toggle_bookmark_pin(str_param(params, "name")?, str_param(params, "href")?)
        }

        // ─── Document ───
        "document.export" => {
            return match a.export_document() {
                Ok(file) => Ok(json!({
                    "file_name": file.file_name,
                    "mime_type": file.mime_type,
                    "contents": file.contents,
                    "base64": file.contents_base64(),
                })),
                Err(notice) => Ok(json!({"notice": notice})),
            };
        }
        "document.import" => a.import_document(str_param(params, "contents")?),
        "document.get" => {
            a.ensure_loaded();
            return serde_json::to_value(a.document()).map_err(|e| e.to_string());
        }

        // ─── Settings ───
        "settings.get" => {
            return serde_json::to_value(a.settings()).map_err(|e| e.to_string());
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            a.set_setting(key, value).map_err(|e| e.to_string())?;
            return Ok(json!({"ok": true}));
        }

        _ => return Err(format!("unknown method: {}", method)),
    };
    Ok(view(&a, result))
}
