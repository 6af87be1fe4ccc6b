//! The persisted aggregate: every folder plus the root bookmark list.
//!
//! Documents written by older versions may lack the pin and ordering fields.
//! [`migrate_value`] fills them in on the raw JSON before typed decoding.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::chat::Chat;
use super::folder::Folder;

/// Root aggregate, loaded and saved wholesale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub folders: Vec<Folder>,
    pub bookmarks: Vec<Chat>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn folder(&self, name: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.name == name)
    }

    pub fn folder_mut(&mut self, name: &str) -> Option<&mut Folder> {
        self.folders.iter_mut().find(|f| f.name == name)
    }

    pub fn has_folder(&self, name: &str) -> bool {
        self.folder(name).is_some()
    }

    /// Total number of chat records across folders and bookmarks.
    pub fn chat_count(&self) -> usize {
        self.folders.iter().map(|f| f.chats.len()).sum::<usize>() + self.bookmarks.len()
    }

    /// Checks folder-name uniqueness and per-collection chat identity
    /// uniqueness. Returns a description of the first violation.
    pub fn check_unique(&self) -> Result<(), String> {
        let mut names = HashSet::new();
        for folder in &self.folders {
            if !names.insert(folder.name.as_str()) {
                return Err(format!("folder \"{}\" appears more than once", folder.name));
            }
            check_chats_unique(&folder.chats)
                .map_err(|e| format!("{} in folder \"{}\"", e, folder.name))?;
        }
        check_chats_unique(&self.bookmarks).map_err(|e| format!("{} in bookmarks", e))
    }
}

fn check_chats_unique(chats: &[Chat]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for chat in chats {
        if !seen.insert((chat.name.as_str(), chat.href.as_str())) {
            return Err(format!("chat \"{}\" ({}) appears more than once", chat.name, chat.href));
        }
    }
    Ok(())
}

/// Fills missing `pinned`, `pinnedAt`, `creationIndex` and `chats` fields in
/// place. Missing creation indexes are assigned `now`, `now + 1`, ... in
/// storage order so the existing order survives.
///
/// Returns true if anything was added. Values of the wrong type are left for
/// the typed decoder to reject.
pub fn migrate_value(value: &mut Value, now: i64) -> bool {
    let mut next_index = now;
    let mut changed = false;

    let Some(root) = value.as_object_mut() else {
        return false;
    };

    if let Some(Value::Array(folders)) = root.get_mut("folders") {
        for folder in folders.iter_mut() {
            let Some(obj) = folder.as_object_mut() else {
                continue;
            };
            changed |= migrate_item(obj, &mut next_index);
            if !obj.contains_key("chats") {
                obj.insert("chats".to_string(), Value::Array(Vec::new()));
                changed = true;
            }
            if let Some(Value::Array(chats)) = obj.get_mut("chats") {
                changed |= migrate_items(chats, &mut next_index);
            }
        }
    }

    if let Some(Value::Array(bookmarks)) = root.get_mut("bookmarks") {
        changed |= migrate_items(bookmarks, &mut next_index);
    }

    changed
}

/// Inserts empty `folders` / `bookmarks` arrays when either key is absent.
/// Only applied to stored documents; imports must carry both.
pub fn fill_missing_collections(value: &mut Value) -> bool {
    let Some(root) = value.as_object_mut() else {
        return false;
    };
    let mut changed = false;
    for key in ["folders", "bookmarks"] {
        if !root.contains_key(key) {
            root.insert(key.to_string(), Value::Array(Vec::new()));
            changed = true;
        }
    }
    changed
}

fn migrate_items(items: &mut [Value], next_index: &mut i64) -> bool {
    let mut changed = false;
    for item in items.iter_mut() {
        if let Some(obj) = item.as_object_mut() {
            changed |= migrate_item(obj, next_index);
        }
    }
    changed
}

fn migrate_item(obj: &mut Map<String, Value>, next_index: &mut i64) -> bool {
    let mut changed = false;
    if !obj.contains_key("pinned") {
        obj.insert("pinned".to_string(), Value::Bool(false));
        changed = true;
    }
    if !obj.contains_key("pinnedAt") {
        obj.insert("pinnedAt".to_string(), Value::Null);
        changed = true;
    }
    if !obj.contains_key("creationIndex") {
        obj.insert("creationIndex".to_string(), Value::from(*next_index));
        *next_index += 1;
        changed = true;
    }
    changed
}
