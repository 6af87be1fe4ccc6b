//! Library Manager for ChatFolders.
//!
//! Implements `LibraryManagerTrait`: folder and chat mutations on the
//! in-memory [`Document`]. Persistence and re-rendering happen in the
//! caller (`App`) after each successful mutation.

use tracing::debug;

use crate::managers::clock::Clock;
use crate::types::chat::Chat;
use crate::types::document::Document;
use crate::types::errors::LibraryError;
use crate::types::folder::Folder;
use crate::types::item::{Item, ItemName};

/// Outcome of adding a chat to a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The (name, href) pair was already in the collection. Nothing changed.
    AlreadyPresent,
}

/// Trait defining folder and bookmark operations.
pub trait LibraryManagerTrait {
    fn create_folder(&mut self, name: &str) -> Result<ItemName, LibraryError>;
    fn rename_folder(&mut self, old_name: &str, new_name: &str) -> Result<ItemName, LibraryError>;
    fn delete_folder(&mut self, name: &str) -> Result<Folder, LibraryError>;
    fn toggle_folder_pin(&mut self, name: &str) -> Result<bool, LibraryError>;

    fn add_chat_to_folder(&mut self, folder: &str, chat_name: &str, href: &str) -> Result<AddOutcome, LibraryError>;
    fn remove_chat_from_folder(&mut self, folder: &str, chat_name: &str, href: &str) -> Result<(), LibraryError>;
    fn rename_chat_in_folder(&mut self, folder: &str, chat_name: &str, href: &str, new_name: &str) -> Result<(), LibraryError>;
    fn toggle_chat_pin_in_folder(&mut self, folder: &str, chat_name: &str, href: &str) -> Result<bool, LibraryError>;

    fn add_bookmark(&mut self, chat_name: &str, href: &str) -> Result<AddOutcome, LibraryError>;
    fn remove_bookmark(&mut self, chat_name: &str, href: &str) -> Result<(), LibraryError>;
    fn rename_bookmark(&mut self, chat_name: &str, href: &str, new_name: &str) -> Result<(), LibraryError>;
    fn toggle_bookmark_pin(&mut self, chat_name: &str, href: &str) -> Result<bool, LibraryError>;

    /// Renames every chat with `href`, in all folders and the bookmarks.
    /// Returns whether anything changed.
    fn rename_chats_by_href(&mut self, href: &str, new_name: &str) -> bool;
}

/// Owns the document and the time source used to stamp new items.
pub struct Library {
    document: Document,
    clock: Box<dyn Clock>,
}

impl Library {
    pub fn new(document: Document, clock: Box<dyn Clock>) -> Self {
        Self { document, clock }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Replaces the whole document, e.g. after an import.
    pub fn replace_document(&mut self, document: Document) {
        self.document = document;
    }

    pub fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    fn folder_mut(&mut self, name: &str) -> Result<&mut Folder, LibraryError> {
        self.document
            .folder_mut(name)
            .ok_or_else(|| LibraryError::FolderNotFound(name.to_string()))
    }

    /// The chat list for a folder, or the root bookmarks when `folder` is `None`.
    fn chats_mut(&mut self, folder: Option<&str>) -> Result<&mut Vec<Chat>, LibraryError> {
        match folder {
            Some(name) => Ok(&mut self.folder_mut(name)?.chats),
            None => Ok(&mut self.document.bookmarks),
        }
    }

    fn add_chat(&mut self, folder: Option<&str>, chat_name: &str, href: &str) -> Result<AddOutcome, LibraryError> {
        let name = ItemName::new(chat_name)?;
        let now = self.now();
        let chats = self.chats_mut(folder)?;
        if chats.iter().any(|c| c.matches(name.as_str(), href)) {
            return Ok(AddOutcome::AlreadyPresent);
        }
        chats.push(Chat::new(name, href, now));
        debug!(folder = ?folder, href, "chat added");
        Ok(AddOutcome::Added)
    }

    fn remove_chat(&mut self, folder: Option<&str>, chat_name: &str, href: &str) -> Result<(), LibraryError> {
        let chats = self.chats_mut(folder)?;
        let index = find_chat(chats, chat_name, href)?;
        chats.remove(index);
        Ok(())
    }

    fn rename_chat(&mut self, folder: Option<&str>, chat_name: &str, href: &str, new_name: &str) -> Result<(), LibraryError> {
        let new_name = ItemName::new(new_name)?;
        let chats = self.chats_mut(folder)?;
        let index = find_chat(chats, chat_name, href)?;
        if chats[index].name == new_name {
            return Ok(());
        }
        if chats.iter().any(|c| c.matches(new_name.as_str(), href)) {
            return Err(LibraryError::DuplicateChat {
                name: new_name.to_string(),
                href: href.to_string(),
            });
        }
        chats[index].name = new_name;
        Ok(())
    }

    fn toggle_chat_pin(&mut self, folder: Option<&str>, chat_name: &str, href: &str) -> Result<bool, LibraryError> {
        let now = self.now();
        let chats = self.chats_mut(folder)?;
        let index = find_chat(chats, chat_name, href)?;
        chats[index].toggle_pin(now);
        Ok(chats[index].is_pinned())
    }
}

fn find_chat(chats: &[Chat], name: &str, href: &str) -> Result<usize, LibraryError> {
    chats
        .iter()
        .position(|c| c.matches(name, href))
        .ok_or_else(|| LibraryError::ChatNotFound {
            name: name.to_string(),
            href: href.to_string(),
        })
}

/// Renames chats with `href` and drops copies that now collide, keeping the
/// earliest-created one.
fn rename_in_collection(chats: &mut Vec<Chat>, href: &str, new_name: &ItemName) -> bool {
    let mut changed = false;
    for chat in chats.iter_mut().filter(|c| c.href == href) {
        if chat.name != *new_name {
            chat.name = new_name.clone();
            changed = true;
        }
    }
    if !changed {
        return false;
    }

    let keep = chats
        .iter()
        .enumerate()
        .filter(|(_, c)| c.matches(new_name.as_str(), href))
        .min_by_key(|(_, c)| c.creation_index)
        .map(|(i, _)| i);
    let mut index = 0;
    chats.retain(|c| {
        let retain = !c.matches(new_name.as_str(), href) || Some(index) == keep;
        index += 1;
        retain
    });
    true
}

impl LibraryManagerTrait for Library {
    /// Appends a new, empty, unpinned folder.
    fn create_folder(&mut self, name: &str) -> Result<ItemName, LibraryError> {
        let name = ItemName::new(name)?;
        if self.document.has_folder(name.as_str()) {
            return Err(LibraryError::DuplicateName(name.to_string()));
        }
        let folder = Folder::new(name.clone(), self.now());
        self.document.folders.push(folder);
        debug!(folder = %name, "folder created");
        Ok(name)
    }

    /// Renames in place. Renaming to the current name is a no-op.
    fn rename_folder(&mut self, old_name: &str, new_name: &str) -> Result<ItemName, LibraryError> {
        let new_name = ItemName::new(new_name)?;
        if !self.document.has_folder(old_name) {
            return Err(LibraryError::FolderNotFound(old_name.to_string()));
        }
        if new_name == old_name {
            return Ok(new_name);
        }
        if self.document.has_folder(new_name.as_str()) {
            return Err(LibraryError::DuplicateName(new_name.to_string()));
        }
        self.folder_mut(old_name)?.name = new_name.clone();
        debug!(from = old_name, to = %new_name, "folder renamed");
        Ok(new_name)
    }

    /// Removes the folder together with every chat it holds.
    fn delete_folder(&mut self, name: &str) -> Result<Folder, LibraryError> {
        let index = self
            .document
            .folders
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| LibraryError::FolderNotFound(name.to_string()))?;
        Ok(self.document.folders.remove(index))
    }

    fn toggle_folder_pin(&mut self, name: &str) -> Result<bool, LibraryError> {
        let now = self.now();
        let folder = self.folder_mut(name)?;
        folder.toggle_pin(now);
        Ok(folder.is_pinned())
    }

    fn add_chat_to_folder(&mut self, folder: &str, chat_name: &str, href: &str) -> Result<AddOutcome, LibraryError> {
        self.add_chat(Some(folder), chat_name, href)
    }

    fn remove_chat_from_folder(&mut self, folder: &str, chat_name: &str, href: &str) -> Result<(), LibraryError> {
        self.remove_chat(Some(folder), chat_name, href)
    }

    fn rename_chat_in_folder(&mut self, folder: &str, chat_name: &str, href: &str, new_name: &str) -> Result<(), LibraryError> {
        self.rename_chat(Some(folder), chat_name, href, new_name)
    }

    fn toggle_chat_pin_in_folder(&mut self, folder: &str, chat_name: &str, href: &str) -> Result<bool, LibraryError> {
        self.toggle_chat_pin(Some(folder), chat_name, href)
    }

    fn add_bookmark(&mut self, chat_name: &str, href: &str) -> Result<AddOutcome, LibraryError> {
        self.add_chat(None, chat_name, href)
    }

    fn remove_bookmark(&mut self, chat_name: &str, href: &str) -> Result<(), LibraryError> {
        self.remove_chat(None, chat_name, href)
    }

    fn rename_bookmark(&mut self, chat_name: &str, href: &str, new_name: &str) -> Result<(), LibraryError> {
        self.rename_chat(None, chat_name, href, new_name)
    }

    fn toggle_bookmark_pin(&mut self, chat_name: &str, href: &str) -> Result<bool, LibraryError> {
        self.toggle_chat_pin(None, chat_name, href)
    }

    fn rename_chats_by_href(&mut self, href: &str, new_name: &str) -> bool {
        let Ok(new_name) = ItemName::new(new_name) else {
            return false;
        };
        let mut changed = false;
        for folder in self.document.folders.iter_mut() {
            changed |= rename_in_collection(&mut folder.chats, href, &new_name);
        }
        changed |= rename_in_collection(&mut self.document.bookmarks, href, &new_name);
        if changed {
            debug!(href, name = %new_name, "chats renamed from host title");
        }
        changed
    }
}
