//! Render Engine for ChatFolders.
//!
//! Projects the document and the expansion state into a [`UiTree`]. There is
//! no diffing: every call rebuilds the whole tree from the model, so the
//! output depends only on the inputs.

use tracing::debug;

use crate::managers::expansion_state::ExpansionState;
use crate::types::chat::Chat;
use crate::types::document::Document;
use crate::types::folder::Folder;
use crate::types::item::{sort_items, Item};
use crate::types::settings::UiSettings;
use crate::types::ui::{
    ChatNode, FolderBody, FolderNode, HeaderNode, MenuEntry, UiAction, UiNode, UiTree,
};

/// Labels and page context a render needs besides the model.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub title: String,
    pub empty_label: String,
    pub bookmarks_label: String,
    pub links: Vec<(String, String)>,
    /// Location of the page open in the host; matching chat rows are marked active.
    pub current_href: Option<String>,
}

impl RenderOptions {
    pub fn from_settings(ui: &UiSettings, current_href: Option<&str>) -> Self {
        Self {
            title: ui.title.clone(),
            empty_label: ui.empty_label.clone(),
            bookmarks_label: ui.bookmarks_label.clone(),
            links: ui
                .external_links
                .iter()
                .map(|l| (l.label.clone(), l.url.clone()))
                .collect(),
            current_href: current_href.map(str::to_string),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_settings(&UiSettings::default(), None)
    }
}

const FOLDER_ACTIONS: [UiAction; 5] = [
    UiAction::ToggleExpanded,
    UiAction::Rename,
    UiAction::AddCurrent,
    UiAction::TogglePin,
    UiAction::Delete,
];

const CHAT_ACTIONS: [UiAction; 3] = [UiAction::TogglePin, UiAction::Rename, UiAction::Delete];

/// Rebuilds the full sidebar tree.
///
/// Folders come first in display order, each with its sorted chats (or the
/// empty placeholder) when expanded. The separator and root bookmarks follow
/// only when at least one bookmark exists.
pub fn render_all(document: &Document, expansion: &ExpansionState, options: &RenderOptions) -> UiTree {
    let mut rows = Vec::with_capacity(document.folders.len() + document.bookmarks.len() + 1);

    for folder in sort_items(&document.folders) {
        rows.push(UiNode::Folder(render_folder(folder, expansion, options)));
    }

    if !document.bookmarks.is_empty() {
        rows.push(UiNode::Separator {
            label: options.bookmarks_label.clone(),
        });
        for chat in sort_items(&document.bookmarks) {
            rows.push(UiNode::Chat(render_chat(chat, None, options)));
        }
    }

    debug!(rows = rows.len(), "sidebar rendered");
    UiTree {
        header: render_header(options),
        rows,
    }
}

fn render_header(options: &RenderOptions) -> HeaderNode {
    let mut menu = vec![MenuEntry::Import, MenuEntry::Export];
    menu.extend(options.links.iter().map(|(label, url)| MenuEntry::Link {
        label: label.clone(),
        url: url.clone(),
    }));
    HeaderNode {
        title: options.title.clone(),
        actions: vec![UiAction::CreateFolder, UiAction::BookmarkCurrent, UiAction::OpenMenu],
        menu,
    }
}

fn render_folder(folder: &Folder, expansion: &ExpansionState, options: &RenderOptions) -> FolderNode {
    let expanded = expansion.is_expanded(folder.name.as_str());
    let body = expanded.then(|| {
        if folder.chats.is_empty() {
            FolderBody::Empty {
                label: options.empty_label.clone(),
            }
        } else {
            FolderBody::Chats {
                chats: sort_items(&folder.chats)
                    .into_iter()
                    .map(|chat| render_chat(chat, Some(folder.name.as_str()), options))
                    .collect(),
            }
        }
    });

    FolderNode {
        name: folder.name.to_string(),
        pinned: folder.is_pinned(),
        expanded,
        chat_count: folder.chats.len(),
        actions: FOLDER_ACTIONS.to_vec(),
        body,
    }
}

fn render_chat(chat: &Chat, folder: Option<&str>, options: &RenderOptions) -> ChatNode {
    ChatNode {
        name: chat.name.to_string(),
        href: chat.href.clone(),
        pinned: chat.is_pinned(),
        active: options.current_href.as_deref() == Some(chat.href.as_str()),
        folder: folder.map(str::to_string),
        actions: CHAT_ACTIONS.to_vec(),
    }
}
