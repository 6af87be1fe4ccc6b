use serde::{Deserialize, Serialize};

/// The rendered sidebar: a header followed by rows in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiTree {
    pub header: HeaderNode,
    pub rows: Vec<UiNode>,
}

/// Header controls and the options menu entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderNode {
    pub title: String,
    pub actions: Vec<UiAction>,
    pub menu: Vec<MenuEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MenuEntry {
    Import,
    Export,
    Link { label: String, url: String },
}

/// One top-level row of the sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UiNode {
    Folder(FolderNode),
    Separator { label: String },
    Chat(ChatNode),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderNode {
    pub name: String,
    pub pinned: bool,
    pub expanded: bool,
    pub chat_count: usize,
    pub actions: Vec<UiAction>,
    /// Present only while the folder is expanded.
    pub body: Option<FolderBody>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FolderBody {
    Empty { label: String },
    Chats { chats: Vec<ChatNode> },
}

/// A chat row, inside a folder body or at root level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatNode {
    pub name: String,
    pub href: String,
    pub pinned: bool,
    /// True when `href` is the page currently open in the host.
    pub active: bool,
    /// Owning folder; `None` for root bookmarks.
    pub folder: Option<String>,
    pub actions: Vec<UiAction>,
}

/// Controls attached to a node. Each maps to one action handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiAction {
    CreateFolder,
    BookmarkCurrent,
    OpenMenu,
    ToggleExpanded,
    Rename,
    AddCurrent,
    TogglePin,
    Delete,
}

impl UiAction {
    /// Identifier used in the `data-action` attribute of rendered controls.
    pub fn as_str(&self) -> &'static str {
        match self {
            UiAction::CreateFolder => "create_folder",
            UiAction::BookmarkCurrent => "bookmark_current",
            UiAction::OpenMenu => "open_menu",
            UiAction::ToggleExpanded => "toggle_expanded",
            UiAction::Rename => "rename",
            UiAction::AddCurrent => "add_current",
            UiAction::TogglePin => "toggle_pin",
            UiAction::Delete => "delete",
        }
    }
}

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message shown to the user after an action, as a blocking dialog in the
/// host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}
