//! HTML projection of the sidebar tree, injected into the host page.
//!
//! All user text is escaped. Controls carry `data-action` plus the
//! `data-folder` / `data-name` / `data-href` attributes the sidebar script
//! sends back over IPC to identify the target.

use crate::types::ui::{ChatNode, FolderBody, FolderNode, HeaderNode, MenuEntry, UiAction, UiNode, UiTree};

/// Escapes text for use in element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Only http(s) and same-site paths become clickable links.
fn safe_link(href: &str) -> &str {
    let lower = href.trim_start().to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") || (lower.starts_with('/') && !lower.starts_with("//")) {
        href
    } else {
        "#"
    }
}

fn action_label(action: UiAction, pinned: bool) -> (&'static str, &'static str) {
    match action {
        UiAction::CreateFolder => ("+", "New folder"),
        UiAction::BookmarkCurrent => ("\u{2605}", "Bookmark this chat"),
        UiAction::OpenMenu => ("\u{22ef}", "Options"),
        UiAction::AddCurrent => ("+", "Add this chat"),
        UiAction::TogglePin if pinned => ("\u{1f4cc}", "Unpin"),
        UiAction::TogglePin => ("\u{1f4cd}", "Pin"),
        UiAction::Rename => ("\u{270e}", "Rename"),
        UiAction::Delete => ("\u{2715}", "Delete"),
        UiAction::ToggleExpanded => ("", ""),
    }
}

fn push_button(out: &mut String, action: UiAction, pinned: bool) {
    let (glyph, title) = action_label(action, pinned);
    out.push_str(&format!(
        "<button class=\"cf-btn\" data-action=\"{}\" title=\"{}\">{}</button>",
        action.as_str(),
        title,
        glyph
    ));
}

/// Renders the whole tree. Same tree in, same string out.
pub fn render_html(tree: &UiTree) -> String {
    let mut out = String::with_capacity(256 + tree.rows.len() * 256);
    out.push_str("<div class=\"cf-sidebar\">");
    render_header(&mut out, &tree.header);
    out.push_str("<div class=\"cf-list\">");
    for row in &tree.rows {
        match row {
            UiNode::Folder(folder) => render_folder(&mut out, folder),
            UiNode::Separator { label } => {
                out.push_str(&format!("<div class=\"cf-separator\">{}</div>", escape_html(label)));
            }
            UiNode::Chat(chat) => render_chat(&mut out, chat),
        }
    }
    out.push_str("</div></div>");
    out
}

fn render_header(out: &mut String, header: &HeaderNode) {
    out.push_str("<div class=\"cf-header\">");
    out.push_str(&format!("<span class=\"cf-title\">{}</span>", escape_html(&header.title)));
    for action in &header.actions {
        push_button(out, *action, false);
    }
    out.push_str("<div class=\"cf-menu\" hidden>");
    for entry in &header.menu {
        match entry {
            MenuEntry::Import => out.push_str("<button class=\"cf-menu-item\" data-action=\"import\">Import</button>"),
            MenuEntry::Export => out.push_str("<button class=\"cf-menu-item\" data-action=\"export\">Export</button>"),
            MenuEntry::Link { label, url } => out.push_str(&format!(
                "<a class=\"cf-menu-item\" href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
                escape_html(safe_link(url)),
                escape_html(label)
            )),
        }
    }
    out.push_str("</div></div>");
}

fn render_folder(out: &mut String, folder: &FolderNode) {
    let name = escape_html(&folder.name);
    let mut class = String::from("cf-folder");
    if folder.pinned {
        class.push_str(" cf-pinned");
    }
    if folder.expanded {
        class.push_str(" cf-expanded");
    }
    out.push_str(&format!("<div class=\"{}\" data-folder=\"{}\">", class, name));
    out.push_str(&format!(
        "<div class=\"cf-folder-row\" data-action=\"toggle_expanded\"><span class=\"cf-caret\">{}</span><span class=\"cf-name\">{}</span><span class=\"cf-count\">{}</span>",
        if folder.expanded { "\u{25be}" } else { "\u{25b8}" },
        name,
        folder.chat_count
    ));
    for action in folder.actions.iter().filter(|a| !matches!(a, UiAction::ToggleExpanded)) {
        push_button(out, *action, folder.pinned);
    }
    out.push_str("</div>");

    match &folder.body {
        Some(FolderBody::Empty { label }) => {
            out.push_str(&format!(
                "<div class=\"cf-folder-body\"><div class=\"cf-empty\">{}</div></div>",
                escape_html(label)
            ));
        }
        Some(FolderBody::Chats { chats }) => {
            out.push_str("<div class=\"cf-folder-body\">");
            for chat in chats {
                render_chat(out, chat);
            }
            out.push_str("</div>");
        }
        None => {}
    }
    out.push_str("</div>");
}

fn render_chat(out: &mut String, chat: &ChatNode) {
    let mut class = String::from("cf-chat");
    if chat.pinned {
        class.push_str(" cf-pinned");
    }
    if chat.active {
        class.push_str(" cf-active");
    }
    out.push_str(&format!("<div class=\"{}\"", class));
    if let Some(folder) = &chat.folder {
        out.push_str(&format!(" data-folder=\"{}\"", escape_html(folder)));
    }
    out.push_str(&format!(
        " data-name=\"{}\" data-href=\"{}\"><a class=\"cf-link\" href=\"{}\">{}</a>",
        escape_html(&chat.name),
        escape_html(&chat.href),
        escape_html(safe_link(&chat.href)),
        escape_html(&chat.name)
    ));
    for action in &chat.actions {
        push_button(out, *action, chat.pinned);
    }
    out.push_str("</div>");
}
