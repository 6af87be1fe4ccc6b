use serde::{Deserialize, Serialize};

/// Top-level settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExtensionSettings {
    pub host: HostSettings,
    pub storage: StorageSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

/// How the host chat page is found and how its titles are read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostSettings {
    /// Page opened in the webview window.
    pub chat_url: String,
    /// CSS selector of the element the sidebar is injected next to.
    pub anchor_selector: String,
    /// Suffixes stripped from document titles before they are used as chat names.
    pub title_suffixes: Vec<String>,
    /// Titles the host shows before a conversation is named; never used as names.
    pub ignored_titles: Vec<String>,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            chat_url: "https://chatgpt.com/".to_string(),
            anchor_selector: "nav".to_string(),
            title_suffixes: vec![" - ChatGPT".to_string(), " | ChatGPT".to_string()],
            ignored_titles: vec!["ChatGPT".to_string(), "New chat".to_string()],
        }
    }
}

/// Where the document is kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    pub storage_key: String,
    /// Overrides the default database location in the platform data dir.
    pub database_path: Option<String>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            storage_key: "chatFolders".to_string(),
            database_path: None,
        }
    }
}

/// Labels and menu contents of the injected sidebar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiSettings {
    pub title: String,
    pub empty_label: String,
    pub bookmarks_label: String,
    pub external_links: Vec<ExternalLink>,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            title: "Folders & Bookmarks".to_string(),
            empty_label: "(empty)".to_string(),
            bookmarks_label: "Bookmarks".to_string(),
            external_links: vec![ExternalLink {
                label: "Report an issue".to_string(),
                url: "https://github.com/chatfolders/chatfolders/issues".to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExternalLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
