//! Host page watcher.
//!
//! Turns raw observations from the page (anchor element present, document
//! title changed) into the two signals the core consumes: a "ready" that
//! fires once per page load and deduplicated title changes.

use crate::types::item::sanitize_name;
use crate::types::settings::HostSettings;

/// A host title change that should rename stored chats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleChange {
    pub href: String,
    pub name: String,
}

pub struct HostWatcher {
    title_suffixes: Vec<String>,
    ignored_titles: Vec<String>,
    injected: bool,
    page: Option<String>,
    location: Option<String>,
    title: Option<String>,
    last_change: Option<(String, String)>,
}

impl HostWatcher {
    pub fn new(settings: &HostSettings) -> Self {
        Self {
            title_suffixes: settings.title_suffixes.clone(),
            ignored_titles: settings.ignored_titles.clone(),
            injected: false,
            page: None,
            location: None,
            title: None,
            last_change: None,
        }
    }

    /// Applies changed host settings. Injection state and the last seen page
    /// are kept.
    pub fn configure(&mut self, settings: &HostSettings) {
        self.title_suffixes = settings.title_suffixes.clone();
        self.ignored_titles = settings.ignored_titles.clone();
    }

    /// Records the token of the document the sidebar script runs in. A new
    /// token means the page was reloaded or fully navigated: the watcher is
    /// re-armed and true is returned.
    pub fn observe_page(&mut self, page: &str) -> bool {
        if self.page.as_deref() == Some(page) {
            return false;
        }
        let reloaded = self.page.is_some();
        self.page = Some(page.to_string());
        self.injected = false;
        self.title = None;
        self.last_change = None;
        reloaded
    }

    /// Returns true once per page: the first time the anchor is reported present.
    pub fn observe_anchor(&mut self, present: bool) -> bool {
        if !present || self.injected {
            return false;
        }
        self.injected = true;
        true
    }

    pub fn is_injected(&self) -> bool {
        self.injected
    }

    /// Records the page location without a title, e.g. on an SPA navigation.
    pub fn observe_location(&mut self, location: &str) {
        if self.location.as_deref() != Some(location) {
            self.location = Some(location.to_string());
            self.title = None;
        }
    }

    /// Records a title and returns the rename it implies, if any.
    ///
    /// Empty and placeholder titles are ignored, as are repeats of the last
    /// reported (title, location) pair.
    pub fn observe_title(&mut self, title: &str, location: &str) -> Option<TitleChange> {
        self.observe_location(location);
        let name = self.normalize_title(title);
        self.title = (!name.is_empty()).then(|| name.clone());

        if name.is_empty() || self.is_placeholder(&name) {
            return None;
        }
        let key = (name.clone(), location.to_string());
        if self.last_change.as_ref() == Some(&key) {
            return None;
        }
        self.last_change = Some(key);
        Some(TitleChange {
            href: location.to_string(),
            name,
        })
    }

    pub fn current_location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Best name for the current page: its title, or the location when the
    /// title is missing or a placeholder.
    pub fn current_page_name(&self) -> Option<String> {
        let location = self.location.as_deref()?;
        match self.title.as_deref() {
            Some(title) if !self.is_placeholder(title) => Some(title.to_string()),
            _ => Some(location.to_string()),
        }
    }

    fn normalize_title(&self, title: &str) -> String {
        let mut name = sanitize_name(title);
        for suffix in &self.title_suffixes {
            let suffix = suffix.trim();
            if !suffix.is_empty() && name.ends_with(suffix) {
                name.truncate(name.len() - suffix.len());
                name = name.trim_end_matches(|c: char| c.is_whitespace() || c == '-' || c == '|').to_string();
                break;
            }
        }
        name
    }

    fn is_placeholder(&self, name: &str) -> bool {
        self.ignored_titles.iter().any(|t| t == name)
    }
}
