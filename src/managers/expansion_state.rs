//! Which folders are open in the sidebar. Lives for the page session only.

use std::collections::HashMap;

/// Folder name → expanded. Folders without an entry are collapsed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExpansionState {
    entries: HashMap<String, bool>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, name: &str) -> bool {
        self.entries.get(name).copied().unwrap_or(false)
    }

    /// Raw entry; `None` if the folder was never toggled.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.entries.get(name).copied()
    }

    pub fn set_expanded(&mut self, name: &str, expanded: bool) {
        self.entries.insert(name.to_string(), expanded);
    }

    /// Flips the folder and returns its new state.
    pub fn toggle(&mut self, name: &str) -> bool {
        let expanded = !self.is_expanded(name);
        self.set_expanded(name, expanded);
        expanded
    }

    /// Moves the entry for `old` to `new`. The old key is gone afterwards.
    pub fn rename(&mut self, old: &str, new: &str) {
        if old == new {
            return;
        }
        match self.entries.remove(old) {
            Some(expanded) => {
                self.entries.insert(new.to_string(), expanded);
            }
            None => {
                self.entries.remove(new);
            }
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.entries.remove(name);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
