use serde::{Deserialize, Serialize};

use super::item::{Item, ItemName, PinState};

/// A saved conversation, either inside a folder or bookmarked at root level.
///
/// Identity is the (`name`, `href`) pair. Copies in different collections are
/// independent values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub name: ItemName,
    pub href: String,
    #[serde(flatten)]
    pub pin: PinState,
    pub creation_index: i64,
}

impl Chat {
    pub fn new(name: ItemName, href: &str, creation_index: i64) -> Self {
        Self {
            name,
            href: href.to_string(),
            pin: PinState::default(),
            creation_index,
        }
    }

    /// Whether this chat has the given identity.
    pub fn matches(&self, name: &str, href: &str) -> bool {
        self.name == name && self.href == href
    }
}

impl Item for Chat {
    fn name(&self) -> &ItemName {
        &self.name
    }

    fn pin(&self) -> &PinState {
        &self.pin
    }

    fn pin_mut(&mut self) -> &mut PinState {
        &mut self.pin
    }

    fn creation_index(&self) -> i64 {
        self.creation_index
    }
}
