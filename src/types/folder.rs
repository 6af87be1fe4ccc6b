use serde::{Deserialize, Serialize};

use super::chat::Chat;
use super::item::{Item, ItemName, PinState};

/// A user-created folder of chats. Folder names are unique per document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub name: ItemName,
    #[serde(flatten)]
    pub pin: PinState,
    pub creation_index: i64,
    pub chats: Vec<Chat>,
}

impl Folder {
    pub fn new(name: ItemName, creation_index: i64) -> Self {
        Self {
            name,
            pin: PinState::default(),
            creation_index,
            chats: Vec::new(),
        }
    }
}

impl Item for Folder {
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
