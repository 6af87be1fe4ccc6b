//! Shared shape of folders and chats: a sanitized name, pin state and a
//! creation index, plus the ordering used wherever a list of them is shown.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::errors::LibraryError;

/// A non-empty, sanitized plain-text name.
///
/// Control characters are removed, whitespace runs collapse to one space and
/// the result is trimmed. Construction fails if nothing is left.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ItemName {
    pub fn new(raw: &str) -> Result<Self, LibraryError> {
        let cleaned = sanitize_name(raw);
        if cleaned.is_empty() {
            return Err(LibraryError::InvalidInput(
                "name must not be empty".to_string(),
            ));
        }
        Ok(Self(cleaned))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemName {
    type Error = LibraryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ItemName::new(&value)
    }
}

impl From<ItemName> for String {
    fn from(name: ItemName) -> Self {
        name.0
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for ItemName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ItemName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Strips control characters and collapses whitespace.
pub fn sanitize_name(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pin state carried by every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinState {
    pub pinned: bool,
    pub pinned_at: Option<i64>,
}

impl PinState {
    /// Flips the pin. `pinned_at` is stamped on pin and cleared on unpin.
    pub fn toggle(&mut self, now: i64) {
        if self.pinned {
            self.pinned = false;
            self.pinned_at = None;
        } else {
            self.pinned = true;
            self.pinned_at = Some(now);
        }
    }
}

/// Capability shared by `Folder` and `Chat`.
pub trait Item {
    fn name(&self) -> &ItemName;
    fn pin(&self) -> &PinState;
    fn pin_mut(&mut self) -> &mut PinState;
    fn creation_index(&self) -> i64;

    fn is_pinned(&self) -> bool {
        self.pin().pinned
    }

    fn toggle_pin(&mut self, now: i64) {
        self.pin_mut().toggle(now);
    }
}

/// Display order: pinned first by ascending `pinned_at`, then unpinned by
/// ascending `creation_index`.
pub fn compare_items<T: Item>(a: &T, b: &T) -> Ordering {
    match (a.is_pinned(), b.is_pinned()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => a.pin().pinned_at.cmp(&b.pin().pinned_at),
        (false, false) => a.creation_index().cmp(&b.creation_index()),
    }
}

/// Returns the items in display order. The sort is stable, so ties keep
/// their storage order.
pub fn sort_items<T: Item>(items: &[T]) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| compare_items(*a, *b));
    sorted
}
