//! Property tests for display ordering of folders and chats.

use chatfolders::types::chat::Chat;
use chatfolders::types::item::{sort_items, Item, ItemName, PinState};
use proptest::prelude::*;

fn arb_chat() -> impl Strategy<Value = Chat> {
    (0i64..50, prop::option::of(0i64..50), "[a-z]{1,6}").prop_map(|(ci, pinned_at, name)| {
        let mut chat = Chat::new(ItemName::new(&name).unwrap(), "https://x/1", ci);
        if let Some(at) = pinned_at {
            chat.pin = PinState {
                pinned: true,
                pinned_at: Some(at),
            };
        }
        chat
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Every pinned item precedes every unpinned item.
    #[test]
    fn prop_pinned_first(chats in prop::collection::vec(arb_chat(), 0..20)) {
        let sorted = sort_items(&chats);
        let first_unpinned = sorted.iter().position(|c| !c.is_pinned()).unwrap_or(sorted.len());
        prop_assert!(sorted[first_unpinned..].iter().all(|c| !c.is_pinned()));
    }

    /// Within each group the key ascends: pin time for pinned, creation for unpinned.
    #[test]
    fn prop_groups_ascending(chats in prop::collection::vec(arb_chat(), 0..20)) {
        let sorted = sort_items(&chats);
        for pair in sorted.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.is_pinned() && b.is_pinned() {
                prop_assert!(a.pin.pinned_at <= b.pin.pinned_at);
            }
            if !a.is_pinned() && !b.is_pinned() {
                prop_assert!(a.creation_index <= b.creation_index);
            }
        }
    }

    /// Sorting is a permutation and is stable for equal keys.
    #[test]
    fn prop_sort_is_stable_permutation(chats in prop::collection::vec(arb_chat(), 0..20)) {
        let sorted = sort_items(&chats);
        prop_assert_eq!(sorted.len(), chats.len());

        let position = |c: &Chat| chats.iter().position(|x| std::ptr::eq(x, c)).unwrap();
        for pair in sorted.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let same_key = a.is_pinned() == b.is_pinned()
                && if a.is_pinned() { a.pin.pinned_at == b.pin.pinned_at } else { a.creation_index == b.creation_index };
            if same_key {
                prop_assert!(position(a) < position(b));
            }
        }
    }

    /// Sorting already-sorted input changes nothing.
    #[test]
    fn prop_sort_idempotent(chats in prop::collection::vec(arb_chat(), 0..20)) {
        let once: Vec<Chat> = sort_items(&chats).into_iter().cloned().collect();
        let twice: Vec<Chat> = sort_items(&once).into_iter().cloned().collect();
        prop_assert_eq!(once, twice);
    }
}
