//! Property tests for folder operations on the library.

use std::collections::HashSet;

use chatfolders::managers::clock::TickingClock;
use chatfolders::managers::library_manager::{Library, LibraryManagerTrait};
use chatfolders::types::document::Document;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Create(u8),
    Rename(u8, u8),
    Delete(u8),
    TogglePin(u8),
    AddChat(u8, u8),
}

fn name(n: u8) -> String {
    format!("Folder {}", n % 6)
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::Create),
        (any::<u8>(), any::<u8>()).prop_map(|(a, b)| Op::Rename(a, b)),
        any::<u8>().prop_map(Op::Delete),
        any::<u8>().prop_map(Op::TogglePin),
        (any::<u8>(), any::<u8>()).prop_map(|(a, b)| Op::AddChat(a, b)),
    ]
}

fn apply(lib: &mut Library, op: &Op) {
    // Errors are expected for many sequences and leave the document unchanged.
    let _ = match op {
        Op::Create(n) => lib.create_folder(&name(*n)).map(|_| ()),
        Op::Rename(a, b) => lib.rename_folder(&name(*a), &name(*b)).map(|_| ()),
        Op::Delete(n) => lib.delete_folder(&name(*n)).map(|_| ()),
        Op::TogglePin(n) => lib.toggle_folder_pin(&name(*n)).map(|_| ()),
        Op::AddChat(f, c) => lib
            .add_chat_to_folder(&name(*f), &format!("chat {}", c % 4), &format!("https://x/{}", c % 3))
            .map(|_| ()),
    };
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Folder names stay unique and pin stamps stay consistent under any sequence.
    #[test]
    fn prop_invariants_hold(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut lib = Library::new(Document::new(), Box::new(TickingClock::new(0)));
        for op in &ops {
            apply(&mut lib, op);

            let doc = lib.document();
            prop_assert!(doc.check_unique().is_ok());
            let names: HashSet<&str> = doc.folders.iter().map(|f| f.name.as_str()).collect();
            prop_assert_eq!(names.len(), doc.folders.len());
            for folder in &doc.folders {
                prop_assert_eq!(folder.pin.pinned, folder.pin.pinned_at.is_some());
            }
        }
    }

    /// A failed create leaves the document exactly as it was.
    #[test]
    fn prop_failed_create_is_noop(ops in prop::collection::vec(arb_op(), 0..20), n in any::<u8>()) {
        let mut lib = Library::new(Document::new(), Box::new(TickingClock::new(0)));
        for op in &ops {
            apply(&mut lib, op);
        }
        let before = lib.document().clone();
        if lib.create_folder(&name(n)).is_err() {
            prop_assert_eq!(lib.document(), &before);
        } else {
            prop_assert_eq!(lib.document().folders.len(), before.folders.len() + 1);
        }
    }

    /// Toggling a pin twice restores the original display order.
    #[test]
    fn prop_double_toggle_restores_order(count in 1usize..6, target in any::<u8>()) {
        let mut lib = Library::new(Document::new(), Box::new(TickingClock::new(0)));
        for i in 0..count {
            lib.create_folder(&name(i as u8)).unwrap();
        }
        let target = name(target % count as u8);
        let before = lib.document().clone();
        lib.toggle_folder_pin(&target).unwrap();
        lib.toggle_folder_pin(&target).unwrap();
        prop_assert_eq!(lib.document(), &before);
    }
}
