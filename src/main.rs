//! ChatFolders, a "Folders & Bookmarks" sidebar for chat web apps.
//!
//! With the `gui` feature, opens the configured chat site in a webview and
//! injects the sidebar. Without it, runs a console walkthrough of the core.

#[cfg(feature = "gui")]
fn main() {
    chatfolders::ui::webview_app::run();
}

#[cfg(not(feature = "gui"))]
fn main() {
    use chatfolders::app::App;
    use chatfolders::managers::clock::TickingClock;
    use chatfolders::managers::storage_manager::MemoryStore;
    use chatfolders::services::settings_engine::SettingsEngine;

    chatfolders::logging::init("warn");

    println!();
    println!("ChatFolders v{} (demo mode)", env!("CARGO_PKG_VERSION"));
    println!();

    let mut app = App::with_store(
        SettingsEngine::new(Some("demo_settings.json".to_string())),
        Box::new(MemoryStore::new()),
        Box::new(TickingClock::new(1_700_000_000_000)),
    );

    section("Host page");
    app.host_ready(true, Some("https://chatgpt.com/c/1"), Some("demo"));
    app.title_changed("Q1 Plan - ChatGPT", "https://chatgpt.com/c/1");
    println!("  Injected; current page: {:?}", app.watcher().current_page_name());

    section("Folders");
    report(app.create_folder("Work"));
    report(app.create_folder("Personal"));
    report(app.create_folder("Work"));
    report(app.add_current_to_folder("Work"));
    report(app.add_current_to_folder("Work"));
    report(app.toggle_folder_pin("Personal"));
    report(app.rename_folder("Work", "Projects"));

    section("Bookmarks");
    report(app.bookmark_current());
    report(app.add_bookmark("Recipes", "https://chatgpt.com/c/2"));
    report(app.toggle_bookmark_pin("Recipes", "https://chatgpt.com/c/2"));

    section("Title sync");
    report(app.title_changed("Q1 Roadmap - ChatGPT", "https://chatgpt.com/c/1"));

    section("Sidebar");
    print_tree(&app);

    section("Export");
    match app.export_document() {
        Ok(file) => println!("  {} ({} bytes)", file.file_name, file.contents.len()),
        Err(notice) => println!("  {}", notice.message),
    }
    println!();
    println!("  {} renders, {} saves", app.render_count(), app.write_count());
}

#[cfg(not(feature = "gui"))]
fn section(name: &str) {
    println!("── {} ──", name);
}

#[cfg(not(feature = "gui"))]
fn report(result: chatfolders::app::ActionResult) {
    match result.notice {
        Some(notice) => println!("  [{:?}] {}", notice.level, notice.message),
        None => println!("  ok (rerendered: {})", result.rerendered),
    }
}

#[cfg(not(feature = "gui"))]
fn print_tree(app: &chatfolders::app::App) {
    use chatfolders::types::ui::{FolderBody, UiNode};

    for row in &app.tree().rows {
        match row {
            UiNode::Folder(folder) => {
                let pin = if folder.pinned { " [pinned]" } else { "" };
                println!("  {} {}{}", if folder.expanded { "v" } else { ">" }, folder.name, pin);
                match &folder.body {
                    Some(FolderBody::Chats { chats }) => {
                        for chat in chats {
                            println!("      - {} ({})", chat.name, chat.href);
                        }
                    }
                    Some(FolderBody::Empty { label }) => println!("      {}", label),
                    None => {}
                }
            }
            UiNode::Separator { label } => println!("  -- {} --", label),
            UiNode::Chat(chat) => {
                let pin = if chat.pinned { " [pinned]" } else { "" };
                println!("  * {}{} ({})", chat.name, pin, chat.href);
            }
        }
    }
}
