//! App Core for ChatFolders.
//!
//! [`App`] is the single owner of the session state: the document library,
//! the expansion map, the store, the host watcher and the last rendered
//! sidebar. Every user action goes through one of its `handle`-style
//! methods, which mutate, persist, re-render and turn failures into a
//! [`Notice`]. Nothing propagates past these methods.

use tracing::{error, info, warn};

use crate::database::connection::Database;
use crate::managers::clock::{Clock, SystemClock};
use crate::managers::expansion_state::ExpansionState;
use crate::managers::library_manager::{AddOutcome, Library, LibraryManagerTrait};
use crate::managers::storage_manager::{DocumentStore, KeyValueStore, SqliteStore};
use crate::platform;
use crate::services::host_watcher::HostWatcher;
use crate::services::html_renderer::render_html;
use crate::services::import_export::{self, ExportFile};
use crate::services::render_engine::{render_all, RenderOptions};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::document::Document;
use crate::types::errors::{LibraryError, SettingsError, StorageError};
use crate::types::settings::ExtensionSettings;
use crate::types::ui::{Notice, UiTree};

/// What an action handler did.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResult {
    /// Message to show the user, if any.
    pub notice: Option<Notice>,
    /// Whether the sidebar was rebuilt.
    pub rerendered: bool,
}

impl ActionResult {
    fn rendered(notice: Option<Notice>) -> Self {
        Self { notice, rerendered: true }
    }

    fn untouched(notice: Option<Notice>) -> Self {
        Self { notice, rerendered: false }
    }

    /// Combines two results of one request. The later notice wins.
    pub fn merge(self, later: ActionResult) -> Self {
        Self {
            notice: later.notice.or(self.notice),
            rerendered: self.rerendered || later.rerendered,
        }
    }
}

/// Result of a library mutation, before persistence.
enum Outcome {
    Changed,
    Unchanged,
    Notice(Notice),
}

/// Central application struct.
pub struct App {
    pub settings_engine: SettingsEngine,
    library: Library,
    expansion: ExpansionState,
    store: DocumentStore,
    watcher: HostWatcher,
    loaded: bool,
    tree: UiTree,
    html: String,
    render_count: u64,
}

impl App {
    /// Creates an App from the settings file (platform default when `None`),
    /// backed by the SQLite store the settings point at.
    pub fn new(settings_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings_engine = SettingsEngine::new(settings_path);
        if let Err(e) = settings_engine.load() {
            warn!(error = %e, "settings unreadable, using defaults");
        }

        let db_path = settings_engine
            .get_settings()
            .storage
            .database_path
            .clone()
            .map(std::path::PathBuf::from)
            .unwrap_or_else(platform::default_database_path);
        let db = Database::open(&db_path)?;
        info!(path = %db_path.display(), "database opened");

        Ok(Self::with_store(
            settings_engine,
            Box::new(SqliteStore::new(db)),
            Box::new(SystemClock),
        ))
    }

    /// Creates an App over an arbitrary store and clock. The document is
    /// loaded on first use.
    pub fn with_store(
        settings_engine: SettingsEngine,
        store: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let settings = settings_engine.get_settings().clone();
        let store = DocumentStore::new(store, &settings.storage.storage_key);
        let watcher = HostWatcher::new(&settings.host);
        let options = RenderOptions::from_settings(&settings.ui, None);
        let tree = render_all(&Document::new(), &ExpansionState::new(), &options);

        Self {
            settings_engine,
            library: Library::new(Document::new(), clock),
            expansion: ExpansionState::new(),
            store,
            watcher,
            loaded: false,
            html: render_html(&tree),
            tree,
            render_count: 0,
        }
    }

    // ─── Accessors ───

    pub fn document(&self) -> &Document {
        self.library.document()
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn watcher(&self) -> &HostWatcher {
        &self.watcher
    }

    pub fn settings(&self) -> &ExtensionSettings {
        self.settings_engine.get_settings()
    }

    pub fn tree(&self) -> &UiTree {
        &self.tree
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn write_count(&self) -> u64 {
        self.store.write_count()
    }

    // ─── Lifecycle ───

    /// Loads the stored document once. Read failures leave an empty
    /// document; an undecodable value is backed up first.
    pub fn ensure_loaded(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;
        let now = self.library.now();

        match self.store.load(now) {
            Ok(loaded) => {
                self.library.replace_document(loaded.document);
                if loaded.migrated {
                    info!("legacy document migrated");
                    if let Err(e) = self.store.save(self.library.document()) {
                        error!(error = %e, "failed to save migrated document");
                    }
                }
            }
            Err(e) => {
                error!(error = %e, "failed to load document, starting empty");
                if let StorageError::Corrupted(_) = e {
                    match self.store.preserve_raw(now) {
                        Ok(Some(key)) => warn!(backup = %key, "corrupted document backed up"),
                        Ok(None) => {}
                        Err(e) => error!(error = %e, "failed to back up corrupted document"),
                    }
                }
                self.library.replace_document(Document::new());
            }
        }
    }

    /// Host reported whether the anchor element exists.
    ///
    /// `page` identifies the document the sidebar script runs in; a new
    /// token (reload or full navigation) re-arms injection and resets the
    /// expansion state. Returns `None` while the anchor is missing. The first
    /// report per page renders; later ones leave the current view as is.
    pub fn host_ready(
        &mut self,
        anchor_present: bool,
        location: Option<&str>,
        page: Option<&str>,
    ) -> Option<ActionResult> {
        if let Some(page) = page {
            if self.watcher.observe_page(page) {
                info!("host page reloaded");
                self.expansion.clear();
            }
        }
        if let Some(location) = location {
            self.watcher.observe_location(location);
        }
        if !anchor_present {
            return None;
        }
        if !self.watcher.observe_anchor(true) {
            return Some(ActionResult::untouched(None));
        }
        self.ensure_loaded();
        self.render();
        info!("sidebar injected");
        Some(ActionResult::rendered(None))
    }

    /// Host title changed. Renames matching chats everywhere with one save
    /// and one render; a bare navigation only re-renders.
    pub fn title_changed(&mut self, title: &str, location: &str) -> ActionResult {
        let moved = self.watcher.current_location() != Some(location);
        let Some(change) = self.watcher.observe_title(title, location) else {
            return self.rerender_if(moved);
        };

        self.ensure_loaded();
        if self.library.rename_chats_by_href(&change.href, &change.name) {
            let notice = self.persist();
            self.render();
            return ActionResult::rendered(notice);
        }
        self.rerender_if(moved)
    }

    fn rerender_if(&mut self, condition: bool) -> ActionResult {
        if condition && self.watcher.is_injected() {
            self.render();
            return ActionResult::rendered(None);
        }
        ActionResult::untouched(None)
    }

    /// Rebuilds the sidebar from the current model.
    pub fn render(&mut self) -> &UiTree {
        let options = RenderOptions::from_settings(
            &self.settings_engine.get_settings().ui,
            self.watcher.current_location(),
        );
        self.tree = render_all(self.library.document(), &self.expansion, &options);
        self.html = render_html(&self.tree);
        self.render_count += 1;
        &self.tree
    }

    // ─── Action plumbing ───

    /// Saves the document. A failed write keeps the in-memory change and
    /// returns a warning for the user.
    fn persist(&mut self) -> Option<Notice> {
        match self.store.save(self.library.document()) {
            Ok(()) => None,
            Err(e) => {
                error!(error = %e, "failed to persist document");
                Some(Notice::warning(format!(
                    "Your change is applied but could not be saved: {}",
                    e
                )))
            }
        }
    }

    fn apply<F>(&mut self, action: &str, f: F) -> ActionResult
    where
        F: FnOnce(&mut Library, &mut ExpansionState) -> Result<Outcome, LibraryError>,
    {
        self.ensure_loaded();
        match f(&mut self.library, &mut self.expansion) {
            Ok(Outcome::Changed) => {
                let notice = self.persist();
                self.render();
                ActionResult::rendered(notice)
            }
            Ok(Outcome::Unchanged) => ActionResult::untouched(None),
            Ok(Outcome::Notice(notice)) => ActionResult::untouched(Some(notice)),
            Err(e) => {
                warn!(action, error = %e, "action rejected");
                ActionResult::untouched(Some(Notice::error(e.to_string())))
            }
        }
    }

    fn current_page(&self) -> Result<(String, String), LibraryError> {
        let href = self
            .watcher
            .current_location()
            .ok_or_else(|| LibraryError::InvalidInput("no chat page is open".to_string()))?;
        let name = self.watcher.current_page_name().unwrap_or_else(|| href.to_string());
        Ok((name, href.to_string()))
    }

    // ─── Folders ───

    pub fn create_folder(&mut self, name: &str) -> ActionResult {
        self.apply("create_folder", |lib, expansion| {
            let name = lib.create_folder(name)?;
            expansion.set_expanded(name.as_str(), true);
            Ok(Outcome::Changed)
        })
    }

    pub fn rename_folder(&mut self, old_name: &str, new_name: &str) -> ActionResult {
        self.apply("rename_folder", |lib, expansion| {
            let renamed = lib.rename_folder(old_name, new_name)?;
            if renamed == old_name {
                return Ok(Outcome::Unchanged);
            }
            expansion.rename(old_name, renamed.as_str());
            Ok(Outcome::Changed)
        })
    }

    pub fn delete_folder(&mut self, name: &str) -> ActionResult {
        self.apply("delete_folder", |lib, expansion| {
            let removed = lib.delete_folder(name)?;
            expansion.remove(removed.name.as_str());
            Ok(Outcome::Changed)
        })
    }

    pub fn toggle_folder_pin(&mut self, name: &str) -> ActionResult {
        self.apply("toggle_folder_pin", |lib, _| {
            lib.toggle_folder_pin(name)?;
            Ok(Outcome::Changed)
        })
    }

    /// Primary click on a folder row. Not persisted.
    pub fn toggle_folder_expanded(&mut self, name: &str) -> ActionResult {
        self.ensure_loaded();
        if !self.library.document().has_folder(name) {
            let e = LibraryError::FolderNotFound(name.to_string());
            return ActionResult::untouched(Some(Notice::error(e.to_string())));
        }
        self.expansion.toggle(name);
        self.render();
        ActionResult::rendered(None)
    }

    pub fn add_chat_to_folder(&mut self, folder: &str, chat_name: &str, href: &str) -> ActionResult {
        self.apply("add_chat_to_folder", |lib, expansion| {
            match lib.add_chat_to_folder(folder, chat_name, href)? {
                AddOutcome::Added => {
                    expansion.set_expanded(folder, true);
                    Ok(Outcome::Changed)
                }
                AddOutcome::AlreadyPresent => Ok(Outcome::Notice(Notice::info(format!(
                    "This chat is already in \"{}\"",
                    folder
                )))),
            }
        })
    }

    /// "Add current page" on a folder row.
    pub fn add_current_to_folder(&mut self, folder: &str) -> ActionResult {
        match self.current_page() {
            Ok((name, href)) => self.add_chat_to_folder(folder, &name, &href),
            Err(e) => ActionResult::untouched(Some(Notice::error(e.to_string()))),
        }
    }

    pub fn remove_chat_from_folder(&mut self, folder: &str, chat_name: &str, href: &str) -> ActionResult {
        self.apply("remove_chat_from_folder", |lib, _| {
            lib.remove_chat_from_folder(folder, chat_name, href)?;
            Ok(Outcome::Changed)
        })
    }

    pub fn rename_chat_in_folder(&mut self, folder: &str, chat_name: &str, href: &str, new_name: &str) -> ActionResult {
        self.apply("rename_chat_in_folder", |lib, _| {
            lib.rename_chat_in_folder(folder, chat_name, href, new_name)?;
            Ok(Outcome::Changed)
        })
    }

    pub fn toggle_chat_pin_in_folder(&mut self, folder: &str, chat_name: &str, href: &str) -> ActionResult {
        self.apply("toggle_chat_pin_in_folder", |lib, _| {
            lib.toggle_chat_pin_in_folder(folder, chat_name, href)?;
            Ok(Outcome::Changed)
        })
    }

    // ─── Bookmarks ───

    pub fn add_bookmark(&mut self, chat_name: &str, href: &str) -> ActionResult {
        self.apply("add_bookmark", |lib, _| match lib.add_bookmark(chat_name, href)? {
            AddOutcome::Added => Ok(Outcome::Changed),
            AddOutcome::AlreadyPresent => Ok(Outcome::Notice(Notice::info(
                "This chat is already bookmarked",
            ))),
        })
    }

    /// "Bookmark current page" in the header.
    pub fn bookmark_current(&mut self) -> ActionResult {
        match self.current_page() {
            Ok((name, href)) => self.add_bookmark(&name, &href),
            Err(e) => ActionResult::untouched(Some(Notice::error(e.to_string()))),
        }
    }

    pub fn remove_bookmark(&mut self, chat_name: &str, href: &str) -> ActionResult {
        self.apply("remove_bookmark", |lib, _| {
            lib.remove_bookmark(chat_name, href)?;
            Ok(Outcome::Changed)
        })
    }

    pub fn rename_bookmark(&mut self, chat_name: &str, href: &str, new_name: &str) -> ActionResult {
        self.apply("rename_bookmark", |lib, _| {
            lib.rename_bookmark(chat_name, href, new_name)?;
            Ok(Outcome::Changed)
        })
    }

    pub fn toggle_bookmark_pin(&mut self, chat_name: &str, href: &str) -> ActionResult {
        self.apply("toggle_bookmark_pin", |lib, _| {
            lib.toggle_bookmark_pin(chat_name, href)?;
            Ok(Outcome::Changed)
        })
    }

    // ─── Import / export ───

    /// Replaces the document with the file contents. On any format error
    /// the current document is left as it was.
    pub fn import_document(&mut self, text: &str) -> ActionResult {
        self.ensure_loaded();
        let document = match import_export::import_document(text, self.library.now()) {
            Ok(document) => document,
            Err(e) => {
                warn!(error = %e, "import failed");
                return ActionResult::untouched(Some(Notice::error(e.to_string())));
            }
        };

        let summary = format!(
            "Imported {} folders and {} bookmarks",
            document.folders.len(),
            document.bookmarks.len()
        );
        let chats = document.chat_count();
        self.library.replace_document(document);
        self.expansion.clear();
        let notice = self.persist().unwrap_or_else(|| Notice::info(summary));
        self.render();
        info!(chats, "document imported");
        ActionResult::rendered(Some(notice))
    }

    pub fn export_document(&mut self) -> Result<ExportFile, Notice> {
        self.ensure_loaded();
        import_export::export_document(self.library.document(), self.library.now()).map_err(|e| {
            error!(error = %e, "export failed");
            Notice::error(format!("Export failed: {}", e))
        })
    }

    // ─── Settings ───

    /// Updates one setting and applies it to the watcher, the store and the
    /// sidebar. A new storage key switches to the document stored under it.
    pub fn set_setting(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        self.settings_engine.set_value(key, value)?;
        let settings = self.settings_engine.get_settings().clone();
        self.watcher.configure(&settings.host);

        if settings.storage.storage_key != self.store.key() {
            info!(key = %settings.storage.storage_key, "storage key changed, reloading document");
            self.store.set_key(&settings.storage.storage_key);
            self.expansion.clear();
            self.loaded = false;
            self.ensure_loaded();
        }
        if self.watcher.is_injected() {
            self.render();
        }
        Ok(())
    }
}
