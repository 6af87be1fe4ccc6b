//! Persistence adapter for ChatFolders.
//!
//! The document lives as one JSON string under one key of a
//! [`KeyValueStore`]. [`DocumentStore`] loads it (running the legacy-field
//! migration) and saves it back wholesale.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, OptionalExtension};
use serde_json::Value;
use tracing::{debug, info};

use crate::database::connection::Database;
use crate::types::document::{fill_missing_collections, migrate_value, Document};
use crate::types::errors::StorageError;

/// Opaque blocking get/set on a string key.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Key-value store backed by the `kv_store` SQLite table.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.db
            .connection()
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StorageError::Read(e.to_string()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.db
            .connection()
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Self::now()],
            )
            .map_err(|e| StorageError::Write(e.to_string()))?;
        Ok(())
    }
}

/// Process-local store, used by tests and the demo.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Result of loading the stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub document: Document,
    /// True when legacy fields were filled in and the document should be re-saved.
    pub migrated: bool,
}

/// Reads and writes the whole document under a single key.
pub struct DocumentStore {
    store: Box<dyn KeyValueStore>,
    key: String,
    writes: u64,
}

impl DocumentStore {
    pub fn new(store: Box<dyn KeyValueStore>, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
            writes: 0,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Points load and save at another key. Nothing is copied.
    pub fn set_key(&mut self, key: &str) {
        self.key = key.to_string();
    }

    /// Number of successful saves since construction.
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    /// Loads the document. An absent key yields an empty document.
    ///
    /// # Errors
    /// `StorageError::Read` if the store fails, `StorageError::Corrupted` if
    /// the stored text cannot be decoded even after migration.
    pub fn load(&self, now: i64) -> Result<LoadedDocument, StorageError> {
        let Some(raw) = self.store.get(&self.key)? else {
            debug!(key = %self.key, "no stored document");
            return Ok(LoadedDocument {
                document: Document::new(),
                migrated: false,
            });
        };

        let mut value: Value =
            serde_json::from_str(&raw).map_err(|e| StorageError::Corrupted(e.to_string()))?;
        if !value.is_object() {
            return Err(StorageError::Corrupted(
                "stored document is not a JSON object".to_string(),
            ));
        }

        let mut migrated = fill_missing_collections(&mut value);
        migrated |= migrate_value(&mut value, now);
        let document: Document =
            serde_json::from_value(value).map_err(|e| StorageError::Corrupted(e.to_string()))?;

        info!(
            folders = document.folders.len(),
            bookmarks = document.bookmarks.len(),
            migrated,
            "document loaded"
        );
        Ok(LoadedDocument { document, migrated })
    }

    /// Serializes and writes the whole document.
    pub fn save(&mut self, document: &Document) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(document).map_err(|e| StorageError::Write(e.to_string()))?;
        self.store.set(&self.key, &json)?;
        self.writes += 1;
        debug!(key = %self.key, bytes = json.len(), "document saved");
        Ok(())
    }

    /// Raw stored text, if any.
    pub fn raw(&self) -> Result<Option<String>, StorageError> {
        self.store.get(&self.key)
    }

    /// Copies the current raw value to `<key>.corrupt-<now>` so an
    /// undecodable document is not lost when the next save overwrites it.
    /// Returns the backup key.
    pub fn preserve_raw(&mut self, now: i64) -> Result<Option<String>, StorageError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let backup_key = format!("{}.corrupt-{}", self.key, now);
        self.store.set(&backup_key, &raw)?;
        Ok(Some(backup_key))
    }
}
