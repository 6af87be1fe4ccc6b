use std::fmt;

// === LibraryError ===

/// Errors raised by folder and chat mutations on the document.
#[derive(Debug, Clone, PartialEq)]
pub enum LibraryError {
    /// A folder with the given name already exists.
    DuplicateName(String),
    /// A chat with the same (name, href) already exists in the target collection.
    DuplicateChat { name: String, href: String },
    /// The provided name is empty after sanitization.
    InvalidInput(String),
    /// No folder with the given name exists.
    FolderNotFound(String),
    /// No chat with the given (name, href) exists in the target collection.
    ChatNotFound { name: String, href: String },
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::DuplicateName(name) => {
                write!(f, "A folder named \"{}\" already exists", name)
            }
            LibraryError::DuplicateChat { name, href } => {
                write!(f, "Chat \"{}\" ({}) is already in this list", name, href)
            }
            LibraryError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            LibraryError::FolderNotFound(name) => write!(f, "Folder not found: {}", name),
            LibraryError::ChatNotFound { name, href } => {
                write!(f, "Chat not found: {} ({})", name, href)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

// === StorageError ===

/// Errors from the key-value persistence layer.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Reading the stored value failed.
    Read(String),
    /// Writing the value failed (e.g. disk full, database locked).
    Write(String),
    /// The stored value exists but cannot be decoded.
    Corrupted(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Read(msg) => write!(f, "Storage read failed: {}", msg),
            StorageError::Write(msg) => write!(f, "Storage write failed: {}", msg),
            StorageError::Corrupted(msg) => write!(f, "Stored data is corrupted: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

// === ImportError ===

/// Errors raised while importing a user-supplied document file.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportError {
    /// The file is not valid JSON.
    Malformed(String),
    /// The top level is not an object with array-typed `folders` and `bookmarks`.
    WrongShape(String),
    /// A folder or chat record could not be decoded.
    InvalidRecord(String),
    /// The file contains duplicate folder names or duplicate chats in one list.
    DuplicateEntry(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Malformed(msg) => write!(f, "Import file is not valid JSON: {}", msg),
            ImportError::WrongShape(msg) => write!(f, "Invalid import format: {}", msg),
            ImportError::InvalidRecord(msg) => write!(f, "Invalid record in import: {}", msg),
            ImportError::DuplicateEntry(msg) => write!(f, "Duplicate entry in import: {}", msg),
        }
    }
}

impl std::error::Error for ImportError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The specified settings key does not exist.
    InvalidKey(String),
    /// The provided value is invalid for the given key.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => write!(f, "Invalid settings value: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}
