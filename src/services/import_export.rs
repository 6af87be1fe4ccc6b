//! Import and export of the folders document as a user-held JSON file.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::types::document::{migrate_value, Document};
use crate::types::errors::ImportError;

/// A file offered to the user for download.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: String,
    pub contents: String,
}

impl ExportFile {
    /// Contents as base64, for building a `data:` URL in the page.
    pub fn contents_base64(&self) -> String {
        BASE64.encode(self.contents.as_bytes())
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.contents_base64())
    }
}

/// Pretty-printed JSON of the document, named after the export time.
pub fn export_document(document: &Document, now: i64) -> Result<ExportFile, serde_json::Error> {
    Ok(ExportFile {
        file_name: format!("chat-folders-{}.json", now),
        mime_type: "application/json".to_string(),
        contents: serde_json::to_string_pretty(document)?,
    })
}

/// Parses an import file into a document.
///
/// The top level must be an object with array-typed `folders` and
/// `bookmarks`. Legacy records are migrated like stored documents. The
/// result must satisfy the uniqueness rules of the model.
pub fn import_document(text: &str, now: i64) -> Result<Document, ImportError> {
    let mut value: Value =
        serde_json::from_str(text).map_err(|e| ImportError::Malformed(e.to_string()))?;

    let Some(root) = value.as_object() else {
        return Err(ImportError::WrongShape("top level must be an object".to_string()));
    };
    for key in ["folders", "bookmarks"] {
        if !root.get(key).is_some_and(Value::is_array) {
            return Err(ImportError::WrongShape(format!("\"{}\" must be an array", key)));
        }
    }

    migrate_value(&mut value, now);
    let document: Document =
        serde_json::from_value(value).map_err(|e| ImportError::InvalidRecord(e.to_string()))?;
    document.check_unique().map_err(|e| {
        warn!(reason = %e, "import rejected");
        ImportError::DuplicateEntry(e)
    })?;
    Ok(document)
}
