//! Folder validation and object naming shared by all backends.

use crate::traits::{StorageError, StorageResult};

/// Validate a destination folder and return it without surrounding slashes.
pub(crate) fn normalize_folder(folder: &str) -> StorageResult<String> {
    let trimmed = folder.trim();

    if trimmed.starts_with('/') {
        return Err(StorageError::InvalidFolder(
            "Folder must not start with '/'".to_string(),
        ));
    }

    if trimmed.contains('\\') {
        return Err(StorageError::InvalidFolder(
            "Folder must not contain backslashes".to_string(),
        ));
    }

    let normalized = trimmed.trim_end_matches('/');
    if normalized.is_empty() {
        return Err(StorageError::InvalidFolder("Folder is empty".to_string()));
    }

    if normalized
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(StorageError::InvalidFolder(format!(
            "Folder contains an invalid segment: {}",
            folder
        )));
    }

    Ok(normalized.to_string())
}

/// Public id for an object: `{folder}/{name}`.
#[cfg_attr(not(feature = "storage-local"), allow(dead_code))]
pub(crate) fn public_id(folder: &str, name: &str) -> String {
    format!("{}/{}", folder, name)
}

/// Format reported for a stored file: the original extension if it has one,
/// otherwise the MIME subtype.
#[cfg_attr(not(feature = "storage-local"), allow(dead_code))]
pub(crate) fn format_for(original_filename: &str, mime_type: &str) -> String {
    let extension = std::path::Path::new(original_filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()));

    extension.unwrap_or_else(|| {
        mime_type
            .split('/')
            .nth(1)
            .and_then(|subtype| subtype.split(['+', ';']).next())
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or_else(|| "bin".to_string())
    })
}
