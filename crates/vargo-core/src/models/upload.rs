use std::fmt::{Display, Formatter, Result as FmtResult};

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Folder used when a request does not name one.
pub const DEFAULT_UPLOAD_FOLDER: &str = "vargo-agro";

/// Caller-declared purpose of an upload; selects which policy applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UploadCategory {
    Document,
    Notice,
    #[default]
    General,
}

impl UploadCategory {
    pub const ALL: [UploadCategory; 3] = [
        UploadCategory::Document,
        UploadCategory::Notice,
        UploadCategory::General,
    ];

    /// Resolve the `uploadType` form value. Unrecognised values fall back to
    /// `General` rather than failing the request.
    pub fn from_param(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "document" => UploadCategory::Document,
            "notice" => UploadCategory::Notice,
            _ => UploadCategory::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UploadCategory::Document => "document",
            UploadCategory::Notice => "notice",
            UploadCategory::General => "general",
        }
    }
}

impl Display for UploadCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Coarse classification handed to the storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Image,
    Video,
    Raw,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Image => "image",
            ResourceKind::Video => "video",
            ResourceKind::Raw => "raw",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A file part pulled out of an upload request, before validation.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub data: Bytes,
    /// MIME type as declared by the client.
    pub mime_type: String,
    pub size_bytes: u64,
    pub original_filename: String,
}

impl IncomingFile {
    pub fn new(
        data: impl Into<Bytes>,
        mime_type: impl Into<String>,
        original_filename: impl Into<String>,
    ) -> Self {
        let data = data.into();
        Self {
            size_bytes: data.len() as u64,
            data,
            mime_type: mime_type.into(),
            original_filename: original_filename.into(),
        }
    }
}

/// Defaults applied to optional upload form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDefaults {
    /// Destination folder when `folder` is absent or blank (`vargo-agro`).
    pub folder: String,
    /// Category when `uploadType` is absent or blank (`general`).
    pub category: UploadCategory,
}

impl Default for UploadDefaults {
    fn default() -> Self {
        Self {
            folder: DEFAULT_UPLOAD_FOLDER.to_string(),
            category: UploadCategory::General,
        }
    }
}

/// Per-request options after defaults have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    pub folder: String,
    pub category: UploadCategory,
}

impl UploadOptions {
    pub fn resolve(
        folder: Option<String>,
        upload_type: Option<String>,
        defaults: &UploadDefaults,
    ) -> Self {
        let folder = folder
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| defaults.folder.clone());

        let category = upload_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(UploadCategory::from_param)
            .unwrap_or(defaults.category);

        Self { folder, category }
    }
}

/// Outcome of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub url: String,
    pub public_id: String,
    pub format: String,
    pub size_bytes: u64,
    pub original_filename: String,
    pub mime_type: String,
    pub resource_kind: ResourceKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_falls_back_to_general() {
        assert_eq!(UploadCategory::from_param("bogus"), UploadCategory::General);
        assert_eq!(UploadCategory::from_param(""), UploadCategory::General);
        assert_eq!(UploadCategory::from_param("Notice"), UploadCategory::Notice);
        assert_eq!(
            UploadCategory::from_param(" document "),
            UploadCategory::Document
        );
    }

    #[test]
    fn options_use_defaults_for_missing_or_blank_fields() {
        let defaults = UploadDefaults::default();

        let options = UploadOptions::resolve(None, None, &defaults);
        assert_eq!(options.folder, "vargo-agro");
        assert_eq!(options.category, UploadCategory::General);

        let options =
            UploadOptions::resolve(Some("   ".to_string()), Some(String::new()), &defaults);
        assert_eq!(options.folder, "vargo-agro");
        assert_eq!(options.category, UploadCategory::General);
    }

    #[test]
    fn options_keep_explicit_values() {
        let options = UploadOptions::resolve(
            Some("vargo-agro/notices".to_string()),
            Some("notice".to_string()),
            &UploadDefaults::default(),
        );
        assert_eq!(options.folder, "vargo-agro/notices");
        assert_eq!(options.category, UploadCategory::Notice);
    }

    #[test]
    fn incoming_file_size_tracks_payload() {
        let file = IncomingFile::new(vec![0u8; 42], "image/png", "leaf.png");
        assert_eq!(file.size_bytes, 42);
    }

    #[test]
    fn resource_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ResourceKind::Video).unwrap();
        assert_eq!(json, "\"video\"");
    }
}
