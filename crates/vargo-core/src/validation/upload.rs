//! Upload policy table and the validate/classify gate
//!
//! Each [`UploadCategory`] maps to a fixed [`UploadPolicy`]. Adding a category
//! means adding a row to `POLICY_TABLE`; the checks themselves never branch on
//! the category.

use crate::models::{ResourceKind, UploadCategory};

pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Allowed MIME types and size ceiling for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub allowed_mime_types: &'static [&'static str],
    pub max_size_bytes: u64,
}

impl UploadPolicy {
    pub fn allows(&self, mime_type: &str) -> bool {
        self.allowed_mime_types.contains(&mime_type)
    }

    pub fn max_size_mb(&self) -> u64 {
        self.max_size_bytes / BYTES_PER_MB
    }
}

const DOCUMENT_MIME_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/gif",
    "video/mp4",
    "video/webm",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/plain",
];

const NOTICE_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
];

const GENERAL_MIME_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/webp",
    "video/mp4",
    "application/pdf",
];

const GENERAL_POLICY: UploadPolicy = UploadPolicy {
    allowed_mime_types: GENERAL_MIME_TYPES,
    max_size_bytes: 10 * BYTES_PER_MB,
};

static POLICY_TABLE: [(UploadCategory, UploadPolicy); 3] = [
    (
        UploadCategory::Document,
        UploadPolicy {
            allowed_mime_types: DOCUMENT_MIME_TYPES,
            max_size_bytes: 10 * BYTES_PER_MB,
        },
    ),
    (
        UploadCategory::Notice,
        UploadPolicy {
            allowed_mime_types: NOTICE_MIME_TYPES,
            max_size_bytes: 5 * BYTES_PER_MB,
        },
    ),
    (UploadCategory::General, GENERAL_POLICY),
];

/// Look up the policy for a category.
pub fn policy_for(category: UploadCategory) -> &'static UploadPolicy {
    POLICY_TABLE
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, policy)| policy)
        .unwrap_or(&GENERAL_POLICY)
}

/// Largest size ceiling across all categories.
pub fn max_policy_size_bytes() -> u64 {
    POLICY_TABLE
        .iter()
        .map(|(_, policy)| policy.max_size_bytes)
        .max()
        .unwrap_or(GENERAL_POLICY.max_size_bytes)
}

/// Map a MIME type to the kind of resource the storage backend should create.
/// Total: anything that is not an image or video is stored as `Raw`.
pub fn classify(mime_type: &str) -> ResourceKind {
    if mime_type.starts_with("image/") {
        ResourceKind::Image
    } else if mime_type.starts_with("video/") {
        ResourceKind::Video
    } else {
        ResourceKind::Raw
    }
}

/// Rejections produced before any bytes leave the process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadValidationError {
    #[error("No file provided")]
    MissingFile,

    #[error("Invalid file type '{mime_type}' for {category} uploads")]
    InvalidFileType {
        category: UploadCategory,
        mime_type: String,
    },

    #[error("File too large for {category} uploads. Maximum size is {max_mb}MB")]
    FileTooLarge {
        category: UploadCategory,
        max_mb: u64,
        size_bytes: u64,
    },
}

/// A file that passed its category's checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedUpload {
    pub category: UploadCategory,
    pub policy: &'static UploadPolicy,
    pub resource_kind: ResourceKind,
}

/// Check type then size against the category's policy and classify the file.
pub fn validate_and_classify(
    mime_type: &str,
    size_bytes: u64,
    category: UploadCategory,
) -> Result<ValidatedUpload, UploadValidationError> {
    let policy = policy_for(category);

    if !policy.allows(mime_type) {
        return Err(UploadValidationError::InvalidFileType {
            category,
            mime_type: mime_type.to_string(),
        });
    }

    if size_bytes > policy.max_size_bytes {
        return Err(UploadValidationError::FileTooLarge {
            category,
            max_mb: policy.max_size_mb(),
            size_bytes,
        });
    }

    Ok(ValidatedUpload {
        category,
        policy,
        resource_kind: classify(mime_type),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = BYTES_PER_MB;

    #[test]
    fn classify_examples() {
        assert_eq!(classify("image/png"), ResourceKind::Image);
        assert_eq!(classify("video/mp4"), ResourceKind::Video);
        assert_eq!(classify("application/pdf"), ResourceKind::Raw);
        assert_eq!(classify("text/plain"), ResourceKind::Raw);
        assert_eq!(classify(""), ResourceKind::Raw);
    }

    #[test]
    fn classify_is_deterministic() {
        for mime in ["image/gif", "video/webm", "application/zip", "garbage"] {
            assert_eq!(classify(mime), classify(mime));
        }
    }

    #[test]
    fn policy_limits_match_table() {
        assert_eq!(policy_for(UploadCategory::Document).max_size_mb(), 10);
        assert_eq!(policy_for(UploadCategory::Notice).max_size_mb(), 5);
        assert_eq!(policy_for(UploadCategory::General).max_size_mb(), 10);
        assert_eq!(max_policy_size_bytes(), 10 * MB);
    }

    #[test]
    fn rejects_type_iff_not_in_allow_list() {
        let candidates = [
            "image/png",
            "image/jpeg",
            "image/gif",
            "image/webp",
            "image/svg+xml",
            "video/mp4",
            "video/webm",
            "application/pdf",
            "application/msword",
            "application/vnd.ms-excel",
            "text/plain",
            "application/zip",
            "",
        ];

        for category in UploadCategory::ALL {
            let policy = policy_for(category);
            for mime in candidates {
                let result = validate_and_classify(mime, 1, category);
                let rejected_for_type =
                    matches!(result, Err(UploadValidationError::InvalidFileType { .. }));
                assert_eq!(
                    rejected_for_type,
                    !policy.allowed_mime_types.contains(&mime),
                    "category={category} mime={mime}"
                );
            }
        }
    }

    #[test]
    fn rejects_size_iff_above_limit() {
        for category in UploadCategory::ALL {
            let policy = policy_for(category);
            let mime = policy.allowed_mime_types[0];

            assert!(validate_and_classify(mime, policy.max_size_bytes, category).is_ok());
            assert!(validate_and_classify(mime, 0, category).is_ok());
            assert!(matches!(
                validate_and_classify(mime, policy.max_size_bytes + 1, category),
                Err(UploadValidationError::FileTooLarge { .. })
            ));
        }
    }

    #[test]
    fn notice_jpeg_within_limit_is_image() {
        let validated = validate_and_classify("image/jpeg", 3 * MB, UploadCategory::Notice).unwrap();
        assert_eq!(validated.resource_kind, ResourceKind::Image);
        assert_eq!(validated.category, UploadCategory::Notice);
        assert_eq!(validated.policy.max_size_bytes, 5 * MB);
    }

    #[test]
    fn notice_rejects_video() {
        let err = validate_and_classify("video/mp4", MB, UploadCategory::Notice).unwrap_err();
        assert_eq!(
            err,
            UploadValidationError::InvalidFileType {
                category: UploadCategory::Notice,
                mime_type: "video/mp4".to_string(),
            }
        );
        assert!(err.to_string().contains("notice"));
    }

    #[test]
    fn document_pdf_over_ten_mb_is_too_large() {
        let err =
            validate_and_classify("application/pdf", 11 * MB, UploadCategory::Document).unwrap_err();
        assert!(matches!(
            err,
            UploadValidationError::FileTooLarge {
                category: UploadCategory::Document,
                max_mb: 10,
                ..
            }
        ));
        let message = err.to_string();
        assert!(message.contains("document"));
        assert!(message.contains("10MB"));
    }

    #[test]
    fn type_check_runs_before_size_check() {
        let err =
            validate_and_classify("application/zip", 50 * MB, UploadCategory::General).unwrap_err();
        assert!(matches!(err, UploadValidationError::InvalidFileType { .. }));
    }

    #[test]
    fn office_documents_are_raw() {
        let validated = validate_and_classify(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            MB,
            UploadCategory::Document,
        )
        .unwrap();
        assert_eq!(validated.resource_kind, ResourceKind::Raw);
    }
}
