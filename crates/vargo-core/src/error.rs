//! Error types module
//!
//! All request-level failures are unified under [`AppError`]. Validation
//! failures are caller-fixable and map to 400; transport failures come from the
//! storage collaborator and map to 500. Neither is retried here.

use crate::models::UploadCategory;
use crate::validation::UploadValidationError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "FILE_TOO_LARGE")
    fn error_code(&self) -> &'static str;

    /// Whether retrying the same request could succeed
    fn is_recoverable(&self) -> bool;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from clients
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
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

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upload failed: {0}")]
    UploadTransport(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<UploadValidationError> for AppError {
    fn from(err: UploadValidationError) -> Self {
        match err {
            UploadValidationError::MissingFile => AppError::MissingFile,
            UploadValidationError::InvalidFileType {
                category,
                mime_type,
            } => AppError::InvalidFileType {
                category,
                mime_type,
            },
            UploadValidationError::FileTooLarge {
                category,
                max_mb,
                size_bytes,
            } => AppError::FileTooLarge {
                category,
                max_mb,
                size_bytes,
            },
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, sensitive, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, bool, LogLevel) {
    match err {
        AppError::MissingFile => (400, "MISSING_FILE", false, false, LogLevel::Debug),
        AppError::InvalidFileType { .. } => {
            (400, "INVALID_FILE_TYPE", false, false, LogLevel::Debug)
        }
        AppError::FileTooLarge { .. } => (400, "FILE_TOO_LARGE", false, false, LogLevel::Debug),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", false, false, LogLevel::Debug),
        AppError::UploadTransport(_) => (500, "UPLOAD_FAILED", true, false, LogLevel::Error),
        AppError::InternalWithSource { .. } => {
            (500, "INTERNAL_ERROR", true, true, LogLevel::Error)
        }
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::MissingFile => "MissingFile",
            AppError::InvalidFileType { .. } => "InvalidFileType",
            AppError::FileTooLarge { .. } => "FileTooLarge",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::UploadTransport(_) => "UploadTransportError",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();
        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).3
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).4
    }

    fn client_message(&self) -> String {
        match self {
            AppError::MissingFile => "No file provided".to_string(),
            AppError::InvalidFileType { category, .. } => {
                format!("Invalid file type for {} uploads", category)
            }
            AppError::FileTooLarge {
                category, max_mb, ..
            } => format!(
                "File too large for {} uploads. Maximum size is {}MB",
                category, max_mb
            ),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::UploadTransport(msg) => msg.clone(),
            AppError::InternalWithSource { .. } => {
                "An internal error occurred".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_400() {
        let errors: Vec<AppError> = vec![
            UploadValidationError::MissingFile.into(),
            UploadValidationError::InvalidFileType {
                category: UploadCategory::Notice,
                mime_type: "video/mp4".to_string(),
            }
            .into(),
            UploadValidationError::FileTooLarge {
                category: UploadCategory::Document,
                max_mb: 10,
                size_bytes: 11 * 1024 * 1024,
            }
            .into(),
        ];

        for err in errors {
            assert_eq!(err.http_status_code(), 400);
            assert!(!err.is_recoverable());
            assert_eq!(err.log_level(), LogLevel::Debug);
        }
    }

    #[test]
    fn transport_error_maps_to_500_and_keeps_message() {
        let err = AppError::UploadTransport("Invalid Signature".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "UPLOAD_FAILED");
        assert_eq!(err.client_message(), "Invalid Signature");
        assert!(err.is_recoverable());
    }

    #[test]
    fn client_messages_name_category_and_limit() {
        let err = AppError::FileTooLarge {
            category: UploadCategory::Notice,
            max_mb: 5,
            size_bytes: 6 * 1024 * 1024,
        };
        assert_eq!(
            err.client_message(),
            "File too large for notice uploads. Maximum size is 5MB"
        );

        let err = AppError::InvalidFileType {
            category: UploadCategory::General,
            mime_type: "text/plain".to_string(),
        };
        assert_eq!(err.client_message(), "Invalid file type for general uploads");
    }

    #[test]
    fn internal_errors_hide_details() {
        let err: AppError = anyhow::anyhow!("disk on fire").into();
        assert!(err.is_sensitive());
        assert_eq!(err.client_message(), "An internal error occurred");
        assert!(err.detailed_message().contains("Caused by: disk on fire"));
    }
}
