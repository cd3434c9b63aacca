//! Multipart form extraction for upload handlers

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use vargo_core::models::{IncomingFile, UploadDefaults, UploadOptions};
use vargo_core::validation::max_policy_size_bytes;
use vargo_core::{policy_for, AppError};

use crate::constants::MULTIPART_BODY_HEADROOM_BYTES;

pub const FILE_FIELD: &str = "file";
pub const FOLDER_FIELD: &str = "folder";
pub const UPLOAD_TYPE_FIELD: &str = "uploadType";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
const DEFAULT_FILENAME: &str = "unknown";

/// Raw fields of an upload request. Defaults are applied later by
/// `UploadOptions::resolve`.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<IncomingFile>,
    pub folder: Option<String>,
    pub upload_type: Option<String>,
}

/// Request body cap: the largest policy limit plus room for multipart framing
/// and text fields.
pub fn multipart_body_limit_bytes() -> usize {
    usize::try_from(max_policy_size_bytes())
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_BODY_HEADROOM_BYTES)
}

/// Read the whole multipart body into an [`UploadForm`].
/// Only one field named "file" is accepted; unknown fields are skipped.
///
/// A body over [`multipart_body_limit_bytes`] is reported as `FileTooLarge`
/// for the category declared so far, or the default category when
/// `uploadType` has not been read yet.
pub async fn extract_upload_form(
    mut multipart: Multipart,
    defaults: &UploadDefaults,
) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Failed to read multipart", &form, defaults))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            FILE_FIELD => {
                if form.file.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

                let data = field.bytes().await.map_err(|e| {
                    multipart_error(e, "Failed to read file data", &form, defaults)
                })?;

                form.file = Some(IncomingFile::new(data, content_type, filename));
            }
            FOLDER_FIELD => {
                let value = field.text().await.map_err(|e| {
                    multipart_error(e, "Failed to read field 'folder'", &form, defaults)
                })?;
                form.folder = Some(value);
            }
            UPLOAD_TYPE_FIELD => {
                let value = field.text().await.map_err(|e| {
                    multipart_error(e, "Failed to read field 'uploadType'", &form, defaults)
                })?;
                form.upload_type = Some(value);
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(form)
}

fn multipart_error(
    err: MultipartError,
    context: &str,
    form: &UploadForm,
    defaults: &UploadDefaults,
) -> AppError {
    if err.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::InvalidInput(format!("{}: {}", context, err));
    }

    let category = UploadOptions::resolve(None, form.upload_type.clone(), defaults).category;
    let limit = multipart_body_limit_bytes();
    tracing::debug!(
        category = %category,
        body_limit_bytes = limit,
        "Upload body exceeded limit"
    );

    // The exact size is unknown once the stream is cut off; the body limit is
    // a lower bound.
    AppError::FileTooLarge {
        category,
        max_mb: policy_for(category).max_size_mb(),
        size_bytes: limit as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_limit_covers_largest_policy() {
        let limit = multipart_body_limit_bytes() as u64;
        assert!(limit > max_policy_size_bytes());
    }
}
