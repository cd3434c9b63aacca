//! Upload gatekeeper service
//!
//! Pipeline: require file → validate against category policy → classify →
//! store. Storage is only reached after validation succeeds, and nothing is
//! kept on failure.

use std::sync::Arc;

use vargo_core::models::{IncomingFile, UploadOptions, UploadResult};
use vargo_core::{
    validate_and_classify, AppError, StorageBackend, UploadValidationError, ValidatedUpload,
};
use vargo_storage::{Storage, StorageError, StorageUpload};

use crate::error::storage_error_to_app;

/// Validates inbound files and forwards accepted ones to storage.
#[derive(Clone)]
pub struct UploadService {
    storage: Arc<dyn Storage>,
}

impl UploadService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn backend_type(&self) -> StorageBackend {
        self.storage.backend_type()
    }

    /// Run the complete upload: validate, then delegate to storage.
    pub async fn upload(
        &self,
        file: Option<IncomingFile>,
        options: &UploadOptions,
    ) -> Result<UploadResult, AppError> {
        let file = file.ok_or(UploadValidationError::MissingFile)?;
        let validated = Self::validate(&file, options)?;
        self.store(file, options, validated).await
    }

    /// Policy checks only; no I/O.
    pub fn validate(
        file: &IncomingFile,
        options: &UploadOptions,
    ) -> Result<ValidatedUpload, AppError> {
        validate_and_classify(&file.mime_type, file.size_bytes, options.category).map_err(|e| {
            tracing::debug!(
                category = %options.category,
                mime_type = %file.mime_type,
                size_bytes = file.size_bytes,
                reason = %e,
                "Upload rejected"
            );
            AppError::from(e)
        })
    }

    async fn store(
        &self,
        file: IncomingFile,
        options: &UploadOptions,
        validated: ValidatedUpload,
    ) -> Result<UploadResult, AppError> {
        tracing::info!(
            category = %validated.category,
            folder = %options.folder,
            resource_kind = %validated.resource_kind,
            mime_type = %file.mime_type,
            size_bytes = file.size_bytes,
            original_filename = %file.original_filename,
            "Processing upload"
        );

        let stored = self
            .storage
            .upload(StorageUpload {
                data: file.data,
                mime_type: file.mime_type.clone(),
                original_filename: file.original_filename.clone(),
                folder: options.folder.clone(),
                resource_kind: validated.resource_kind,
            })
            .await
            .map_err(|e| {
                if matches!(e, StorageError::InvalidFolder(_)) {
                    tracing::debug!(
                        error = %e,
                        folder = %options.folder,
                        "Upload folder rejected"
                    );
                } else {
                    tracing::error!(
                        error = %e,
                        folder = %options.folder,
                        "Failed to upload to storage"
                    );
                }
                storage_error_to_app(e)
            })?;

        tracing::info!(
            public_id = %stored.public_id,
            url = %stored.secure_url,
            "Upload to storage successful"
        );

        Ok(UploadResult {
            url: stored.secure_url,
            public_id: stored.public_id,
            format: stored.format,
            size_bytes: stored.size_bytes,
            original_filename: file.original_filename,
            mime_type: file.mime_type,
            resource_kind: validated.resource_kind,
        })
    }
}
