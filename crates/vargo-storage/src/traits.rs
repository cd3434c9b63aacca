//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use vargo_core::models::ResourceKind;

/// Storage operation errors
///
/// Every variant is a transport-level failure from the caller's point of view;
/// the message is passed through to the client unchanged.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Storage rejected upload ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid folder: {0}")]
    InvalidFolder(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Everything a backend needs to store one validated file.
#[derive(Debug, Clone)]
pub struct StorageUpload {
    pub data: Bytes,
    pub mime_type: String,
    pub original_filename: String,
    pub folder: String,
    pub resource_kind: ResourceKind,
}

/// What the backend reports back after a successful store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub secure_url: String,
    pub public_id: String,
    pub format: String,
    pub size_bytes: u64,
}

/// Storage abstraction trait
///
/// The upload service only ever calls [`Storage::upload`] after a file has
/// passed validation. Retries, CDN behaviour and transcoding belong to the
/// backend, not to the caller.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store a file under `upload.folder`, using `upload.resource_kind` as a
    /// handling hint.
    async fn upload(&self, upload: StorageUpload) -> StorageResult<StoredObject>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
