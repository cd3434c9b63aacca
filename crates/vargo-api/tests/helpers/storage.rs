//! In-memory storage fake that records every call.

use async_trait::async_trait;
use std::sync::Mutex;
use vargo_core::StorageBackend;
use vargo_storage::{Storage, StorageError, StorageResult, StorageUpload, StoredObject};

pub const CDN_BASE: &str = "https://res.cloudinary.test/vargo";

#[derive(Default)]
pub struct RecordingStorage {
    uploads: Mutex<Vec<StorageUpload>>,
    failure: Option<String>,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every upload fails as if the remote service rejected it.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn uploads(&self) -> Vec<StorageUpload> {
        self.uploads.lock().expect("storage mutex poisoned").clone()
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn upload(&self, upload: StorageUpload) -> StorageResult<StoredObject> {
        self.uploads
            .lock()
            .expect("storage mutex poisoned")
            .push(upload.clone());

        if let Some(message) = &self.failure {
            return Err(StorageError::Rejected {
                status: 400,
                message: message.clone(),
            });
        }

        let stem = upload
            .original_filename
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&upload.original_filename);
        let format = upload
            .original_filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        let public_id = format!("{}/{}", upload.folder, stem);

        Ok(StoredObject {
            secure_url: format!(
                "{}/{}/upload/{}.{}",
                CDN_BASE, upload.resource_kind, public_id, format
            ),
            public_id,
            format,
            size_bytes: upload.data.len() as u64,
        })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Cloudinary
    }
}
