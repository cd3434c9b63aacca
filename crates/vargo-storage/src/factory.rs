#[cfg(feature = "storage-cloudinary")]
use crate::{CloudinaryConfig, CloudinaryStorage};
#[cfg(feature = "storage-local")]
use crate::LocalStorage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use std::sync::Arc;
use vargo_core::Config;

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend() {
        #[cfg(feature = "storage-cloudinary")]
        StorageBackend::Cloudinary => {
            let required = |value: Option<&str>, name: &str| {
                value
                    .map(String::from)
                    .ok_or_else(|| StorageError::ConfigError(format!("{} not configured", name)))
            };

            let storage = CloudinaryStorage::new(CloudinaryConfig {
                cloud_name: required(config.cloudinary_cloud_name(), "CLOUDINARY_CLOUD_NAME")?,
                api_key: required(config.cloudinary_api_key(), "CLOUDINARY_API_KEY")?,
                api_secret: required(config.cloudinary_api_secret(), "CLOUDINARY_API_SECRET")?,
                api_base: config.cloudinary_api_base().to_string(),
                timeout: std::time::Duration::from_secs(config.cloudinary_timeout_secs()),
                signature_algorithm: config.cloudinary_signature_algorithm(),
            })?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-cloudinary"))]
        StorageBackend::Cloudinary => Err(StorageError::ConfigError(
            "Cloudinary storage backend not available (storage-cloudinary feature not enabled)"
                .to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config
                .local_storage_path()
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
                })?;
            let base_url = config
                .local_storage_base_url()
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError("LOCAL_STORAGE_BASE_URL not configured".to_string())
                })?;

            let storage = LocalStorage::new(base_path, base_url).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
