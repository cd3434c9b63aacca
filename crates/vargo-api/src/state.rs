//! Application state shared by all handlers.

use std::sync::Arc;

use vargo_core::models::UploadDefaults;
use vargo_core::Config;
use vargo_storage::Storage;

use crate::services::upload::UploadService;

/// Read-only after startup; concurrent requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub upload: UploadService,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        Self {
            upload: UploadService::new(storage),
            config,
        }
    }

    pub fn upload_defaults(&self) -> &UploadDefaults {
        self.config.upload_defaults()
    }
}
