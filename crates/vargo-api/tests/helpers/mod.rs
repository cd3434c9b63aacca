//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p vargo-api`.

#![allow(dead_code)]

pub mod storage;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use std::sync::Arc;
use vargo_api::setup::routes;
use vargo_api::AppState;
use vargo_core::{Config, ServiceConfig};

use storage::RecordingStorage;

pub const MB: usize = 1024 * 1024;

/// Test application: server plus the storage fake it talks to.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<RecordingStorage>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Setup test app backed by a storage fake that succeeds.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(RecordingStorage::new())
}

pub fn setup_test_app_with(storage: RecordingStorage) -> TestApp {
    let storage = Arc::new(storage);
    let config = Config::new(ServiceConfig::default());
    let state = Arc::new(AppState::new(config.clone(), storage.clone()));

    let app = routes::setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp { server, storage }
}

/// Multipart form with a single `file` part of `size` bytes.
pub fn file_form(file_name: &str, mime_type: &str, size: usize) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(vec![0u8; size]))
        .file_name(file_name.to_string())
        .mime_type(mime_type.to_string());
    MultipartForm::new().add_part("file", part)
}
