//! Vargo API Library
//!
//! This crate provides the HTTP surface for the upload gateway: multipart
//! extraction, the validate-then-store upload service, error mapping and
//! application setup.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
pub mod services;
pub mod setup;
mod telemetry;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::upload::UploadService;
pub use state::AppState;
