//! Vargo Core Library
//!
//! This crate provides the upload domain model, the category policy table,
//! error types and configuration shared by the storage and API crates.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, ServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::{SignatureAlgorithm, StorageBackend};
pub use validation::{
    classify, policy_for, validate_and_classify, UploadPolicy, UploadValidationError,
    ValidatedUpload,
};
