//! Vargo Storage Library
//!
//! This crate is the boundary to the external media store. It defines the
//! [`Storage`] trait the upload service delegates to, plus a Cloudinary-compatible
//! HTTP backend and a local filesystem backend for development.
//!
//! # Folder format
//!
//! Folders are slash-separated namespaces such as `vargo-agro/notices`. They must
//! not contain `..` segments, backslashes or a leading `/`; validation lives in
//! the `keys` module so every backend applies the same rules.

#[cfg(feature = "storage-cloudinary")]
pub mod cloudinary;
pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod traits;

// Re-export commonly used types
#[cfg(feature = "storage-cloudinary")]
pub use cloudinary::{CloudinaryConfig, CloudinaryStorage};
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult, StorageUpload, StoredObject};
pub use vargo_core::StorageBackend;
