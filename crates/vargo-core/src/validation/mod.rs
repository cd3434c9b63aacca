//! Validation modules

pub mod upload;

pub use upload::{
    classify, max_policy_size_bytes, policy_for, validate_and_classify, UploadPolicy,
    UploadValidationError, ValidatedUpload, BYTES_PER_MB,
};
