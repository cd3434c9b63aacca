//! Data models for the upload gateway

mod upload;

pub use upload::*;
