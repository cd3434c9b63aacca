//! Route paths served by the API

/// Multipart upload endpoint
pub const UPLOAD_PATH: &str = "/upload";

/// Read-only view of the per-category upload policies
pub const UPLOAD_POLICIES_PATH: &str = "/upload/policies";

/// Liveness probe
pub const HEALTH_PATH: &str = "/health";

/// Generated OpenAPI document
pub const OPENAPI_PATH: &str = "/api/openapi.json";

/// Request body limit is the largest policy limit plus this headroom. Files
/// inside that window are answered with `FileTooLarge` by the gatekeeper.
pub const MULTIPART_BODY_HEADROOM_BYTES: usize = 10 * 1024 * 1024;
