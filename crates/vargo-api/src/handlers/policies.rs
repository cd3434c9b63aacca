//! Read-only view of the upload policy table.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;
use vargo_core::models::UploadCategory;
use vargo_core::policy_for;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadPolicyResponse {
    pub upload_type: UploadCategory,
    pub allowed_mime_types: Vec<String>,
    pub max_size_mb: u64,
    pub max_size_bytes: u64,
}

#[utoipa::path(
    get,
    path = "/upload/policies",
    tag = "upload",
    responses(
        (status = 200, description = "Accepted MIME types and size limits per upload type", body = [UploadPolicyResponse])
    )
)]
pub async fn list_policies() -> Json<Vec<UploadPolicyResponse>> {
    let policies = UploadCategory::ALL
        .iter()
        .map(|&category| {
            let policy = policy_for(category);
            UploadPolicyResponse {
                upload_type: category,
                allowed_mime_types: policy
                    .allowed_mime_types
                    .iter()
                    .map(|m| m.to_string())
                    .collect(),
                max_size_mb: policy.max_size_mb(),
                max_size_bytes: policy.max_size_bytes,
            }
        })
        .collect();

    Json(policies)
}
