use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_upload_form;
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use vargo_core::models::{ResourceKind, UploadOptions, UploadResult};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Always `true`
    pub success: bool,
    pub url: String,
    pub public_id: String,
    pub format: String,
    /// Stored size in bytes
    pub size: u64,
    pub original_filename: String,
    /// MIME type declared by the client
    #[serde(rename = "type")]
    pub mime_type: String,
    pub resource_type: ResourceKind,
}

impl From<UploadResult> for UploadResponse {
    fn from(result: UploadResult) -> Self {
        Self {
            success: true,
            url: result.url,
            public_id: result.public_id,
            format: result.format,
            size: result.size_bytes,
            original_filename: result.original_filename,
            mime_type: result.mime_type,
            resource_type: result.resource_kind,
        }
    }
}

#[utoipa::path(
    post,
    path = "/upload",
    tag = "upload",
    request_body(
        content = inline(Object),
        content_type = "multipart/form-data",
        description = "Fields: `file` (required), `folder` (optional), `uploadType` = document | notice | general (optional)"
    ),
    responses(
        (status = 200, description = "File validated and stored", body = UploadResponse),
        (status = 400, description = "Missing file, disallowed type or file too large", body = ErrorResponse),
        (status = 500, description = "Storage backend failed", body = ErrorResponse)
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let form = extract_upload_form(multipart, state.upload_defaults()).await?;
    let options = UploadOptions::resolve(form.folder, form.upload_type, state.upload_defaults());

    let result = state.upload.upload(form.file, &options).await?;

    Ok(Json(result.into()))
}
