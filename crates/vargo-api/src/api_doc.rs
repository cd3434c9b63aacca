//! OpenAPI documentation, served at `/api/openapi.json` and rendered at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use vargo_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vargo Upload API",
        version = "0.1.0",
        description = "Upload gateway for the Vargo Agro admin dashboard. Files are checked against the policy of their upload type (document, notice, general) before being forwarded to media storage."
    ),
    paths(
        handlers::upload::upload_file,
        handlers::policies::list_policies,
        handlers::health::health_check,
    ),
    components(
        schemas(
            models::UploadCategory,
            models::ResourceKind,
            handlers::upload::UploadResponse,
            handlers::policies::UploadPolicyResponse,
            handlers::health::HealthResponse,
            // Error
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "upload", description = "Validated file upload and accepted-type discovery"),
        (name = "health", description = "Service health checks")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
