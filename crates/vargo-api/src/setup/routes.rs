//! Route configuration and setup

use crate::constants::{HEALTH_PATH, OPENAPI_PATH, UPLOAD_PATH, UPLOAD_POLICIES_PATH};
use crate::handlers;
use crate::state::AppState;
use crate::utils::upload::multipart_body_limit_bytes;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use vargo_core::Config;

const DEFAULT_CONCURRENCY_LIMIT: usize = 1_000;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let body_limit = multipart_body_limit_bytes();

    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_CONCURRENCY_LIMIT)
        .max(1);

    tracing::info!(
        body_limit_bytes = body_limit,
        http_concurrency_limit,
        request_timeout_secs = config.request_timeout_secs(),
        "HTTP limits configured"
    );

    let app = Router::new()
        .route(UPLOAD_PATH, post(handlers::upload::upload_file))
        .route(UPLOAD_POLICIES_PATH, get(handlers::policies::list_policies))
        .route(HEALTH_PATH, get(handlers::health::health_check))
        .route(
            OPENAPI_PATH,
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .merge(utoipa_rapidoc::RapiDoc::new(OPENAPI_PATH).path("/docs"))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        // Enforced inside the multipart stream so an oversized upload still
        // gets the FILE_TOO_LARGE body instead of a bare 413
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs(),
        )))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}
