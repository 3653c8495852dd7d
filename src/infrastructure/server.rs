// Server module - builds the HTTP application around the API router

use axum::http::HeaderValue;
use axum::{Json, Router, routing::get};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api;
use crate::api_docs::ApiDoc;
use crate::infrastructure::AppState;

/// CORS layer: any origin unless an allow-list is configured
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let mut origins = Vec::new();
    for origin in allowed_origins {
        match origin.parse::<HeaderValue>() {
            Ok(v) => origins.push(v),
            Err(e) => tracing::error!("Failed to parse CORS origin '{}': {}", origin, e),
        }
    }
    cors.allow_origin(origins)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router with database connection
pub fn build_router(db: DatabaseConnection, allowed_origins: &[String]) -> Router {
    let state = AppState::new(db);

    Router::new()
        .nest("/api", api::api_router(state))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
}
