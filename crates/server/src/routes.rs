use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::errors::StartupError;
use crate::openapi;
use crate::state::AppState;

pub mod products;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// CORS policy admitting the single configured front-end origin.
pub fn build_cors(origin: &str) -> Result<CorsLayer, StartupError> {
    let origin = HeaderValue::from_str(origin)
        .map_err(|e| StartupError::InvalidConfig(format!("cors_origin {origin:?}: {e}")))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]))
}

/// Product routes, relative to the resource base path.
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/:id",
            get(products::get).put(products::update).delete(products::delete),
        )
}

/// Build the full application router. `base_path` is either empty or a
/// normalized prefix such as `/inventory-app`.
pub fn build_router(state: AppState, cors: CorsLayer, base_path: &str) -> Router {
    let products = if base_path.is_empty() {
        product_routes()
    } else {
        Router::new().nest(base_path, product_routes())
    };

    let doc = openapi::document(base_path);

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(move || async move { Json(doc) }))
        .merge(products)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
