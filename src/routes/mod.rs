//! HTTP route definitions and handlers.
//!
//! This module organizes all HTTP endpoints into logical groups:
//! authentication, the product catalog, health checks, and metrics.

mod auth_routes;
mod catalog_routes;
mod health_routes;
mod metrics_routes;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::config::ConfigV1;
use crate::state::AppState;

/// Fallback request body cap in megabytes. Product images travel
/// base64-encoded in JSON bodies, so the cap is generous.
const DEFAULT_BODY_LIMIT_MB: usize = 50;

/// Creates the application router with all configured routes.
///
/// Combines all route modules into a single router, applies the CORS and
/// body-limit middleware, and attaches the application state.
pub fn create_router(state: AppState) -> Router {
    let body_limit_mb = state.config.body_limit_mb.unwrap_or(DEFAULT_BODY_LIMIT_MB);

    Router::new()
        .merge(auth_routes::routes())
        .merge(catalog_routes::routes())
        .merge(health_routes::routes())
        .merge(metrics_routes::routes())
        .layer(cors_layer(&state.config))
        .layer(DefaultBodyLimit::max(body_limit_mb * 1024 * 1024))
        .with_state(state)
}

/// Builds the CORS layer for the configured frontend origin. Without a
/// configured origin (or with one that is not a valid header value),
/// cross-origin access stays disabled.
fn cors_layer(config: &ConfigV1) -> CorsLayer {
    match &config.cors.allowed_origin {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(value) => CorsLayer::new()
                .allow_origin(value)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(_) => {
                warn!("Ignoring invalid cors.allowed_origin '{}'.", origin);
                CorsLayer::new()
            }
        },
        None => CorsLayer::new(),
    }
}
