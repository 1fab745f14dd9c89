//! Health check endpoints.

use crate::state::AppState;
use axum::{
    body::Body,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

/// Registers health check routes. The root banner is what the storefront
/// frontend pings to check the backend is up.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_banner))
        .route("/health", get(health_check))
}

async fn root_banner() -> impl IntoResponse {
    Response::new(Body::from("Your Server is Working"))
}

/// Simple health check endpoint.
///
/// Returns a 200 OK status to indicate the service is running.
async fn health_check() -> impl IntoResponse {
    Response::new(Body::from("OK"))
}
