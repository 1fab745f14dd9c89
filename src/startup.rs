//! Application startup and server initialization.
//!
//! Initialization order is explicit: the store is built first, the auth flow
//! is constructed from the store handle and the signing secret, and only then
//! does the server start taking requests.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::auth::{AuthFlow, TokenCodec};
use crate::config::ConfigV1;
use crate::metrics::Metrics;
use crate::routes;
use crate::state::AppState;
use crate::store::create_store;

/// Initializes and runs the application server.
///
/// # Errors
///
/// Returns an error if the server fails to bind to the specified address
/// or encounters a runtime error during execution.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let (accounts, products) = create_store(&config.store).await;
    let auth = Arc::new(AuthFlow::new(
        accounts,
        TokenCodec::new(&config.token.secret),
    ));
    let metrics = Metrics::new();

    info!("Starting server on {}", config.bind_address);

    let state = AppState {
        config: config.clone(),
        auth,
        products,
        metrics,
    };

    let app = routes::create_router(state);

    let listener = TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
