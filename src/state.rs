//! Shared application state.

use std::sync::Arc;

use crate::auth::AuthFlow;
use crate::config::ConfigV1;
use crate::metrics::Metrics;
use crate::store::ProductStore;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request handler; everything here is read-only after startup,
/// so no locking discipline is needed.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Registration, login, and identity resolution.
    pub auth: Arc<AuthFlow>,
    /// Product catalog persistence.
    pub products: Arc<dyn ProductStore>,
    /// Prometheus metrics collector.
    pub metrics: Metrics,
}
