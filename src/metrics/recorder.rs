//! Metrics recording implementation using Prometheus.

use prometheus::{
    register_counter_vec_with_registry, CounterVec, Encoder, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

/// Prometheus metrics collector.
///
/// Counts auth and catalog operations by outcome so the two interesting
/// questions (how often do logins fail, how busy is the catalog) can be
/// answered without log scraping.
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,

    auth_requests_total: CounterVec,
    catalog_requests_total: CounterVec,
}

impl Metrics {
    /// Creates a new metrics instance with a Prometheus registry.
    pub fn new() -> Self {
        let registry = Arc::new(Registry::new());

        let auth_requests_total = register_counter_vec_with_registry!(
            Opts::new(
                "auth_requests_total",
                "Total number of auth operations by outcome"
            ),
            &["operation", "outcome"],
            registry.clone()
        )
        .expect("Failed to register auth_requests_total");

        let catalog_requests_total = register_counter_vec_with_registry!(
            Opts::new(
                "catalog_requests_total",
                "Total number of catalog operations by outcome"
            ),
            &["operation", "outcome"],
            registry.clone()
        )
        .expect("Failed to register catalog_requests_total");

        Metrics {
            registry,
            auth_requests_total,
            catalog_requests_total,
        }
    }

    /// Records an auth operation (register, login, resolve) with its outcome.
    pub fn record_auth(&self, operation: &str, outcome: &str) {
        self.auth_requests_total
            .with_label_values(&[operation, outcome])
            .inc();
    }

    /// Records a catalog operation with its outcome.
    pub fn record_catalog(&self, operation: &str, outcome: &str) {
        self.catalog_requests_total
            .with_label_values(&[operation, outcome])
            .inc();
    }

    /// Renders all collected metrics in Prometheus text format.
    pub fn render(&self) -> String {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if encoder.encode(&metric_families, &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
