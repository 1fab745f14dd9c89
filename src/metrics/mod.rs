//! Metrics collection and exposition for Prometheus.

mod recorder;

pub use recorder::Metrics;
