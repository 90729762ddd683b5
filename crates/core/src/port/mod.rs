// Port Layer - Interfaces for external collaborators

pub mod metrics;

// Re-exports
pub use metrics::MetricsSink;
