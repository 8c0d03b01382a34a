//! Registry metrics, compiled with the `metrics` feature.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::RegistryMetrics;
pub use snapshot::RegistryMetricsSnapshot;
pub use traits::{
    MetricsExporter, MetricsSnapshotProvider, RegistryMetricsReadRecorder,
    RegistryMetricsRecorder,
};
