//! # Metrics Traits
//!
//! Recording, snapshotting and export are split into small traits so the
//! registry only ever writes counters, tests and benches only read snapshots,
//! and monitoring backends only consume them.
//!
//! ```text
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ RegistryMetricsRecorder      │    │ RegistryMetricsReadRecorder  │
//!   │ (&mut self: copy/temp/catch/ │    │ (&self: get_cached_prefab)   │
//!   │  uncache/materialize)        │    │                              │
//!   └──────────────┬───────────────┘    └──────────────┬───────────────┘
//!                  └─────────────────┬─────────────────┘
//!                                    ▼
//!                          ┌───────────────────┐
//!                          │  RegistryMetrics  │
//!                          └─────────┬─────────┘
//!                                    │ snapshot()
//!                                    ▼
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters for operations that take `&mut self`.
pub trait RegistryMetricsRecorder {
    fn record_materialize_call(&mut self);
    fn record_materialize_found(&mut self);
    fn record_copy_call(&mut self);
    fn record_copy_found(&mut self);
    fn record_temp_hit(&mut self);
    fn record_temp_miss(&mut self);
    fn record_temp_stale(&mut self);
    fn record_catch_call(&mut self);
    fn record_catch_committed(&mut self);
    fn record_catch_no_template(&mut self);
    fn record_uncache(&mut self);
    fn record_uncache_all(&mut self);
    fn record_destroyed_instance(&mut self);
}

/// Counters for read-only operations (interior mutability).
pub trait RegistryMetricsReadRecorder {
    fn record_cached_hit(&self);
    fn record_cached_miss(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
