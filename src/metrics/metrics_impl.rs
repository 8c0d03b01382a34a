use crate::metrics::cell::MetricsCell;
use crate::metrics::snapshot::RegistryMetricsSnapshot;
use crate::metrics::traits::{RegistryMetricsReadRecorder, RegistryMetricsRecorder};

#[derive(Debug, Default)]
pub struct RegistryMetrics {
    pub materialize_calls: u64,
    pub materialize_found: u64,
    pub copy_calls: u64,
    pub copy_found: u64,
    pub temp_hits: u64,
    pub temp_misses: u64,
    pub temp_stale: u64,
    pub cached_hits: MetricsCell,
    pub cached_misses: MetricsCell,
    pub catch_calls: u64,
    pub catch_committed: u64,
    pub catch_no_template: u64,
    pub uncache_calls: u64,
    pub uncache_all_calls: u64,
    pub destroyed_instances: u64,
}

impl RegistryMetrics {
    /// Copies the counters; gauges are filled in by the caller.
    pub fn snapshot(&self, permanent_len: usize, temp_len: usize) -> RegistryMetricsSnapshot {
        RegistryMetricsSnapshot {
            materialize_calls: self.materialize_calls,
            materialize_found: self.materialize_found,
            copy_calls: self.copy_calls,
            copy_found: self.copy_found,
            temp_hits: self.temp_hits,
            temp_misses: self.temp_misses,
            temp_stale: self.temp_stale,
            cached_hits: self.cached_hits.get(),
            cached_misses: self.cached_misses.get(),
            catch_calls: self.catch_calls,
            catch_committed: self.catch_committed,
            catch_no_template: self.catch_no_template,
            uncache_calls: self.uncache_calls,
            uncache_all_calls: self.uncache_all_calls,
            destroyed_instances: self.destroyed_instances,
            permanent_len,
            temp_len,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl RegistryMetricsRecorder for RegistryMetrics {
    fn record_materialize_call(&mut self) {
        self.materialize_calls += 1;
    }

    fn record_materialize_found(&mut self) {
        self.materialize_found += 1;
    }

    fn record_copy_call(&mut self) {
        self.copy_calls += 1;
    }

    fn record_copy_found(&mut self) {
        self.copy_found += 1;
    }

    fn record_temp_hit(&mut self) {
        self.temp_hits += 1;
    }

    fn record_temp_miss(&mut self) {
        self.temp_misses += 1;
    }

    fn record_temp_stale(&mut self) {
        self.temp_stale += 1;
    }

    fn record_catch_call(&mut self) {
        self.catch_calls += 1;
    }

    fn record_catch_committed(&mut self) {
        self.catch_committed += 1;
    }

    fn record_catch_no_template(&mut self) {
        self.catch_no_template += 1;
    }

    fn record_uncache(&mut self) {
        self.uncache_calls += 1;
    }

    fn record_uncache_all(&mut self) {
        self.uncache_all_calls += 1;
    }

    fn record_destroyed_instance(&mut self) {
        self.destroyed_instances += 1;
    }
}

impl RegistryMetricsReadRecorder for RegistryMetrics {
    fn record_cached_hit(&self) {
        self.cached_hits.incr();
    }

    fn record_cached_miss(&self) {
        self.cached_misses.incr();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_carries_counters_and_gauges() {
        let mut metrics = RegistryMetrics::default();
        metrics.record_temp_miss();
        metrics.record_temp_hit();
        metrics.record_temp_hit();
        metrics.record_cached_miss();

        let snap = metrics.snapshot(3, 1);
        assert_eq!(snap.temp_hits, 2);
        assert_eq!(snap.temp_misses, 1);
        assert_eq!(snap.cached_misses, 1);
        assert_eq!(snap.permanent_len, 3);
        assert_eq!(snap.temp_len, 1);
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut metrics = RegistryMetrics::default();
        metrics.record_catch_call();
        metrics.record_cached_hit();
        metrics.reset();
        assert_eq!(metrics.snapshot(0, 0), RegistryMetricsSnapshot::default());
    }
}
