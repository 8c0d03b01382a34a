/// Point-in-time copy of registry counters and store sizes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RegistryMetricsSnapshot {
    pub materialize_calls: u64,
    pub materialize_found: u64,

    pub copy_calls: u64,
    pub copy_found: u64,

    pub temp_hits: u64,
    pub temp_misses: u64,
    pub temp_stale: u64, // entries whose instance the host had already destroyed

    pub cached_hits: u64,
    pub cached_misses: u64,

    pub catch_calls: u64,
    pub catch_committed: u64,
    pub catch_no_template: u64,

    pub uncache_calls: u64,
    pub uncache_all_calls: u64,
    pub destroyed_instances: u64,

    // gauges captured at snapshot time
    pub permanent_len: usize,
    pub temp_len: usize,
}
