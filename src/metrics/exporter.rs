use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::RegistryMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for registry metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// directly or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<RegistryMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &RegistryMetricsSnapshot) {
        let counters = [
            ("materialize_calls_total", snapshot.materialize_calls),
            ("materialize_found_total", snapshot.materialize_found),
            ("copy_calls_total", snapshot.copy_calls),
            ("copy_found_total", snapshot.copy_found),
            ("temp_hits_total", snapshot.temp_hits),
            ("temp_misses_total", snapshot.temp_misses),
            ("temp_stale_total", snapshot.temp_stale),
            ("cached_hits_total", snapshot.cached_hits),
            ("cached_misses_total", snapshot.cached_misses),
            ("catch_calls_total", snapshot.catch_calls),
            ("catch_committed_total", snapshot.catch_committed),
            ("catch_no_template_total", snapshot.catch_no_template),
            ("uncache_calls_total", snapshot.uncache_calls),
            ("uncache_all_calls_total", snapshot.uncache_all_calls),
            ("destroyed_instances_total", snapshot.destroyed_instances),
        ];
        for (suffix, value) in counters {
            self.write_metric("counter", suffix, value);
        }
        self.write_metric("gauge", "permanent_len", snapshot.permanent_len as u64);
        self.write_metric("gauge", "temp_len", snapshot.temp_len as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_writes_prefixed_counters_and_gauges() {
        let exporter = PrometheusTextExporter::new("prefabs", Vec::new());
        let snapshot = RegistryMetricsSnapshot {
            catch_committed: 2,
            permanent_len: 2,
            ..RegistryMetricsSnapshot::default()
        };
        exporter.export(&snapshot);

        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("# TYPE prefabs_catch_committed_total counter\n"));
        assert!(text.contains("prefabs_catch_committed_total 2\n"));
        assert!(text.contains("# TYPE prefabs_permanent_len gauge\n"));
        assert!(text.contains("prefabs_permanent_len 2\n"));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&RegistryMetricsSnapshot::default());
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.starts_with("# TYPE materialize_calls_total counter\n"));
    }
}
