use crate::domain::errors::CollectError;
use crate::domain::metrics::{Batch, Counter, Document, Gauge, MetricPath};
use crate::domain::path_resolver::{resolve_counter, resolve_gauge};
use tracing::info;

/// Assembles a [`Batch`] from a fetched document.
///
/// All-or-nothing: the first path that fails to resolve aborts the build and
/// no batch is returned. Duplicate paths overwrite earlier entries.
pub struct BatchBuilder;

impl BatchBuilder {
    pub fn build(
        document: &Document,
        source: &str,
        gauge_paths: &[MetricPath],
        counter_paths: &[MetricPath],
    ) -> Result<Batch, CollectError> {
        let mut batch = Batch::new(source);

        for path in gauge_paths {
            let value = resolve_gauge(document, path)?;
            info!("  {}={}", path, value);
            batch.gauges.insert(path.to_string(), Gauge { value });
        }

        for path in counter_paths {
            let value = resolve_counter(document, path)?;
            info!("  {}={}", path, value);
            batch.counters.insert(path.to_string(), Counter { value });
        }

        Ok(batch)
    }
}
