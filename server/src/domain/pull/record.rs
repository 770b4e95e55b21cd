//! Metric instruments and observation recording

use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry::metrics::{Gauge, Histogram, Meter};

use super::parse::ParsedPullRecord;

/// Histogram bucket upper bounds in milliseconds
const DURATION_BUCKETS_MS: [f64; 8] = [
    15000.0, 30000.0, 45000.0, 60000.0, 120000.0, 180000.0, 240000.0, 300000.0,
];

/// The three instruments fed by the pipeline. Created once at startup and
/// passed in explicitly; safe to record from concurrent pipeline invocations.
#[derive(Clone)]
pub struct PullInstruments {
    pull_duration: Histogram<u64>,
    wait_only_duration: Histogram<u64>,
    image_size: Gauge<i64>,
}

impl PullInstruments {
    pub fn new(meter: &Meter) -> Self {
        let pull_duration = meter
            .u64_histogram("k8s_image_pull_duration")
            .with_description("The duration of image pull.")
            .with_unit("ms")
            .with_boundaries(DURATION_BUCKETS_MS.to_vec())
            .build();

        let wait_only_duration = meter
            .u64_histogram("k8s_image_pull_wait_only_duration")
            .with_description("The waiting portion of image pull time.")
            .with_unit("ms")
            .with_boundaries(DURATION_BUCKETS_MS.to_vec())
            .build();

        let image_size = meter
            .i64_gauge("k8s_image_size")
            .with_description("The size of the image in bytes.")
            .with_unit("bytes")
            .build();

        Self {
            pull_duration,
            wait_only_duration,
            image_size,
        }
    }

    /// Record all three observations for one parsed pull event with the same
    /// attribute set. Export failures are the reader's concern; nothing here
    /// retries.
    pub fn record(&self, record: &ParsedPullRecord, attrs: &[KeyValue]) {
        let wait_only = record.wait_only().unwrap_or_else(|| {
            tracing::warn!(
                pull_ms = record.pull_duration.as_millis() as u64,
                total_ms = record.total_duration.as_millis() as u64,
                "Total pull duration below active pull duration, clamping wait to zero"
            );
            Duration::ZERO
        });

        self.image_size.record(record.image_size_bytes, attrs);
        self.pull_duration
            .record(record.pull_duration.as_millis() as u64, attrs);
        self.wait_only_duration
            .record(wait_only.as_millis() as u64, attrs);
    }
}
