//! Event-to-metric pipeline

use super::attrs;
use super::event::RawEvent;
use super::filter;
use super::parse;
use super::record::PullInstruments;

/// Stateless per-event pipeline: filter -> parse -> attributes -> record.
/// Holds no mutable state, so concurrent deliveries are safe.
#[derive(Clone)]
pub struct PullPipeline {
    instruments: PullInstruments,
}

impl PullPipeline {
    pub fn new(instruments: PullInstruments) -> Self {
        Self { instruments }
    }

    /// Process one observed event. Irrelevant events are ignored; messages
    /// that pass the filter but fail the grammar are logged and dropped so
    /// format drift stays observable. Nothing here is fatal.
    pub fn handle(&self, event: &RawEvent) {
        if !filter::accept(event) {
            return;
        }

        match parse::parse_message(&event.message) {
            Ok(record) => {
                let attrs = attrs::build(event, &record);
                self.instruments.record(&record, &attrs);
                tracing::debug!(
                    image = %record.image_ref,
                    pull_ms = record.pull_duration.as_millis() as u64,
                    size_bytes = record.image_size_bytes,
                    "Recorded image pull metrics"
                );
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    message = %event.message,
                    "Failed to parse pull event message"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use opentelemetry::metrics::MeterProvider as _;
    use opentelemetry_sdk::metrics::SdkMeterProvider;

    fn pipeline() -> PullPipeline {
        // A provider without readers drops observations but exercises the
        // full instrument path
        let provider = SdkMeterProvider::builder().build();
        let meter = provider.meter("test");
        PullPipeline::new(PullInstruments::new(&meter))
    }

    fn pull_event(message: &str) -> RawEvent {
        RawEvent {
            source_component: "kubelet".to_string(),
            involved_object_kind: "Pod".to_string(),
            reason: "Pulled".to_string(),
            message: message.to_string(),
            namespace: "default".to_string(),
            involved_object_name: "example-5f588dd8cf-8lnm4".to_string(),
            host: "node-1".to_string(),
            last_observed_at: Utc::now(),
        }
    }

    #[test]
    fn test_handles_well_formed_pull_report() {
        pipeline().handle(&pull_event(
            "Successfully pulled image \"repo/example:99cd3b4\" in 1m44.643s (1m44.643s including waiting). Image size: 1169083618 bytes.",
        ));
    }

    #[test]
    fn test_handles_inverted_durations_without_panic() {
        pipeline().handle(&pull_event(
            "Successfully pulled image \"repo/example:v1\" in 45s (15s including waiting). Image size: 500 bytes.",
        ));
    }

    #[test]
    fn test_ignores_already_present_variant() {
        pipeline().handle(&pull_event(
            "Container image \"repo/example:v1\" already present on machine",
        ));
    }

    #[test]
    fn test_drops_malformed_message_without_panic() {
        pipeline().handle(&pull_event("Successfully pulled image but nothing else"));
    }

    #[test]
    fn test_ignores_irrelevant_event() {
        let event = RawEvent {
            reason: "Scheduled".to_string(),
            ..pull_event("Successfully assigned default/example to node-1")
        };
        pipeline().handle(&event);
    }
}
