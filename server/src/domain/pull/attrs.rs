//! Metric attribute derivation

use std::sync::LazyLock;

use opentelemetry::KeyValue;
use regex::Regex;

use super::event::RawEvent;
use super::parse::ParsedPullRecord;

/// Attribute keys attached to every observation
pub mod keys {
    pub const OBSERVED_TIMESTAMP: &str = "observed.timestamp";
    pub const NAMESPACE: &str = "exported.namespace";
    pub const POD_NAME: &str = "exported.pod.name";
    pub const CONTAINER_NAME: &str = "exported.container.name";
    pub const POD_IMAGE: &str = "exported.pod.image";
    pub const POD_IMAGE_SIZE: &str = "exported.pod.image.size";
    pub const HOST: &str = "exported.host";
    pub const POD_PREFIX: &str = "exported.pod.prefix";
}

/// Captures everything before the trailing `-<replica-hash>-<suffix>` of a
/// generated pod name.
static POD_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)-.*-.*$").expect("pod prefix regex must compile"));

/// Build the attribute set shared by all observations derived from one event.
pub fn build(event: &RawEvent, record: &ParsedPullRecord) -> Vec<KeyValue> {
    let mut attrs = vec![
        KeyValue::new(
            keys::OBSERVED_TIMESTAMP,
            event.last_observed_at.timestamp_millis(),
        ),
        KeyValue::new(keys::NAMESPACE, event.namespace.clone()),
        KeyValue::new(keys::POD_NAME, event.involved_object_name.clone()),
        // Events carry no per-container identity; mirror the pod name
        KeyValue::new(keys::CONTAINER_NAME, event.involved_object_name.clone()),
        KeyValue::new(keys::POD_IMAGE, record.image_ref.clone()),
        KeyValue::new(keys::POD_IMAGE_SIZE, record.image_size_bytes),
        KeyValue::new(keys::HOST, event.host.clone()),
    ];

    if let Some(prefix) = pod_name_prefix(&event.involved_object_name) {
        attrs.push(KeyValue::new(keys::POD_PREFIX, prefix));
    }

    attrs
}

/// Workload identifier derived from a generated pod name, e.g.
/// `k8s-image-pull-metrics-5f588dd8cf-8lnm4` -> `k8s-image-pull-metrics`.
/// None when the name has fewer than three dash-separated segments.
pub fn pod_name_prefix(pod_name: &str) -> Option<String> {
    POD_PREFIX_RE
        .captures(pod_name)
        .map(|captures| captures[1].to_string())
}
