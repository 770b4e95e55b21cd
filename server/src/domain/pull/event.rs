//! Typed cluster event consumed by the pipeline

use chrono::{DateTime, Utc};

/// One observed cluster event, validated once at the source boundary.
/// Read-only to the pipeline; nothing derived from it outlives one pass.
#[derive(Debug, Clone)]
pub struct RawEvent {
    pub source_component: String,
    pub involved_object_kind: String,
    pub reason: String,
    pub message: String,
    pub namespace: String,
    pub involved_object_name: String,
    pub host: String,
    pub last_observed_at: DateTime<Utc>,
}
