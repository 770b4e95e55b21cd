//! Event relevance filter

use super::event::RawEvent;

const SOURCE_KUBELET: &str = "kubelet";
const KIND_POD: &str = "Pod";
const REASON_PULLED: &str = "Pulled";

/// Prefix of the "image already present on machine" message variant. It
/// shares reason=Pulled with the pull report but carries no timings, so it
/// can only be told apart by this prefix.
const ALREADY_PRESENT_PREFIX: &str = "Container image";

/// Decide whether an event is a kubelet pull report worth parsing.
/// Rejection is not an error; the event is simply ignored.
pub fn accept(event: &RawEvent) -> bool {
    if event.source_component != SOURCE_KUBELET
        || event.involved_object_kind != KIND_POD
        || event.reason != REASON_PULLED
    {
        return false;
    }

    if event.message.starts_with(ALREADY_PRESENT_PREFIX) {
        tracing::debug!(message = %event.message, "Skipping already-present image event");
        return false;
    }

    true
}
