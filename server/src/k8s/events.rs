//! Cluster event watch feeding the pull pipeline

use chrono::{DateTime, Utc};
use futures::StreamExt;
use k8s_openapi::api::core::v1::Event;
use kube::runtime::{WatchStreamExt, watcher};
use kube::{Api, Client};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::pull::{PullPipeline, RawEvent};

/// Watches core/v1 events across all namespaces and hands accepted ones to
/// the pipeline.
pub struct EventWatcher {
    client: Client,
    pipeline: PullPipeline,
}

impl EventWatcher {
    pub fn new(client: Client, pipeline: PullPipeline) -> Self {
        Self { client, pipeline }
    }

    pub fn start(self, mut shutdown_rx: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let api: Api<Event> = Api::all(self.client.clone());
            let stream = watcher(api, watcher::Config::default())
                .default_backoff()
                .applied_objects();
            futures::pin_mut!(stream);

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            tracing::debug!("EventWatcher received shutdown");
                            break;
                        }
                    }
                    item = stream.next() => {
                        match item {
                            Some(Ok(event)) => {
                                if let Some(raw) = raw_event(&event) {
                                    self.pipeline.handle(&raw);
                                }
                            }
                            Some(Err(err)) => {
                                tracing::warn!(error = %err, "Event watch error");
                            }
                            None => {
                                tracing::warn!("Event watch stream ended");
                                break;
                            }
                        }
                    }
                }
            }
            tracing::debug!("EventWatcher shutdown complete");
        })
    }
}

/// Validate and convert a core/v1 Event at the source boundary. Events
/// missing a field the pipeline reads are skipped here, never passed on.
fn raw_event(event: &Event) -> Option<RawEvent> {
    let source = event.source.as_ref();
    let (Some(source_component), Some(involved_object_kind), Some(involved_object_name)) = (
        source.and_then(|s| s.component.clone()),
        event.involved_object.kind.clone(),
        event.involved_object.name.clone(),
    ) else {
        tracing::trace!(name = ?event.metadata.name, "Skipping event with missing object fields");
        return None;
    };

    let (Some(reason), Some(message)) = (event.reason.clone(), event.message.clone()) else {
        tracing::trace!(name = ?event.metadata.name, "Skipping event without reason or message");
        return None;
    };

    Some(RawEvent {
        source_component,
        involved_object_kind,
        reason,
        message,
        namespace: event.metadata.namespace.clone().unwrap_or_default(),
        involved_object_name,
        host: source.and_then(|s| s.host.clone()).unwrap_or_default(),
        last_observed_at: observed_at(event),
    })
}

/// Best-available observation timestamp for an event
fn observed_at(event: &Event) -> DateTime<Utc> {
    event
        .last_timestamp
        .as_ref()
        .map(|t| t.0)
        .or_else(|| event.event_time.as_ref().map(|t| t.0))
        .or_else(|| event.metadata.creation_timestamp.as_ref().map(|t| t.0))
        .unwrap_or_else(Utc::now)
}
