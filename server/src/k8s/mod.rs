//! Kubernetes event source

pub mod client;
pub mod events;

pub use events::EventWatcher;
