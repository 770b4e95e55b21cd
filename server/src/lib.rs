//! Kubernetes image pull metrics exporter
//!
//! Watches cluster events for kubelet image pull reports and exports pull
//! duration and image size metrics over OTLP.

pub mod app;
pub mod core;
pub mod domain;
pub mod k8s;
