//! OTLP metrics export wiring
//!
//! Builds the meter provider once at startup; instruments are created from it
//! and handed to the pipeline explicitly rather than through a global.

use anyhow::{Context, Result};
use opentelemetry_otlp::{MetricExporter, Protocol, WithExportConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};

use super::config::TelemetryConfig;
use super::constants::APP_NAME_LOWER;

/// Build an OTLP/HTTP meter provider with a periodic reader
pub fn init_meter_provider(config: &TelemetryConfig) -> Result<SdkMeterProvider> {
    let mut builder = MetricExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpBinary);

    if let Some(endpoint) = &config.otlp_endpoint {
        builder = builder.with_endpoint(endpoint.clone());
    }

    let exporter = builder
        .build()
        .context("Failed to build OTLP metric exporter")?;

    let reader = PeriodicReader::builder(exporter)
        .with_interval(config.export_interval)
        .build();

    let resource = Resource::builder()
        .with_service_name(APP_NAME_LOWER)
        .build();

    Ok(SdkMeterProvider::builder()
        .with_resource(resource)
        .with_reader(reader)
        .build())
}
