//! Layered application configuration

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::cli::CliConfig;
use super::constants::{CONFIG_FILE_NAME, DEFAULT_EXPORT_INTERVAL_SECS};

/// Cluster access settings
#[derive(Debug, Clone, Default)]
pub struct ClusterConfig {
    /// Explicit kubeconfig path; in-cluster config is inferred when absent
    pub kubeconfig: Option<PathBuf>,
    /// Kubeconfig context override
    pub context: Option<String>,
}

/// Metric export settings
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// OTLP/HTTP endpoint; the exporter falls back to the standard
    /// OTEL_EXPORTER_OTLP_* environment handling when unset
    pub otlp_endpoint: Option<String>,
    pub export_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub cluster: ClusterConfig,
    pub telemetry: TelemetryConfig,
}

/// On-disk config file shape (all fields optional)
#[derive(Debug, Clone, Default, Deserialize)]
struct FileConfig {
    kubeconfig: Option<PathBuf>,
    context: Option<String>,
    otlp_endpoint: Option<String>,
    export_interval_secs: Option<u64>,
}

impl FileConfig {
    fn load_from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Local directory config OR CLI-specified config path
    /// 3. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let file_config = match &cli.config {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                FileConfig::load_from_file(path)?
            }
            None => {
                let local = PathBuf::from(CONFIG_FILE_NAME);
                if local.exists() {
                    FileConfig::load_from_file(&local)?
                } else {
                    FileConfig::default()
                }
            }
        };

        Ok(Self::merge(cli, file_config))
    }

    fn merge(cli: &CliConfig, file: FileConfig) -> Self {
        let export_interval_secs = cli
            .export_interval_secs
            .or(file.export_interval_secs)
            .unwrap_or(DEFAULT_EXPORT_INTERVAL_SECS);

        Self {
            cluster: ClusterConfig {
                kubeconfig: cli.kubeconfig.clone().or(file.kubeconfig),
                context: cli.context.clone().or(file.context),
            },
            telemetry: TelemetryConfig {
                otlp_endpoint: cli.otlp_endpoint.clone().or(file.otlp_endpoint),
                export_interval: Duration::from_secs(export_interval_secs),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_with_empty_cli() {
        let config = AppConfig::merge(&CliConfig::default(), FileConfig::default());
        assert!(config.cluster.kubeconfig.is_none());
        assert!(config.cluster.context.is_none());
        assert!(config.telemetry.otlp_endpoint.is_none());
        assert_eq!(
            config.telemetry.export_interval,
            Duration::from_secs(DEFAULT_EXPORT_INTERVAL_SECS)
        );
    }

    #[test]
    fn test_cli_overrides_file_config() {
        let cli = CliConfig {
            context: Some("staging".to_string()),
            export_interval_secs: Some(10),
            ..Default::default()
        };
        let file = FileConfig {
            context: Some("production".to_string()),
            export_interval_secs: Some(60),
            otlp_endpoint: Some("http://collector:4318".to_string()),
            ..Default::default()
        };

        let config = AppConfig::merge(&cli, file);
        assert_eq!(config.cluster.context.as_deref(), Some("staging"));
        assert_eq!(config.telemetry.export_interval, Duration::from_secs(10));
        // File values survive where the CLI is silent
        assert_eq!(
            config.telemetry.otlp_endpoint.as_deref(),
            Some("http://collector:4318")
        );
    }

    #[test]
    fn test_file_config_parses_json() {
        let file: FileConfig = serde_json::from_str(
            r#"{
                "kubeconfig": "/home/dev/.kube/config",
                "context": "minikube",
                "export_interval_secs": 15
            }"#,
        )
        .unwrap();
        assert_eq!(
            file.kubeconfig,
            Some(PathBuf::from("/home/dev/.kube/config"))
        );
        assert_eq!(file.context.as_deref(), Some("minikube"));
        assert_eq!(file.export_interval_secs, Some(15));
        assert!(file.otlp_endpoint.is_none());
    }

    #[test]
    fn test_missing_cli_config_path_is_an_error() {
        let cli = CliConfig {
            config: Some(PathBuf::from("/definitely/not/here/pullwatch.json")),
            ..Default::default()
        };
        assert!(AppConfig::load(&cli).is_err());
    }
}
