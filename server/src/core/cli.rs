use clap::Parser;

use std::path::PathBuf;

use super::constants::{
    ENV_CONFIG, ENV_CONTEXT, ENV_EXPORT_INTERVAL, ENV_KUBECONFIG, ENV_OTLP_ENDPOINT,
};

#[derive(Parser)]
#[command(name = "pullwatch")]
#[command(version, about = "Kubernetes image pull metrics exporter", long_about = None)]
pub struct Cli {
    /// Path to a kubeconfig file (in-cluster config is used when omitted)
    #[arg(long, env = ENV_KUBECONFIG)]
    pub kubeconfig: Option<PathBuf>,

    /// The name of the kubeconfig context to use
    #[arg(long, env = ENV_CONTEXT)]
    pub context: Option<String>,

    /// OTLP/HTTP metrics endpoint (standard OTEL_EXPORTER_OTLP_* variables
    /// apply when unset)
    #[arg(long, env = ENV_OTLP_ENDPOINT)]
    pub otlp_endpoint: Option<String>,

    /// Metric export interval in seconds
    #[arg(long, env = ENV_EXPORT_INTERVAL)]
    pub export_interval_secs: Option<u64>,

    /// Path to config file
    #[arg(long, short = 'c', env = ENV_CONFIG)]
    pub config: Option<PathBuf>,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    pub otlp_endpoint: Option<String>,
    pub export_interval_secs: Option<u64>,
    pub config: Option<PathBuf>,
}

/// Parse CLI arguments and return the derived config
pub fn parse() -> CliConfig {
    let cli = Cli::parse();
    CliConfig {
        kubeconfig: cli.kubeconfig,
        context: cli.context,
        otlp_endpoint: cli.otlp_endpoint,
        export_interval_secs: cli.export_interval_secs,
        config: cli.config,
    }
}
