//! Kubernetes client construction

use anyhow::{Context, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};

use crate::core::config::ClusterConfig;

/// Build a client from an explicit kubeconfig, a context override, or the
/// inferred environment (in-cluster first, then the default kubeconfig).
pub async fn init(settings: &ClusterConfig) -> Result<Client> {
    let config = match (&settings.kubeconfig, &settings.context) {
        (Some(path), context) => {
            let kubeconfig = Kubeconfig::read_from(path)
                .with_context(|| format!("Failed to read kubeconfig: {}", path.display()))?;
            let options = KubeConfigOptions {
                context: context.clone(),
                ..Default::default()
            };
            Config::from_custom_kubeconfig(kubeconfig, &options)
                .await
                .context("Failed to load kubeconfig")?
        }
        (None, Some(context)) => {
            let options = KubeConfigOptions {
                context: Some(context.clone()),
                ..Default::default()
            };
            Config::from_kubeconfig(&options)
                .await
                .context("Failed to load kubeconfig context")?
        }
        (None, None) => Config::infer()
            .await
            .context("Failed to infer Kubernetes configuration")?,
    };

    Client::try_from(config).context("Failed to build Kubernetes client")
}
