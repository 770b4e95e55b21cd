//! Core application

use anyhow::{Context, Result};
use kube::Client;
use opentelemetry::metrics::MeterProvider as _;
use opentelemetry_sdk::metrics::SdkMeterProvider;

use crate::core::cli::{self, CliConfig};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG, METER_NAME};
use crate::core::shutdown::ShutdownService;
use crate::core::telemetry;
use crate::domain::pull::{PullInstruments, PullPipeline};
use crate::k8s::{self, EventWatcher};

pub struct CoreApp {
    pub config: AppConfig,
    pub shutdown: ShutdownService,
    pub provider: SdkMeterProvider,
    pub pipeline: PullPipeline,
    pub client: Client,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let cli_config = cli::parse();
        let app = Self::init(&cli_config).await?;
        Self::start(app).await
    }

    async fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;

        let provider = telemetry::init_meter_provider(&config.telemetry)?;
        let meter = provider.meter(METER_NAME);
        let pipeline = PullPipeline::new(PullInstruments::new(&meter));

        let client = k8s::client::init(&config.cluster).await?;
        let shutdown = ShutdownService::new();

        Ok(Self {
            config,
            shutdown,
            provider,
            pipeline,
            client,
        })
    }

    async fn start(app: Self) -> Result<()> {
        // Install signal handlers FIRST (before any blocking calls)
        app.shutdown.install_signal_handlers();

        let watcher = EventWatcher::new(app.client.clone(), app.pipeline.clone());
        app.shutdown
            .register(watcher.start(app.shutdown.subscribe()))
            .await;

        tracing::info!(
            export_interval_secs = app.config.telemetry.export_interval.as_secs(),
            "Watching cluster events for image pull reports"
        );

        app.shutdown.wait().await;
        app.shutdown.shutdown().await;

        // Flush any observations still buffered in the reader
        app.provider
            .shutdown()
            .context("Failed to flush metrics on shutdown")?;

        Ok(())
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }
}
