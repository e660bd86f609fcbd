use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use object_replicator::{
    adapters::{
        inbound::http::router::{create_router, AppState},
        outbound::config::EnvConfigProvider,
    },
    app::{AppBuilder, AppConfig, StorageBackend},
    ports::ReplicationService,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendKind {
    /// Two S3-compatible stores configured from MINIO_* and FILEBASE_* variables
    S3,
    /// Two in-process stores, contents are lost on exit
    Memory,
}

#[derive(Parser, Debug)]
#[command(name = "object-replicator-server")]
#[command(about = "HTTP service replicating objects between two S3-compatible stores", long_about = None)]
struct Cli {
    /// Server port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value = "8000")]
    port: u16,

    /// Server host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Storage backend type
    #[arg(long, env = "STORAGE_BACKEND", value_enum, default_value = "s3")]
    storage_backend: BackendKind,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let storage_backend = match self.storage_backend {
            BackendKind::Memory => StorageBackend::in_memory()?,
            BackendKind::S3 => StorageBackend::s3_from_provider(&EnvConfigProvider::new())
                .context("Failed to read store configuration from the environment")?,
        };

        Ok(AppConfig { storage_backend })
    }

    fn env_filter(&self) -> EnvFilter {
        let level = match self.log_level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => "info",
        };

        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    }

    fn init_logging(&self) {
        tracing_subscriber::registry()
            .with(self.env_filter())
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging();

    info!("Starting object replicator");
    info!("Storage backend: {:?}", cli.storage_backend);

    let config = cli.to_app_config()?;
    let app_services = AppBuilder::new()
        .with_config(config)
        .build()
        .await
        .context("Failed to build application")?;

    // The service still starts when the target is unreachable; requests report the failure
    if let Err(e) = app_services.replication_service.ensure_target_bucket().await {
        warn!(error = %e, "could not prepare target bucket at startup");
    }

    let state = AppState::new(Arc::new(app_services.replication_service));
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, router)
        .await
        .context("Failed to start server")?;

    Ok(())
}
