#![doc = include_str!("../README.md")]

mod server;

use clap::Parser;
use server::config::{CliArgs, ServerConfig};
use server::service::LocationService;
use server::telemetry::init_telemetry;
use stowage::{LocationGenerator, LocationStore, MemoryLocationStore, SystemClock};
use tokio::net::TcpListener;
use tokio::signal;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ServerConfig::try_from(args)?;

    init_telemetry(config.log_format)?;

    match config.database_url.clone() {
        #[cfg(feature = "postgres")]
        Some(url) => {
            let store = stowage::PgLocationStore::connect(&url, config.db_max_connections).await?;
            store.ensure_schema().await?;
            tracing::info!("Using Postgres location store");
            serve(store, config).await
        }
        #[cfg(not(feature = "postgres"))]
        Some(_) => anyhow::bail!(
            "DATABASE_URL is set but stowage-server was built without the `postgres` feature"
        ),
        None => {
            tracing::info!("Using in-memory location store");
            serve(MemoryLocationStore::new(), config).await
        }
    }
}

async fn serve<S>(store: S, config: ServerConfig) -> anyhow::Result<()>
where
    S: LocationStore + 'static,
{
    let generator = LocationGenerator::with_config(store, SystemClock, config.generator_config());
    let app = LocationService::new(generator).router();

    let listener = TcpListener::bind(&config.server_addr).await?;
    log_startup_info(&config);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Service shut down successfully");
    Ok(())
}

fn log_startup_info(config: &ServerConfig) {
    if cfg!(debug_assertions) {
        tracing::info!(
            "Starting location service on {} with full config: {:#?}",
            config.server_addr,
            config
        );
    } else {
        tracing::info!(
            "Starting location service on {} (recommended limit {})",
            config.server_addr,
            config.recommended_limit
        );
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Shutdown signal received, draining in-flight requests...");
}
