//! userq daemon - Main Entry Point
//! HTTP dispatch endpoint in front of a per-user job queue

mod config;
mod logging;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::config::{DaemonConfig, QueueBackend};
use userq_api_http::{HttpServer, HttpServerConfig};
use userq_core::application::UserJobService;
use userq_core::port::id_provider::UuidProvider;
use userq_core::port::time_provider::SystemTimeProvider;
use userq_core::port::{InMemoryQueueClient, QueueClient};
use userq_infra_sqlite::{create_pool, run_migrations, SqliteJobQueue};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    let _log_guard = logging::init_logging()?;

    info!("userq daemon v{} starting...", VERSION);

    // 2. Load configuration
    let cfg = DaemonConfig::load()?;
    info!(
        backend = ?cfg.queue_backend,
        host = %cfg.http_host,
        port = cfg.http_port,
        require_user_id = cfg.require_user_id,
        "Configuration loaded"
    );

    // 3. Initialize queue backend
    let queue_client = build_queue_client(&cfg).await?;

    // 4. Setup dependencies (DI wiring)
    let service = Arc::new(
        UserJobService::new(
            queue_client,
            Arc::new(UuidProvider),
            Arc::new(SystemTimeProvider),
        )
        .with_policy(cfg.user_id_policy()),
    );

    // 5. Start HTTP server
    let http_config = HttpServerConfig {
        host: cfg.http_host.clone(),
        port: cfg.http_port,
    };
    let handle = HttpServer::new(http_config, service).start().await?;

    info!(addr = %handle.local_addr(), "System ready. Waiting for requests...");
    info!("Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 7. Graceful shutdown
    handle.stop().await?;

    info!("Shutdown complete.");

    Ok(())
}

async fn build_queue_client(cfg: &DaemonConfig) -> Result<Arc<dyn QueueClient>> {
    match cfg.queue_backend {
        QueueBackend::Memory => {
            tracing::warn!("Using in-memory queue backend; jobs are lost on restart");
            Ok(Arc::new(InMemoryQueueClient::new()))
        }
        QueueBackend::Sqlite => {
            if let Some(parent) = std::path::Path::new(&cfg.db_path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }

            info!(db_path = %cfg.db_path, "Initializing database...");
            let pool = create_pool(&cfg.db_path).await?;
            run_migrations(&pool).await?;

            Ok(Arc::new(SqliteJobQueue::new(pool)))
        }
    }
}
