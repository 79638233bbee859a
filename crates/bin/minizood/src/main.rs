//! # minizood: minizoo daemon
//!
//! Composition root that wires the storage backend and HTTP adapter together
//! and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (`minizoo.toml`, env vars)
//! - Initialize logging
//! - Construct the configured repository implementation (adapter)
//! - Construct the application service, injecting the repository via its port trait
//! - Build the axum router, injecting the application service
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use minizoo_adapter_http_axum::router;
use minizoo_adapter_http_axum::state::AppState;
use minizoo_adapter_storage_json_file::JsonFileAnimalRepository;
use minizoo_adapter_storage_sqlite_sqlx::SqliteAnimalRepository;
use minizoo_app::memory_repo::InMemoryAnimalRepository;
use minizoo_app::ports::AnimalRepository;
use minizoo_app::services::animal_service::AnimalService;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, StorageBackend};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    match config.storage.backend {
        StorageBackend::Json => {
            let path = config.data_path();
            tracing::info!(path = %path.display(), "using JSON document storage");
            let repo = JsonFileAnimalRepository::open(path).await?;
            serve(repo, &config).await
        }
        StorageBackend::Sqlite => {
            tracing::info!(url = config.database_url(), "using SQLite storage");
            let db = minizoo_adapter_storage_sqlite_sqlx::Config {
                database_url: config.database_url().to_string(),
            }
            .build()
            .await?;
            let result = serve(SqliteAnimalRepository::new(db.pool().clone()), &config).await;
            db.close().await;
            result
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage, records are lost on shutdown");
            serve(InMemoryAnimalRepository::new(), &config).await
        }
    }
}

async fn serve<R>(repo: R, config: &Config) -> Result<(), Box<dyn std::error::Error>>
where
    R: AnimalRepository + Send + Sync + 'static,
{
    let service = AnimalService::with_id_format(repo, config.ids.format);
    let app = router::build(AppState::new(service));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(id_format = ?config.ids.format, "minizood listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("minizood stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
