use std::future::Future;
use std::sync::Arc;

use axum::Router;
use configs::{AppConfig, StorageBackend};
use migration::MigratorTrait;
use service::product::repo::{InMemoryProductRepository, SeaOrmProductRepository};
use service::product::ProductRepository;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

/// Open the configured product store, applying migrations for PostgreSQL.
pub async fn build_repository(cfg: &AppConfig) -> Result<Arc<dyn ProductRepository>, StartupError> {
    match cfg.storage.backend {
        StorageBackend::Memory => {
            warn!("using in-memory product storage; data is lost on restart");
            Ok(Arc::new(InMemoryProductRepository::new()))
        }
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            if cfg.database.run_migrations {
                migration::Migrator::up(&db, None)
                    .await
                    .map_err(|e| StartupError::Migration(e.to_string()))?;
                info!("database migrations applied");
            }
            Ok(Arc::new(SeaOrmProductRepository::new(db)))
        }
    }
}

/// Build the application router for a validated config.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let repo = build_repository(cfg).await?;
    let cors = routes::build_cors(&cfg.server.cors_origin)?;
    Ok(routes::build_router(AppState::new(repo), cors, &cfg.server.base_path))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "cannot listen for Ctrl+C; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Serve the app for an already loaded config until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    run_until(cfg, shutdown_signal()).await
}

/// Serve the app until `shutdown` resolves.
pub async fn run_until<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;

    let listener = TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, base_path = %cfg.server.base_path, backend = ?cfg.storage.backend, "starting inventory server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("server stopped");
    Ok(())
}
