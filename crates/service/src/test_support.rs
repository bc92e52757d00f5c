#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::connect_with_config;
use configs::DatabaseConfig;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Connection to the database named by `DATABASE_URL`, migrated once per
/// test process. `None` when `DATABASE_URL` is unset or `SKIP_DB_TESTS` is set,
/// so live tests turn into no-ops on machines without PostgreSQL.
pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(None); }
    let Ok(url) = std::env::var("DATABASE_URL") else { return Ok(None); };

    let cfg = DatabaseConfig { url, max_connections: 5, min_connections: 1, ..Default::default() };

    MIGRATED
        .get_or_try_init(|| async {
            let db = connect_with_config(&cfg).await?;
            migration::Migrator::up(&db, None).await?;
            drop(db);
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    let db = connect_with_config(&cfg).await?;
    Ok(Some(db))
}
