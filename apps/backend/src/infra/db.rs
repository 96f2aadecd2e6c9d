//! Database connection bootstrap.

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Connect to the database at `url`.
///
/// SQLite in-memory databases are pinned to a single pooled connection:
/// every pooled connection would otherwise see its own empty database.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(url.to_owned());
    opts.connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    if url.starts_with("sqlite::memory:") {
        opts.max_connections(1).min_connections(1);
    } else {
        opts.max_connections(10);
    }

    Database::connect(opts)
        .await
        .map_err(|e| AppError::db_unavailable(format!("failed to connect to database: {e}")))
}

/// Single entrypoint used at startup and in tests: connect, then apply
/// pending migrations.
pub async fn bootstrap_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(url).await?;

    migration::migrate_up(&conn)
        .await
        .map_err(|e| AppError::db(format!("migration failed: {e}")))?;

    info!("database ready");
    Ok(conn)
}

/// Borrow the connection from AppState, failing `ServiceUnavailable`-style
/// when the state was built without one.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state
        .db
        .as_ref()
        .ok_or_else(|| AppError::db_unavailable("database connection not available".to_string()))
}
