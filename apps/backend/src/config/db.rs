//! Database configuration from the environment.

use crate::error::AppError;

/// Read the database connection string from `DATABASE_URL`.
///
/// Postgres in production; tests connect to in-memory SQLite directly
/// through the state builder instead.
pub fn db_url() -> Result<String, AppError> {
    std::env::var("DATABASE_URL")
        .map_err(|_| AppError::config("DATABASE_URL must be set".to_string()))
}
