//! SeaORM -> DomainError translation helpers.
//!
//! Repos convert `sea_orm::DbErr` into `crate::errors::domain::DomainError`
//! here, and higher layers then map `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind};

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Map unique-constraint identifiers (Postgres constraint names, SQLite
/// table.column references) to domain-specific conflicts.
fn map_unique_violation(error_msg: &str) -> (ConflictKind, &'static str) {
    if error_msg.contains("documents.document_number")
        || error_msg.contains("idx_documents_document_number_unique")
    {
        return (
            ConflictKind::UniqueDocumentNumber,
            "Document number already exists",
        );
    }
    if error_msg.contains("users.username") || error_msg.contains("idx_users_username_unique") {
        return (ConflictKind::UniqueUsername, "Username already registered");
    }
    if error_msg.contains("users.email") || error_msg.contains("idx_users_email_unique") {
        return (ConflictKind::UniqueEmail, "Email already registered");
    }
    (
        ConflictKind::Other("Unique".into()),
        "Unique constraint violation",
    )
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(raw_error = %error_msg, "unique constraint violation");
        let (kind, detail) = map_unique_violation(&error_msg);
        return DomainError::conflict(kind, detail);
    }

    if error_msg.contains("timeout") || error_msg.contains("pool") {
        warn!(raw_error = %error_msg, "database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %error_msg, "unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
