//! Health endpoint: database reachability, migration state, scheduler
//! liveness. Tolerates a missing database connection so it can answer
//! during partial outages.

use actix_web::{web, HttpResponse};
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct SchedulerHealth {
    started: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_run_at: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    latest_migration: Option<String>,
    scheduler: SchedulerHealth,
    time: String,
}

async fn health(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let mut db_status = "unavailable";
    let mut db_error = None;
    let mut latest_migration = None;

    if let Some(db) = &state.db {
        let ping = db
            .execute(Statement::from_string(
                db.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await;

        match ping {
            Ok(_) => {
                db_status = "ok";
                latest_migration = migration::get_latest_migration_version(db)
                    .await
                    .unwrap_or(None);
            }
            Err(e) => {
                db_status = "error";
                db_error = Some(e.to_string());
            }
        }
    }

    let now = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| AppError::internal(format!("failed to format timestamp: {e}")))?;

    let last_run_at = state
        .scheduler_status
        .last_run()
        .and_then(|at| at.format(&Rfc3339).ok());

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        db: db_status,
        db_error,
        latest_migration,
        scheduler: SchedulerHealth {
            started: state.scheduler_status.is_started(),
            last_run_at,
        },
        time: now,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
