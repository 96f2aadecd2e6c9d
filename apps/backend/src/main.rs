use std::env;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::info;

use backend::config::db::db_url;
use backend::config::mail::MailConfig;
use backend::config::reminder::ReminderConfig;
use backend::notify::mailer::HttpMailer;
use backend::scheduler::spawn_daily_reminder;
use backend::state::security_config::SecurityConfig;
use backend::{build_state, cors_middleware, routes, telemetry, AppError};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("BACKEND_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let state = match build_app_state().await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    // Daily reminder job runs for the life of the server process.
    let _reminder_task = spawn_daily_reminder(state.clone());

    info!(host, port, "starting server");

    let data = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(cors_middleware())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

async fn build_app_state() -> Result<backend::AppState, AppError> {
    let jwt_secret = env::var("BACKEND_JWT_SECRET")
        .map_err(|_| AppError::config("BACKEND_JWT_SECRET must be set".to_string()))?;

    let require_known_user = env::var("AUTH_REQUIRE_KNOWN_USER")
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);

    let security =
        SecurityConfig::new(jwt_secret.into_bytes()).with_require_known_user(require_known_user);

    let mut builder = build_state()
        .with_security(security)
        .with_db_url(db_url()?)
        .with_reminder(ReminderConfig::from_env());

    match MailConfig::from_env() {
        Some(mail) => {
            builder = builder.with_notifier(Arc::new(HttpMailer::new(mail)));
        }
        None => {
            tracing::warn!("mail relay not configured, reminder emails disabled");
        }
    }

    builder.build().await
}
