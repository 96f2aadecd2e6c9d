#![deny(clippy::wildcard_imports)]

pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod infra;
pub mod middleware;
pub mod notify;
pub mod repos;
pub mod routes;
pub mod scheduler;
pub mod services;
pub mod state;
pub mod telemetry;

pub use error::AppError;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

pub use auth::jwt::{mint_access_token, verify_access_token};
pub use infra::state::build_state;
pub use middleware::cors::cors_middleware;
pub use middleware::jwt_extract::JwtExtract;
