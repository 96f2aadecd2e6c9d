//! Token issuance.

use std::time::SystemTime;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::jwt::mint_access_token;
use crate::auth::role::Role;
use crate::error::AppError;
use crate::infra::db::require_db;
use crate::repos::users;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// POST /auth/token
///
/// Mints a bearer token for the requested username and role. When
/// AUTH_REQUIRE_KNOWN_USER is enabled the username must exist in the
/// users table.
async fn issue_token(
    state: web::Data<AppState>,
    body: web::Json<TokenRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let username = body.username.trim();

    if username.is_empty() {
        return Err(AppError::invalid(
            "USERNAME_REQUIRED",
            "username must not be empty".to_string(),
        ));
    }

    if state.security.require_known_user {
        let db = require_db(&state)?;
        if users::find_by_username(db, username).await?.is_none() {
            return Err(AppError::forbidden());
        }
    }

    let token = mint_access_token(username, body.role, SystemTime::now(), &state.security)?;

    info!(username, role = %body.role, "access token issued");
    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token: token,
        token_type: "bearer",
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/token", web::post().to(issue_token));
}
