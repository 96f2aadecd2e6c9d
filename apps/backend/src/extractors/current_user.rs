//! Identity of the authenticated caller, extracted from JWT claims stored
//! in request extensions by the JwtExtract middleware.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};
use serde::Serialize;

use crate::auth::claims::Claims;
use crate::auth::role::Role;
use crate::error::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub username: String,
    pub role: Role,
}

impl CurrentUser {
    /// Fail `Forbidden` unless the caller may manage reminders.
    pub fn require_reminder_access(&self) -> Result<(), AppError> {
        if self.role.can_manage_reminders() {
            Ok(())
        } else {
            Err(AppError::forbidden())
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<Claims>()
            .map(|claims| CurrentUser {
                username: claims.sub.clone(),
                role: claims.role,
            })
            .ok_or_else(AppError::unauthorized_missing_bearer);

        ready(result)
    }
}
