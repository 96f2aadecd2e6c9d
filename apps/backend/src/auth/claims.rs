//! JWT claims carried by backend-issued access tokens and inserted into
//! request extensions by the authentication middleware.

use serde::{Deserialize, Serialize};

use crate::auth::role::Role;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Username of the caller
    pub sub: String,
    /// Caller role used by downstream authorization checks
    pub role: Role,
    /// Fixed service marker; tokens without the expected value are rejected
    pub marker: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}
