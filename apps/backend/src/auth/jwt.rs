use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::Claims;
use crate::auth::role::Role;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Access token time-to-live: 24 hours.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Mint a HS256 JWT access token for the given username and role.
///
/// The token carries the service marker claim; `verify_access_token`
/// rejects tokens minted with a different marker.
pub fn mint_access_token(
    username: &str,
    role: Role,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time".to_string()))?
        .as_secs() as i64;

    let claims = Claims {
        sub: username.to_string(),
        role,
        marker: security.token_marker.clone(),
        iat,
        exp: iat + TOKEN_TTL_SECS,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a JWT and return its claims.
///
/// Fails `Unauthorized` on an expired token, a bad signature, a marker
/// claim that does not match the configured value, or an empty subject.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    // Default Validation already checks exp; pin algorithm to configured algorithm.
    let validation = Validation::new(security.algorithm);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })?;

    if claims.marker != security.token_marker {
        return Err(AppError::unauthorized_invalid_jwt());
    }
    if claims.sub.trim().is_empty() {
        return Err(AppError::unauthorized_invalid_jwt());
    }

    Ok(claims)
}
