use jsonwebtoken::Algorithm;

/// Fixed marker claim expected in every issued token.
pub const DEFAULT_TOKEN_MARKER: &str = "alphabeta";

/// Configuration for JWT security settings
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// JWT secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
    /// Marker claim value; tokens carrying anything else are rejected
    pub token_marker: String,
    /// When true, the token endpoint only issues tokens for usernames
    /// that exist in the users table. Off by default; the service acts
    /// as a trusted-internal issuer.
    pub require_known_user: bool,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_marker: DEFAULT_TOKEN_MARKER.to_string(),
            require_known_user: false,
        }
    }

    pub fn with_require_known_user(mut self, require: bool) -> Self {
        self.require_known_user = require;
        self
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
