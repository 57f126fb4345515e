use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Login service configuration loaded from environment variables.
#[derive(Debug)]
pub struct LoginConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Base64-encoded HMAC secret for signing authorization tokens.
    pub jwt_secret_b64: String,
    /// Authorization token lifetime in milliseconds (default 1 hour).
    /// Env var: `JWT_TTL_MS`.
    pub jwt_ttl_ms: u64,
}

impl LoginConfig {
    /// # Panics
    ///
    /// Panics when a required variable is missing or the signing secret is
    /// not valid base64.
    pub fn from_env() -> Self {
        let jwt_secret_b64 = std::env::var("JWT_SECRET_B64").expect("JWT_SECRET_B64");
        STANDARD
            .decode(&jwt_secret_b64)
            .expect("JWT_SECRET_B64 must be valid base64");
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret_b64,
            jwt_ttl_ms: std::env::var("JWT_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3_600_000),
        }
    }
}
