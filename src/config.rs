use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// `DATABASE_URL` and `JWT_SECRET` are required; startup fails if either
    /// is unset. Everything else has a working default.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL is not set"))?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "fitsphere".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "fitsphere-users".into()),
            // Tokens live for 7 days unless overridden.
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(7 * 24 * 60),
        };
        Ok(Self { database_url, jwt })
    }
}
