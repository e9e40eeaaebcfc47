/*
 * Responsibility
 * - Load settings from the environment (DATABASE_URL, JWT_SECRET, API_URL, CORS allowlist, ...)
 * - Validate them once at startup (missing or invalid values abort the process)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

const DEFAULT_JWT_TTL: i64 = 24 * 60 * 60;
const MAX_JWT_TTL: i64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    /// Base path every REST route is nested under, e.g. `/api`.
    pub api_prefix: String,

    pub jwt_secret: String,
    /// Access token lifetime, 1 second to 30 days.
    pub jwt_ttl_seconds: i64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the signing secret or credentials in the database url
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("api_prefix", &self.api_prefix)
            .field("jwt_ttl_seconds", &self.jwt_ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = parse_var(lookup("PORT"), "PORT")?.unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let database_max_connections: u32 =
            parse_var(lookup("DATABASE_MAX_CONNECTIONS"), "DATABASE_MAX_CONNECTIONS")?
                .unwrap_or(5);
        if database_max_connections == 0 {
            return Err(ConfigError::Invalid("DATABASE_MAX_CONNECTIONS"));
        }

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let api_prefix = normalize_api_prefix(lookup("API_URL").as_deref().unwrap_or("/api"))?;

        let jwt_secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET"));
        }

        let jwt_ttl_seconds: i64 =
            parse_var(lookup("JWT_TTL_SECONDS"), "JWT_TTL_SECONDS")?.unwrap_or(DEFAULT_JWT_TTL);
        if !(1..=MAX_JWT_TTL).contains(&jwt_ttl_seconds) {
            return Err(ConfigError::Invalid("JWT_TTL_SECONDS"));
        }

        Ok(Self {
            addr,
            database_url,
            database_max_connections,
            app_env,
            cors_allowed_origins,
            api_prefix,
            jwt_secret,
            jwt_ttl_seconds,
        })
    }
}

// Absent means "use the default"; present but unparsable is a startup error.
fn parse_var<T: FromStr>(raw: Option<String>, key: &'static str) -> Result<Option<T>, ConfigError> {
    raw.map(|v| v.trim().parse::<T>().map_err(|_| ConfigError::Invalid(key)))
        .transpose()
}

// "/api/" -> "/api". The root path cannot be nested under, so it is rejected.
fn normalize_api_prefix(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !trimmed.starts_with('/') || trimmed.len() < 2 {
        return Err(ConfigError::Invalid("API_URL"));
    }
    Ok(trimmed.to_string())
}
