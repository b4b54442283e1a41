use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Source of configuration values, keyed by environment variable name.
///
/// `Config::from_env` reads the process environment; tests pass a closure
/// over a fixed map instead.
type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn parse_or<T: std::str::FromStr>(lookup: Lookup, key: &str, default: T) -> Result<T, String> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{} must be a valid number", key)),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Self::from_lookup(&process_env)
    }

    fn from_lookup(lookup: Lookup) -> Result<Self, String> {
        Ok(Config {
            app: AppConfig::from_lookup(lookup)?,
            database: DatabaseConfig::from_lookup(lookup)?,
            swagger: SwaggerConfig::from_lookup(lookup),
        })
    }
}

impl AppConfig {
    const DEFAULT_HOST: &'static str = "0.0.0.0";
    const DEFAULT_PORT: u16 = 5000;
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024; // 1MB

    fn from_lookup(lookup: Lookup) -> Result<Self, String> {
        let host = lookup("HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| format!("Invalid PORT: {}", e))?,
            None => Self::DEFAULT_PORT,
        };

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = parse_or(
            lookup,
            "MAX_REQUEST_BODY_SIZE",
            Self::DEFAULT_MAX_REQUEST_BODY_SIZE,
        )?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_URL: &'static str = "postgres://localhost:5432/studentdb";
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    // Zero idle connections so the service can start while the database is down
    const DEFAULT_MIN_CONNECTIONS: u32 = 0;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    fn from_lookup(lookup: Lookup) -> Result<Self, String> {
        let non_empty = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|v| (key, v))
        };

        let url = match non_empty("DATABASE_URL").or_else(|| non_empty("MONGO_URI")) {
            Some((key, url)) => Self::check_scheme(key, url)?,
            None => Self::DEFAULT_URL.to_string(),
        };

        Ok(Self {
            url,
            max_connections: parse_or(lookup, "DB_MAX_CONNECTIONS", Self::DEFAULT_MAX_CONNECTIONS)?,
            min_connections: parse_or(lookup, "DB_MIN_CONNECTIONS", Self::DEFAULT_MIN_CONNECTIONS)?,
            acquire_timeout_secs: parse_or(
                lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?,
            idle_timeout_secs: parse_or(
                lookup,
                "DB_IDLE_TIMEOUT_SECS",
                Self::DEFAULT_IDLE_TIMEOUT_SECS,
            )?,
            max_lifetime_secs: parse_or(
                lookup,
                "DB_MAX_LIFETIME_SECS",
                Self::DEFAULT_MAX_LIFETIME_SECS,
            )?,
        })
    }

    /// Only PostgreSQL locators are usable; a `mongodb://` value left over in
    /// `MONGO_URI` is reported instead of failing later at connect time.
    fn check_scheme(key: &str, url: String) -> Result<String, String> {
        let scheme = url.split_once("://").map(|(scheme, _)| scheme);
        match scheme {
            Some("postgres") | Some("postgresql") => Ok(url),
            Some(other) => Err(format!(
                "{} must be a postgres:// or postgresql:// URL (got scheme \"{}\")",
                key, other
            )),
            None => Err(format!(
                "{} must be a postgres:// or postgresql:// URL",
                key
            )),
        }
    }

    /// Connection string with credentials stripped, for logging
    pub fn redacted_url(&self) -> String {
        match self.url.rsplit_once('@') {
            Some((_, host)) => host.to_string(),
            None => self.url.clone(),
        }
    }
}

impl SwaggerConfig {
    fn from_lookup(lookup: Lookup) -> Self {
        let title = lookup("SWAGGER_TITLE").unwrap_or_else(|| "Student Registration API".to_string());
        let version = lookup("SWAGGER_VERSION").unwrap_or_else(|| "0.1.0".to_string());
        let description = lookup("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|| "API documentation for student registration".to_string());

        Self {
            title,
            version,
            description,
        }
    }
}
