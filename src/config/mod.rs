use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Secret used when running in development without `JWT_SECRET`.
const DEV_JWT_SECRET: &str = "netinv-development-secret";

/// Upper bound for `JWT_EXPIRY_HOURS` (one year)
pub const MAX_TOKEN_TTL_HOURS: u64 = 24 * 366;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("{0} out of range: {1}")]
    OutOfRange(&'static str, String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub token_ttl_hours: u64,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub seed_test_data: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        let config = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()?;

        config.validate()?;
        Ok(config)
    }

    fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Server overrides
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("SERVER_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Database overrides
        self.database.url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => database_url_from_parts(
                &env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
                env::var("DB_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(5432),
                &env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string()),
                &env::var("DB_PASSWORD").unwrap_or_else(|_| "postgres".to_string()),
                &env::var("DB_NAME").unwrap_or_else(|_| "netinv".to_string()),
            )?,
        };
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT") {
            self.database.connect_timeout_secs = v.parse().unwrap_or(self.database.connect_timeout_secs);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.security.token_ttl_hours = v.parse().unwrap_or(self.security.token_ttl_hours);
        }
        if let Ok(v) = env::var("CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Seed overrides
        if let Ok(v) = env::var("SEED_TEST_DATA") {
            self.seed.seed_test_data = matches!(v.as_str(), "1" | "true" | "TRUE" | "yes");
        }

        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.is_empty() {
            return Err(ConfigError::Missing("JWT_SECRET"));
        }
        let ttl = self.security.token_ttl_hours;
        if ttl == 0 || ttl > MAX_TOKEN_TTL_HOURS {
            return Err(ConfigError::OutOfRange(
                "JWT_EXPIRY_HOURS",
                format!("{} (expected 1..={})", ttl, MAX_TOKEN_TTL_HOURS),
            ));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 10,
                connect_timeout_secs: 30,
            },
            security: SecurityConfig {
                jwt_secret: DEV_JWT_SECRET.to_string(),
                token_ttl_hours: 24,
                cors_origins: vec![
                    "http://localhost:63342".to_string(),
                    "http://localhost:5500".to_string(),
                    "http://localhost:8080".to_string(),
                    "http://localhost".to_string(),
                ],
            },
            seed: SeedConfig { seed_test_data: true },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 20,
                connect_timeout_secs: 10,
            },
            security: SecurityConfig {
                // Must come from JWT_SECRET
                jwt_secret: String::new(),
                token_ttl_hours: 24,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
            seed: SeedConfig { seed_test_data: false },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 50,
                connect_timeout_secs: 5,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                token_ttl_hours: 24,
                cors_origins: vec!["https://inventory.example.com".to_string()],
            },
            seed: SeedConfig { seed_test_data: false },
        }
    }

    /// Development profile with an explicit database URL, no env lookups.
    pub fn for_tests(database_url: impl Into<String>) -> Self {
        let mut config = Self::development();
        config.database.url = database_url.into();
        config.seed.seed_test_data = false;
        config
    }
}

/// Compose a postgres URL from discrete connection settings.
pub fn database_url_from_parts(
    host: &str,
    port: u16,
    user: &str,
    password: &str,
    name: &str,
) -> Result<String, ConfigError> {
    let mut url = url::Url::parse("postgres://localhost")
        .map_err(|e| ConfigError::InvalidDatabaseUrl(e.to_string()))?;

    url.set_host(Some(host))
        .map_err(|e| ConfigError::InvalidDatabaseUrl(format!("host '{}': {}", host, e)))?;
    url.set_port(Some(port))
        .map_err(|_| ConfigError::InvalidDatabaseUrl(format!("port {}", port)))?;
    url.set_username(user)
        .map_err(|_| ConfigError::InvalidDatabaseUrl(format!("user '{}'", user)))?;
    url.set_password(Some(password))
        .map_err(|_| ConfigError::InvalidDatabaseUrl("password".to_string()))?;
    url.set_path(&format!("/{}", name));
    url.set_query(Some("sslmode=disable"));

    Ok(url.into())
}
