//! Application configuration module
//!
//! Configuration is read from environment variables (after `dotenv` has loaded
//! `.env`). Every variable is validated up front and all problems are reported
//! together, so a misconfigured deployment fails at startup with a complete list.
//!
//! | Variable | Rule | Default |
//! |---|---|---|
//! | `PORT` | integer 1-65535 | 3000 |
//! | `DATABASE_URL` | non-empty | required |
//! | `BCRYPT_SALT_ROUNDS` | integer 4-15 | 12 |
//! | `RUST_LOG` | tracing filter directive | `info,sqlx=warn` |
//! | `DATABASE_MAX_CONNECTIONS` | integer >= 1 | 5 |

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BCRYPT_COST: u32 = 12;
pub const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 15;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// TCP port the HTTP server listens on
    pub port: u16,
    /// PostgreSQL connection string
    pub database_url: String,
    /// bcrypt cost factor used when hashing passwords
    pub bcrypt_cost: u32,
    /// `EnvFilter` directive for the tracing subscriber
    pub log_filter: String,
    /// Upper bound of the connection pool
    pub max_connections: u32,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigErrors> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Unset and empty variables are treated alike.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigErrors>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut errors = Vec::new();

        let port = match get("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => match raw.parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => {
                    errors.push(ConfigError::invalid("PORT", raw, "must be an integer between 1 and 65535"));
                    DEFAULT_PORT
                }
            },
        };

        let database_url = get("DATABASE_URL").unwrap_or_else(|| {
            errors.push(ConfigError::MissingValue("DATABASE_URL"));
            String::new()
        });

        let bcrypt_cost = match get("BCRYPT_SALT_ROUNDS") {
            None => DEFAULT_BCRYPT_COST,
            Some(raw) => match raw.parse::<u32>() {
                Ok(cost) if (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) => cost,
                _ => {
                    errors.push(ConfigError::invalid("BCRYPT_SALT_ROUNDS", raw, "must be an integer between 4 and 15"));
                    DEFAULT_BCRYPT_COST
                }
            },
        };

        let log_filter = get("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    errors.push(ConfigError::invalid("DATABASE_MAX_CONNECTIONS", raw, "must be a positive integer"));
                    DEFAULT_MAX_CONNECTIONS
                }
            },
        };

        if !errors.is_empty() {
            return Err(ConfigErrors(errors));
        }

        Ok(Self {
            port,
            database_url,
            bcrypt_cost,
            log_filter,
            max_connections,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::invalid("PORT", "0", "must be an integer between 1 and 65535"));
        }
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::MissingValue("DATABASE_URL"));
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::invalid(
                "BCRYPT_SALT_ROUNDS",
                self.bcrypt_cost.to_string(),
                "must be an integer between 4 and 15",
            ));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::invalid("DATABASE_MAX_CONNECTIONS", "0", "must be a positive integer"));
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    port: Option<u16>,
    database_url: Option<String>,
    bcrypt_cost: Option<u32>,
    log_filter: Option<String>,
    max_connections: Option<u32>,
}

impl AppConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = Some(max);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            port: self.port.unwrap_or(DEFAULT_PORT),
            database_url: self.database_url.ok_or(ConfigError::MissingValue("DATABASE_URL"))?,
            bcrypt_cost: self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST),
            log_filter: self.log_filter.unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            max_connections: self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {variable} ({value}): {reason}")]
    InvalidValue {
        variable: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl ConfigError {
    fn invalid(variable: &'static str, value: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidValue {
            variable,
            value: value.into(),
            reason,
        }
    }
}

/// Every problem found while loading the configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid configuration: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct ConfigErrors(pub Vec<ConfigError>);

impl ConfigErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ConfigError> {
        self.0.iter()
    }
}
