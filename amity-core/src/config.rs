use std::env;

use crate::errors::{AmityError, ConfigError};

const DEFAULT_PREFIX: &str = "AMITY_";
/// Bind address used when neither the environment nor a flag provides one.
pub const DEFAULT_HTTP_BIND: &str = "localhost:8081";
const DEFAULT_NODE_NAME: &str = "amity-node";

/// Runtime environment used by the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    fn from_str(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Development,
        }
    }
}

/// Process configuration for the Amity service.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub environment: Environment,
    pub node_name: String,
    pub http_bind: String,
    pub log_level: Option<String>,
}

impl CoreConfig {
    /// Loads configuration from the process environment (`AMITY_*`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env_with_prefix(DEFAULT_PREFIX)
    }

    /// Loads configuration from env vars prefixed with the provided value (e.g. `USERS_`).
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_lookup(prefix, |key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(prefix: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = |suffix: &str| format!("{}{}", prefix, suffix);

        let environment = lookup(&key("ENV"))
            .map(|raw| Environment::from_str(&raw))
            .unwrap_or_default();

        let node_name = lookup(&key("NODE_NAME")).unwrap_or_else(|| DEFAULT_NODE_NAME.to_string());

        let bind_key = key("HTTP_BIND");
        let http_bind = match lookup(&bind_key) {
            Some(raw) => validate_bind(&bind_key, raw)?,
            None => DEFAULT_HTTP_BIND.to_string(),
        };

        let log_level = lookup(&key("LOG")).filter(|level| !level.trim().is_empty());

        Ok(Self {
            environment,
            node_name,
            http_bind,
            log_level,
        })
    }

    /// Whether the service is running in production.
    pub fn is_production(&self) -> bool {
        matches!(self.environment, Environment::Production)
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            node_name: DEFAULT_NODE_NAME.to_string(),
            http_bind: DEFAULT_HTTP_BIND.to_string(),
            log_level: None,
        }
    }
}

fn validate_bind(key: &str, raw: String) -> Result<String, ConfigError> {
    let valid = raw
        .rsplit_once(':')
        .map(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok())
        .unwrap_or(false);

    if valid {
        Ok(raw)
    } else {
        Err(ConfigError::InvalidEnvVar {
            key: key.to_string(),
            value: raw,
        })
    }
}

/// Helper that loads config and converts to the canonical Amity error type.
pub fn load_core_config() -> Result<CoreConfig, AmityError> {
    Ok(CoreConfig::from_env()?)
}
