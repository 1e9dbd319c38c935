//! Configuration management

use std::fmt;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_BASE_DURATION_SECS, DEFAULT_REDIS_CONNECT_TIMEOUT_MS, DEFAULT_REDIS_HOST,
    DEFAULT_REDIS_MAX_CONNECTIONS, DEFAULT_REDIS_PORT,
};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub redis: RedisSettings,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub name: String,
}

#[derive(Deserialize, Clone)]
pub struct RedisSettings {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub db: i64,
    #[serde(default)]
    pub password: Option<String>,
    pub max_connections: u32,
    pub connect_timeout_ms: u64,
}

/// Session lifecycle settings.
///
/// `token_secret` is loaded and carried along but no lifecycle operation reads it.
#[derive(Deserialize, Clone)]
pub struct SessionConfig {
    #[serde(default)]
    pub token_secret: String,
    pub base_duration_secs: u64,
}

impl RedisSettings {
    /// Builds a `redis://` URL from the individual settings.
    pub fn connection_url(&self) -> String {
        let auth = self
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!(":{}@", p))
            .unwrap_or_default();
        format!("redis://{}{}:{}/{}", auth, self.host, self.port, self.db)
    }
}

impl fmt::Debug for RedisSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("db", &self.db)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("max_connections", &self.max_connections)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .finish()
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("token_secret", &"<redacted>")
            .field("base_duration_secs", &self.base_duration_secs)
            .finish()
    }
}

impl AppConfig {
    /// Loads configuration from `config/default`, `config/{APP_ENV}` and
    /// `APP__`-prefixed environment variables, in increasing precedence.
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        Self::from_config(builder.build()?)
    }

    /// Parses configuration from an in-memory YAML document layered over the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, AppError> {
        let config = Self::defaults()?
            .add_source(File::from_str(yaml, config::FileFormat::Yaml))
            .build()?;
        Self::from_config(config)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, AppError> {
        Ok(Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.name", "auth-server")?
            .set_default("redis.host", DEFAULT_REDIS_HOST)?
            .set_default("redis.port", i64::from(DEFAULT_REDIS_PORT))?
            .set_default("redis.db", 0)?
            .set_default("redis.max_connections", i64::from(DEFAULT_REDIS_MAX_CONNECTIONS))?
            .set_default("redis.connect_timeout_ms", DEFAULT_REDIS_CONNECT_TIMEOUT_MS as i64)?
            .set_default("session.base_duration_secs", DEFAULT_BASE_DURATION_SECS as i64)?)
    }

    fn from_config(config: Config) -> Result<Self, AppError> {
        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.session.base_duration_secs == 0 {
            return Err(AppError::InvalidConfig(
                "session.base_duration_secs must be greater than zero".into(),
            ));
        }
        if self.redis.max_connections == 0 {
            return Err(AppError::InvalidConfig(
                "redis.max_connections must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::from_yaml("session:\n  token_secret: s3cret\n").unwrap();
        assert_eq!(config.app.name, "auth-server");
        assert_eq!(config.redis.host, DEFAULT_REDIS_HOST);
        assert_eq!(config.redis.port, DEFAULT_REDIS_PORT);
        assert_eq!(config.session.base_duration_secs, DEFAULT_BASE_DURATION_SECS);
        assert_eq!(config.session.token_secret, "s3cret");
    }

    #[test]
    fn test_yaml_overrides() {
        let yaml = r#"
redis:
  host: cache.internal
  port: 6380
  db: 2
  password: hunter2
session:
  base_duration_secs: 900
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.redis.host, "cache.internal");
        assert_eq!(config.redis.db, 2);
        assert_eq!(config.session.base_duration_secs, 900);
        assert_eq!(
            config.redis.connection_url(),
            "redis://:hunter2@cache.internal:6380/2"
        );
    }

    #[test]
    fn test_zero_base_duration_rejected() {
        let result = AppConfig::from_yaml("session:\n  base_duration_secs: 0\n");
        assert!(matches!(result, Err(AppError::InvalidConfig(_))));
    }

    #[test]
    fn test_connection_url_without_password() {
        let config = AppConfig::from_yaml("redis:\n  password: \"\"\n").unwrap();
        assert_eq!(config.redis.connection_url(), "redis://127.0.0.1:6379/0");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config =
            AppConfig::from_yaml("redis:\n  password: hunter2\nsession:\n  token_secret: s3cret\n")
                .unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("s3cret"));
    }
}
