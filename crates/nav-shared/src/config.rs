//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_MAX_SLUG_ATTEMPTS, DEFAULT_MAX_WRITE_RETRIES, DEFAULT_QUICK_ADD_LIMIT,
    MAX_QUICK_ADD_LIMIT,
};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub navigation: NavigationSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Directory for rolling log files; stdout only when unset.
    #[serde(default)]
    pub log_dir: Option<String>,
    /// Browser origins allowed to call the API.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    /// Empty selects the in-process store (nothing survives a restart).
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Apply bundled migrations on startup.
    #[serde(default)]
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NavigationSettings {
    pub quick_add_limit: u32,
    pub max_slug_attempts: u32,
    pub max_write_retries: u32,
    /// Prefix for canonical content URLs, e.g. `https://shop.example`.
    #[serde(default)]
    pub site_base_url: String,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            quick_add_limit: DEFAULT_QUICK_ADD_LIMIT,
            max_slug_attempts: DEFAULT_MAX_SLUG_ATTEMPTS,
            max_write_retries: DEFAULT_MAX_WRITE_RETRIES,
            site_base_url: String::new(),
        }
    }
}

impl NavigationSettings {
    /// Quick-add cap clamped to a sane range.
    pub fn effective_quick_add_limit(&self) -> u32 {
        self.quick_add_limit.clamp(1, MAX_QUICK_ADD_LIMIT)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        Self::builder(&env)?.build()?.try_deserialize()
    }

    fn builder(env: &str) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let builder = Config::builder()
            .set_default("app.env", env)?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "nav-server")?
            .set_default("database.url", "postgres://localhost/navigation")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.run_migrations", true)?
            .set_default("navigation.quick_add_limit", i64::from(DEFAULT_QUICK_ADD_LIMIT))?
            .set_default("navigation.max_slug_attempts", i64::from(DEFAULT_MAX_SLUG_ATTEMPTS))?
            .set_default("navigation.max_write_retries", i64::from(DEFAULT_MAX_WRITE_RETRIES))?
            .set_default("navigation.site_base_url", "")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true));
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize() {
        let config: AppConfig = AppConfig::builder("test")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.app.env, "test");
        assert_eq!(config.navigation.quick_add_limit, DEFAULT_QUICK_ADD_LIMIT);
        assert_eq!(config.navigation.max_slug_attempts, DEFAULT_MAX_SLUG_ATTEMPTS);
        assert!(config.app.log_dir.is_none());
        assert!(config.app.cors_origins.is_empty());
    }

    #[test]
    fn test_quick_add_limit_is_clamped() {
        let mut settings = NavigationSettings::default();
        settings.quick_add_limit = 0;
        assert_eq!(settings.effective_quick_add_limit(), 1);
        settings.quick_add_limit = 10_000;
        assert_eq!(settings.effective_quick_add_limit(), MAX_QUICK_ADD_LIMIT);
    }
}
