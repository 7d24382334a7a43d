//! Server configuration: YAML file layered under `MARKETPLACE_` environment variables

use anyhow::Context;
use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use marketplace_service::Config;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,

    /// Any SeaORM connection string; Postgres and SQLite are compiled in
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub marketplace: Config,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8087))
}

fn default_database_url() -> String {
    "sqlite://marketplace.db?mode=rwc".to_string()
}

fn default_log_level() -> String {
    "info,sqlx=warn".to_string()
}

impl AppConfig {
    /// Load `path` (if it exists) and apply environment overrides such as
    /// `MARKETPLACE_DATABASE_URL` or `MARKETPLACE_MARKETPLACE__CSRF_TOKEN`
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        Self::from_figment(
            Figment::new()
                .merge(Yaml::file(path))
                .merge(Env::prefixed("MARKETPLACE_").split("__")),
        )
        .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    fn from_figment(figment: Figment) -> anyhow::Result<Self> {
        Ok(figment.extract()?)
    }
}
