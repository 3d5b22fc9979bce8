//! Configuration management module.
//!
//! Supports loading configuration from:
//! - TOML files (config/default.toml, config/{profile}.toml)
//! - Environment variables with `PARKING_SERVICE__<SECTION>__<KEY>` pattern
//! - `PORT`, which overrides `server.port`

mod billing;
mod server;
mod storage;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use billing::BillingConfig;
pub use server::ServerConfig;
pub use storage::{StorageBackend, StorageConfig};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Ticket storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Rate configuration.
    #[serde(default)]
    pub billing: BillingConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// `PORT` value to apply over `server.port`; blank values are ignored.
fn port_override(value: Option<String>) -> Option<String> {
    value
        .map(|port| port.trim().to_string())
        .filter(|port| !port.is_empty())
}

impl AppConfig {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. `config/default.toml`
    /// 2. `config/{PARKING_PROFILE}.toml` (if `PARKING_PROFILE` is set)
    /// 3. Environment variables with `PARKING_SERVICE__` prefix
    /// 4. `PORT`
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let profile =
            std::env::var("PARKING_PROFILE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{profile}")).required(false))
            // PARKING_SERVICE__BILLING__HOURLY_RATE=12.5 -> billing.hourly_rate = 12.5
            .add_source(
                Environment::with_prefix("PARKING_SERVICE")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", port_override(std::env::var("PORT").ok()))?
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("server.port cannot be 0".to_string()));
        }

        self.storage.validate()?;
        self.billing.validate()?;

        Ok(())
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "text" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Install the Prometheus recorder and serve `/metrics` from it.
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

const fn default_metrics_enabled() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            metrics_enabled: default_metrics_enabled(),
        }
    }
}
