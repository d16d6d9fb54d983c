//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section; every field carries a serde default so an empty file loads.

pub mod api;
pub mod console;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::api::ApiConfig;
pub use self::console::ConsoleConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;
use crate::types::MAX_PAGE_SIZE;

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration
/// (default.toml + environment overlay + `SCHOOLHUB__*` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend API connection settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// List screen and dashboard settings.
    #[serde(default)]
    pub console: ConsoleConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the given file plus an environment overlay.
    ///
    /// `path` is passed to the `config` crate without extension, so both
    /// `config/default` and `config/default.toml` work. The overlay
    /// `config/{env}` is optional. Environment variables prefixed with
    /// `SCHOOLHUB__` override both.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let path = path.trim_end_matches(".toml");
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SCHOOLHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::configuration("api.base_url must not be empty"));
        }
        if self.api.timeout_seconds == 0 {
            return Err(AppError::configuration(
                "api.timeout_seconds must be positive",
            ));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.console.default_page_size) {
            return Err(AppError::configuration(format!(
                "console.default_page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        if let Some((name, _)) = self
            .console
            .page_sizes
            .iter()
            .find(|(_, size)| !(1..=MAX_PAGE_SIZE).contains(*size))
        {
            return Err(AppError::configuration(format!(
                "console.page_sizes.{name} must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        if self.console.refresh_interval_seconds == 0 {
            return Err(AppError::configuration(
                "console.refresh_interval_seconds must be positive",
            ));
        }
        Ok(())
    }
}
