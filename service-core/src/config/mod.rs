use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Logging and trace export settings shared by every service.
#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP collector endpoint. Spans are only exported when this is set.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load settings from `<config_dir>/base.yaml`, overridden by `APP_`-prefixed
/// environment variables (`APP_BACKEND__URL` sets `backend.url`).
pub fn load_layered<T: DeserializeOwned>(config_dir: &Path) -> Result<T, AppError> {
    dotenvy::dotenv().ok();

    let config = Cfg::builder()
        .add_source(File::from(config_dir.join("base.yaml")).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}
