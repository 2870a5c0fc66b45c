use serde::Deserialize;
use service_core::config::{load_layered, TelemetrySettings};
use service_core::error::AppError;
use std::time::Duration;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024
}

#[derive(Deserialize, Clone, Debug)]
pub struct BackendSettings {
    /// Base URL of the document processing backend, without trailing slash.
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl BackendSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub fn get_configuration() -> Result<Settings, AppError> {
    let base_path = std::env::current_dir()?;

    // Allow running from the workspace root or from the crate directory
    let configuration_directory = if base_path.ends_with("document-assistant") {
        base_path.join("config")
    } else {
        base_path.join("document-assistant").join("config")
    };

    load_layered(&configuration_directory)
}
