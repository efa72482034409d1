//! src/configuration.rs
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
};
use std::path::Path;

#[derive(serde::Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Settings {
    pub pipeline: PipelineSettings,
    pub telemetry: TelemetrySettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
#[serde(default)]
pub struct PipelineSettings {
    /// Map and reduce parallelism. `1` runs everything on the calling thread.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub workers: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub split_size_in_bytes: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub reduce_tasks: usize,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub max_rejected_records: Option<u64>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        PipelineSettings {
            workers: std::thread::available_parallelism()
                .map(usize::from)
                .unwrap_or(1),
            split_size_in_bytes: 64 * 1024 * 1024,
            reduce_tasks: 1,
            max_rejected_records: None,
        }
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
#[serde(default)]
pub struct TelemetrySettings {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        TelemetrySettings {
            log_level: "info".to_string(),
            otlp_endpoint: None,
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("Failed to determine the current directory: {e}")))?;
    get_configuration_from(&base_path.join("configuration"))
}

/// `base.yaml` in `config_dir` is optional; `LISTINGS_`-prefixed environment
/// variables win over it, e.g. `LISTINGS_PIPELINE__WORKERS=8`.
pub fn get_configuration_from(config_dir: &Path) -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(config_dir.join("base.yaml")).required(false))
        .add_source(
            config::Environment::with_prefix("LISTINGS")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    settings.try_deserialize::<Settings>()
}
