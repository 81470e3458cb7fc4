use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use validator::Validate;

use crate::error::Result;
use crate::utils::constants::{
    CHART_FILE, DEFAULT_BASE_URL, DEFAULT_CONFIG_FILE, DEFAULT_DATA_DIR, DEFAULT_INTERVAL_SECS,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TEMP_THRESHOLD, DEFAULT_VISUALIZE_INTERVAL_SECS,
    ENV_PREFIX, SUMMARY_FILE,
};

/// Runtime settings, loaded once at startup.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(length(min = 1, message = "an API key is required"))]
    pub api_key: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "at least one city is required"))]
    pub cities: Vec<String>,

    #[serde(default = "default_interval_secs")]
    #[validate(range(min = 1))]
    pub interval_secs: u64,

    /// Alert when a reading is strictly above this (°C)
    #[serde(default = "default_temp_threshold")]
    pub temp_threshold: f64,

    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_base_url")]
    #[validate(length(min = 1))]
    pub base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,

    #[serde(default = "default_visualize_interval_secs")]
    #[validate(range(min = 1))]
    pub visualize_interval_secs: u64,
}

fn default_interval_secs() -> u64 {
    DEFAULT_INTERVAL_SECS
}

fn default_temp_threshold() -> f64 {
    DEFAULT_TEMP_THRESHOLD
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_visualize_interval_secs() -> u64 {
    DEFAULT_VISUALIZE_INTERVAL_SECS
}

impl Settings {
    /// Settings with defaults for everything but the key and cities.
    pub fn new(api_key: impl Into<String>, cities: Vec<String>) -> Self {
        Self {
            api_key: api_key.into(),
            cities,
            interval_secs: default_interval_secs(),
            temp_threshold: default_temp_threshold(),
            data_dir: default_data_dir(),
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            visualize_interval_secs: default_visualize_interval_secs(),
        }
    }

    /// Load from a config file layered under `WEATHER_*` environment variables.
    ///
    /// An explicit path must exist; without one, `weather.toml` in the
    /// working directory is used when present. Only the numeric limits are
    /// checked here; commands that poll the API call [`Settings::require_api`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file_source = match path {
            Some(p) => File::from(p),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = Config::builder()
            .add_source(file_source)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cities"),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.check_limits()?;

        debug!(
            cities = ?settings.cities,
            interval_secs = settings.interval_secs,
            temp_threshold = settings.temp_threshold,
            data_dir = %settings.data_dir.display(),
            "Loaded settings"
        );

        Ok(settings)
    }

    /// Full validation, including the API key and city list.
    pub fn require_api(&self) -> Result<()> {
        self.validate()?;
        Ok(())
    }

    fn check_limits(&self) -> Result<()> {
        match self.validate() {
            Ok(()) => Ok(()),
            Err(errors) => {
                let field_errors = errors.field_errors();
                let limits_only = field_errors
                    .keys()
                    .all(|field| matches!(field.to_string().as_str(), "api_key" | "cities"));
                if limits_only {
                    Ok(())
                } else {
                    Err(errors.into())
                }
            }
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn visualize_interval(&self) -> Duration {
        Duration::from_secs(self.visualize_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.data_dir.join(SUMMARY_FILE)
    }

    pub fn chart_path(&self) -> PathBuf {
        self.data_dir.join(CHART_FILE)
    }
}
