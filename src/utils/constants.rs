/// Kelvin to Celsius offset
pub const KELVIN_OFFSET: f64 = 273.15;

/// File names
pub const RAW_FILE_PREFIX: &str = "weather_data_";
pub const RAW_FILE_EXTENSION: &str = "csv";
pub const RAW_FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
pub const SUMMARY_FILE: &str = "daily_summary.csv";
pub const CHART_FILE: &str = "weather_chart.svg";
pub const DEFAULT_CONFIG_FILE: &str = "weather.toml";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "WEATHER";

/// Configuration defaults
pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/data/2.5";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_VISUALIZE_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TEMP_THRESHOLD: f64 = 35.0;

/// Chart size in pixels
pub const CHART_WIDTH: u32 = 1200;
pub const CHART_HEIGHT: u32 = 1200;
