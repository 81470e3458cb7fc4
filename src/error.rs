use thiserror::Error;

pub type Result<T> = std::result::Result<T, WeatherError>;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Network request failed for {city}: {source}")]
    Network {
        city: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Weather API returned HTTP {status} for {city}")]
    HttpStatus {
        city: String,
        status: reqwest::StatusCode,
    },

    #[error("Unexpected API response for {city}: missing or invalid field '{field}'")]
    Schema { city: String, field: String },

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("No data available: {0}")]
    DataEmpty(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Chart rendering error: {0}")]
    Chart(String),

    #[error("Logging setup error: {0}")]
    Logging(String),
}

impl WeatherError {
    pub fn schema(city: &str, field: &str) -> Self {
        WeatherError::Schema {
            city: city.to_string(),
            field: field.to_string(),
        }
    }

    /// True for the "nothing to show yet" condition the visualizer recovers from.
    pub fn is_data_empty(&self) -> bool {
        matches!(self, WeatherError::DataEmpty(_))
    }
}
