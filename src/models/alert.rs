use serde::Serialize;
use std::fmt;

/// A reading whose temperature went above the configured threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEvent {
    pub city: String,
    pub temperature_c: f64,
    pub threshold: f64,
}

impl fmt::Display for AlertEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Temperature in {} is {:.1}°C, above the {:.1}°C threshold",
            self.city, self.temperature_c, self.threshold
        )
    }
}
