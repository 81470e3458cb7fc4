use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WeatherError};
use crate::utils::constants::KELVIN_OFFSET;

/// One city's observation from a single poll. Persisted as one raw CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub city: String,
    pub condition: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: i64,
    pub wind_speed: f64,
    /// Epoch seconds as reported by the API
    pub observed_at: i64,
}

impl WeatherReading {
    pub fn new(
        city: String,
        condition: String,
        temperature_c: f64,
        feels_like_c: f64,
        humidity_pct: i64,
        wind_speed: f64,
        observed_at: i64,
    ) -> Self {
        Self {
            city,
            condition,
            temperature_c,
            feels_like_c,
            humidity_pct,
            wind_speed,
            observed_at,
        }
    }

    /// Calendar date (UTC) the reading belongs to.
    pub fn date(&self) -> Result<NaiveDate> {
        DateTime::<Utc>::from_timestamp(self.observed_at, 0)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| {
                WeatherError::InvalidFormat(format!(
                    "Timestamp {} for {} is out of range",
                    self.observed_at, self.city
                ))
            })
    }

    pub fn exceeds(&self, threshold: f64) -> bool {
        self.temperature_c > threshold
    }
}

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}
