pub mod openweather;

pub use openweather::{parse_current_weather, OpenWeatherClient};

use async_trait::async_trait;

use crate::error::Result;
use crate::models::WeatherReading;

/// Anything that can produce the current reading for a city.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch(&self, city: &str) -> Result<WeatherReading>;
}
