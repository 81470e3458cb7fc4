use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::{Result, WeatherError};
use crate::fetchers::WeatherSource;
use crate::models::{kelvin_to_celsius, WeatherReading};
use crate::settings::Settings;

/// Client for the OpenWeatherMap current-weather endpoint.
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| WeatherError::Network {
                city: String::from("<client setup>"),
                source,
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            &settings.base_url,
            &settings.api_key,
            settings.request_timeout(),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/weather", self.base_url)
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn fetch(&self, city: &str) -> Result<WeatherReading> {
        let network_error = |source| WeatherError::Network {
            city: city.to_string(),
            source,
        };

        let response = self
            .client
            .get(self.endpoint())
            .query(&[("q", city), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::HttpStatus {
                city: city.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(network_error)?;
        let json: Value =
            serde_json::from_str(&body).map_err(|_| WeatherError::schema(city, "<json body>"))?;

        let reading = parse_current_weather(city, &json)?;
        debug!(
            city,
            temperature_c = reading.temperature_c,
            condition = %reading.condition,
            "Fetched reading"
        );
        Ok(reading)
    }
}

/// Build a reading from a current-weather response body.
///
/// Temperatures arrive in Kelvin. Every field is required; the first one
/// missing is reported.
pub fn parse_current_weather(city: &str, body: &Value) -> Result<WeatherReading> {
    let condition = body
        .pointer("/weather/0/main")
        .and_then(Value::as_str)
        .ok_or_else(|| WeatherError::schema(city, "weather[0].main"))?;

    let temp_k = required_f64(body, city, "/main/temp", "main.temp")?;
    let feels_like_k = required_f64(body, city, "/main/feels_like", "main.feels_like")?;
    let humidity = required_f64(body, city, "/main/humidity", "main.humidity")?;
    let wind_speed = required_f64(body, city, "/wind/speed", "wind.speed")?;
    let observed_at = body
        .pointer("/dt")
        .and_then(Value::as_i64)
        .ok_or_else(|| WeatherError::schema(city, "dt"))?;

    Ok(WeatherReading::new(
        city.to_string(),
        condition.to_string(),
        kelvin_to_celsius(temp_k),
        kelvin_to_celsius(feels_like_k),
        humidity.round() as i64,
        wind_speed,
        observed_at,
    ))
}

fn required_f64(body: &Value, city: &str, pointer: &str, field: &str) -> Result<f64> {
    body.pointer(pointer)
        .and_then(Value::as_f64)
        .ok_or_else(|| WeatherError::schema(city, field))
}
