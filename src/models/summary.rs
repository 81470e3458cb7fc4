use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WeatherError};
use crate::models::WeatherReading;

/// Aggregate statistics for one calendar date. One row of `daily_summary.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub avg_temp: f64,
    pub max_temp: f64,
    pub min_temp: f64,
    pub avg_humidity: f64,
    pub max_humidity: i64,
    pub min_humidity: i64,
    pub avg_wind_speed: f64,
    pub max_wind_speed: f64,
    pub min_wind_speed: f64,
    pub dominant_condition: String,
}

impl DailySummary {
    /// Compute the summary for `date` from that date's readings, in encounter order.
    pub fn from_readings(date: NaiveDate, readings: &[&WeatherReading]) -> Result<Self> {
        if readings.is_empty() {
            return Err(WeatherError::DataEmpty(format!("No readings for {}", date)));
        }

        let count = readings.len() as f64;
        let mut temp_sum = 0.0;
        let mut max_temp = f64::NEG_INFINITY;
        let mut min_temp = f64::INFINITY;
        let mut humidity_sum = 0i64;
        let mut max_humidity = i64::MIN;
        let mut min_humidity = i64::MAX;
        let mut wind_sum = 0.0;
        let mut max_wind_speed = f64::NEG_INFINITY;
        let mut min_wind_speed = f64::INFINITY;

        for r in readings {
            temp_sum += r.temperature_c;
            max_temp = max_temp.max(r.temperature_c);
            min_temp = min_temp.min(r.temperature_c);

            humidity_sum += r.humidity_pct;
            max_humidity = max_humidity.max(r.humidity_pct);
            min_humidity = min_humidity.min(r.humidity_pct);

            wind_sum += r.wind_speed;
            max_wind_speed = max_wind_speed.max(r.wind_speed);
            min_wind_speed = min_wind_speed.min(r.wind_speed);
        }

        Ok(Self {
            date,
            avg_temp: temp_sum / count,
            max_temp,
            min_temp,
            avg_humidity: humidity_sum as f64 / count,
            max_humidity,
            min_humidity,
            avg_wind_speed: wind_sum / count,
            max_wind_speed,
            min_wind_speed,
            dominant_condition: dominant_condition(readings.iter().map(|r| r.condition.as_str()))
                .unwrap_or_default(),
        })
    }

    pub fn summary_line(&self) -> String {
        format!(
            "{}: temp avg={:.1}°C min={:.1}°C max={:.1}°C, humidity avg={:.0}% ({}-{}%), wind avg={:.1} m/s ({:.1}-{:.1}), mostly {}",
            self.date,
            self.avg_temp,
            self.min_temp,
            self.max_temp,
            self.avg_humidity,
            self.min_humidity,
            self.max_humidity,
            self.avg_wind_speed,
            self.min_wind_speed,
            self.max_wind_speed,
            self.dominant_condition
        )
    }
}

/// Most frequent label; on a tie the label seen first wins.
pub fn dominant_condition<'a, I>(conditions: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    // (label, count) in first-seen order
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for condition in conditions {
        match counts.iter_mut().find(|(label, _)| *label == condition) {
            Some((_, count)) => *count += 1,
            None => counts.push((condition, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (label, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label.to_string())
}
