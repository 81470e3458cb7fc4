use chrono::{Duration, NaiveDate};

use crate::models::DailySummary;

/// One plotted row with its change from the previous row.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub avg_temp: f64,
    pub temp_diff: f64,
    pub avg_humidity: f64,
    pub humidity_diff: f64,
    pub avg_wind_speed: f64,
    pub wind_diff: f64,
}

/// Difference from the previous value; the first entry is 0.
pub fn first_differences(values: &[f64]) -> Vec<f64> {
    let mut diffs = Vec::with_capacity(values.len());
    let mut previous: Option<f64> = None;
    for &value in values {
        diffs.push(previous.map_or(0.0, |p| value - p));
        previous = Some(value);
    }
    diffs
}

/// Summary rows dated within the `window_days` days ending on `today`.
/// A window of 1 keeps only today's rows.
pub fn rows_in_window(
    rows: Vec<DailySummary>,
    today: NaiveDate,
    window_days: u32,
) -> Vec<DailySummary> {
    let first_day = today - Duration::days(i64::from(window_days.max(1)) - 1);
    rows.into_iter()
        .filter(|row| row.date >= first_day && row.date <= today)
        .collect()
}

pub fn build_points(rows: &[DailySummary]) -> Vec<ChartPoint> {
    let temps: Vec<f64> = rows.iter().map(|r| r.avg_temp).collect();
    let humidity: Vec<f64> = rows.iter().map(|r| r.avg_humidity).collect();
    let wind: Vec<f64> = rows.iter().map(|r| r.avg_wind_speed).collect();

    let temp_diff = first_differences(&temps);
    let humidity_diff = first_differences(&humidity);
    let wind_diff = first_differences(&wind);

    rows.iter()
        .enumerate()
        .map(|(i, row)| ChartPoint {
            date: row.date,
            avg_temp: row.avg_temp,
            temp_diff: temp_diff[i],
            avg_humidity: row.avg_humidity,
            humidity_diff: humidity_diff[i],
            avg_wind_speed: row.avg_wind_speed,
            wind_diff: wind_diff[i],
        })
        .collect()
}
