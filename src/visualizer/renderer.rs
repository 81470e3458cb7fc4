use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, WeatherError};
use crate::utils::constants::{CHART_HEIGHT, CHART_WIDTH};
use crate::visualizer::ChartPoint;

/// Draws a set of points somewhere. Called once per refresh.
pub trait ChartRenderer {
    fn render(&mut self, points: &[ChartPoint]) -> Result<()>;
}

struct Panel {
    title: &'static str,
    y_label: &'static str,
    series_label: &'static str,
    value: fn(&ChartPoint) -> f64,
    annotation: fn(&ChartPoint) -> String,
}

const PANELS: [Panel; 3] = [
    Panel {
        title: "Temperature Overview",
        y_label: "Temperature (°C)",
        series_label: "Avg Temp (°C)",
        value: temperature,
        annotation: temperature_delta,
    },
    Panel {
        title: "Humidity Overview",
        y_label: "Humidity (%)",
        series_label: "Avg Humidity (%)",
        value: humidity,
        annotation: humidity_delta,
    },
    Panel {
        title: "Wind Speed Overview",
        y_label: "Wind Speed (m/s)",
        series_label: "Avg Wind Speed (m/s)",
        value: wind_speed,
        annotation: wind_delta,
    },
];

fn temperature(p: &ChartPoint) -> f64 {
    p.avg_temp
}

fn temperature_delta(p: &ChartPoint) -> String {
    format!("{:+.2}°C", p.temp_diff)
}

fn humidity(p: &ChartPoint) -> f64 {
    p.avg_humidity
}

fn humidity_delta(p: &ChartPoint) -> String {
    format!("{:+.2}%", p.humidity_diff)
}

fn wind_speed(p: &ChartPoint) -> f64 {
    p.avg_wind_speed
}

fn wind_delta(p: &ChartPoint) -> String {
    format!("{:+.2} m/s", p.wind_diff)
}

/// Renders the three stacked panels to an SVG file, replacing it each time.
pub struct SvgChartRenderer {
    output: PathBuf,
    size: (u32, u32),
}

impl SvgChartRenderer {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            size: (CHART_WIDTH, CHART_HEIGHT),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&mut self, points: &[ChartPoint]) -> Result<()> {
        if points.is_empty() {
            return Err(WeatherError::DataEmpty("Nothing to plot".to_string()));
        }

        if let Some(parent) = self.output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let root = SVGBackend::new(&self.output, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        let areas = root.split_evenly((PANELS.len(), 1));
        for (area, panel) in areas.iter().zip(PANELS.iter()) {
            draw_panel(area, panel, points)?;
        }

        root.present().map_err(chart_error)?;
        debug!(file = %self.output.display(), points = points.len(), "Rendered chart");
        Ok(())
    }
}

fn draw_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    panel: &Panel,
    points: &[ChartPoint],
) -> Result<()> {
    let values: Vec<f64> = points.iter().map(panel.value).collect();
    let (y_min, y_max) = padded_range(&values);
    let x_max = points.len() as f64 - 0.5;

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5f64..x_max, y_min..y_max)
        .map_err(chart_error)?;

    let x_label = |x: &f64| {
        let rounded = x.round();
        if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        points
            .get(rounded as usize)
            .map(|p| p.date.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .y_desc(panel.y_label)
        .x_labels(points.len() + 1)
        .x_label_formatter(&x_label)
        .draw()
        .map_err(chart_error)?;

    chart
        .draw_series(LineSeries::new(
            values.iter().enumerate().map(|(i, v)| (i as f64, *v)),
            &BLUE,
        ))
        .map_err(chart_error)?
        .label(panel.series_label)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    // Marker plus the change from the previous row just above it
    chart
        .draw_series(points.iter().zip(values.iter()).enumerate().map(|(i, (p, v))| {
            EmptyElement::at((i as f64, *v))
                + Circle::new((0, 0), 4, BLUE.filled())
                + Text::new((panel.annotation)(p), (-24, -22), ("sans-serif", 14).into_font())
        }))
        .map_err(chart_error)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(chart_error)?;

    Ok(())
}

/// Value range with headroom for annotations; flat data gets a ±1 band.
fn padded_range(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = if (max - min).abs() < f64::EPSILON {
        1.0
    } else {
        (max - min) * 0.15
    };
    (min - pad, max + pad)
}

fn chart_error<E: std::fmt::Display>(e: E) -> WeatherError {
    WeatherError::Chart(e.to_string())
}
