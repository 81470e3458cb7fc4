use tracing::warn;

use crate::models::{AlertEvent, WeatherReading};

pub struct AlertChecker {
    threshold: f64,
}

impl AlertChecker {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Lazily yield one event per reading strictly above the threshold,
    /// logging a notification as each event is produced.
    pub fn check<'a>(
        &self,
        readings: &'a [WeatherReading],
    ) -> impl Iterator<Item = AlertEvent> + 'a {
        let threshold = self.threshold;
        readings
            .iter()
            .filter(move |r| r.exceeds(threshold))
            .map(move |r| {
                let event = AlertEvent {
                    city: r.city.clone(),
                    temperature_c: r.temperature_c,
                    threshold,
                };
                warn!(
                    city = %event.city,
                    temperature_c = event.temperature_c,
                    threshold,
                    "Alert! {}",
                    event
                );
                event
            })
    }
}
