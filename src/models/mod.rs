pub mod alert;
pub mod reading;
pub mod summary;

pub use alert::AlertEvent;
pub use reading::{kelvin_to_celsius, WeatherReading};
pub use summary::{dominant_condition, DailySummary};
