pub mod cli;
pub mod error;
pub mod fetchers;
pub mod models;
pub mod processors;
pub mod readers;
pub mod scheduler;
pub mod settings;
pub mod utils;
pub mod visualizer;
pub mod writers;

pub use error::{Result, WeatherError};
