use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::WeatherError;
use crate::model::{ForecastRecord, WeatherRecord};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Abstraction over the upstream weather data source.
///
/// Implementations own the wire details (endpoints, payload shape, per-call
/// deadline) and hand back fully normalized records. Every failure mode must
/// already be mapped to a [`WeatherError`] variant by the time it crosses
/// this boundary.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current weather for a city name, normalized.
    async fn current(&self, city: &str) -> Result<WeatherRecord, WeatherError>;

    /// Forecast for a city name, truncated to the first 8 three-hour slots.
    async fn forecast(&self, city: &str) -> Result<ForecastRecord, WeatherError>;
}
