use futures_util::future::join_all;

use crate::error::WeatherError;
use crate::model::{ForecastRecord, WeatherRecord};
use crate::provider::WeatherProvider;

/// The proxy's core: input validation plus orchestration of upstream calls.
///
/// Holds no per-request state; every call works on its own data, so one
/// service value can serve any number of concurrent requests.
#[derive(Debug)]
pub struct WeatherService {
    provider: Box<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Best-effort batch lookup: one upstream call per name, all in flight
    /// at once, joined without short-circuiting. A city whose call fails is
    /// logged and dropped; the survivors keep the input order. Callers get
    /// no error signal for partial failure.
    pub async fn list<S: AsRef<str>>(&self, cities: &[S]) -> Vec<WeatherRecord> {
        let lookups = cities.iter().map(|city| {
            let city = city.as_ref();
            async move { (city, self.provider.current(city).await) }
        });

        join_all(lookups)
            .await
            .into_iter()
            .filter_map(|(city, result)| match result {
                Ok(record) => Some(record),
                Err(err) => {
                    log::warn!("Skipping {city}: {err}");
                    None
                }
            })
            .collect()
    }

    /// Current weather for one city. Rejects blank input before any
    /// network traffic.
    pub async fn search(&self, city: &str) -> Result<WeatherRecord, WeatherError> {
        let city = validate_city(city)?;
        self.provider.current(city).await
    }

    /// Next ~24h forecast for one city, same validation and error mapping
    /// as [`Self::search`].
    pub async fn forecast(&self, city: &str) -> Result<ForecastRecord, WeatherError> {
        let city = validate_city(city)?;
        self.provider.forecast(city).await
    }
}

fn validate_city(city: &str) -> Result<&str, WeatherError> {
    let trimmed = city.trim();
    if trimmed.is_empty() {
        return Err(WeatherError::InvalidInput);
    }
    Ok(trimmed)
}
