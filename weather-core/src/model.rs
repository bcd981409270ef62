use serde::{Deserialize, Serialize};

/// Geographic position of a resolved place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Flat current-weather record, the shape consumed by the dashboard.
///
/// A record is only ever built from a complete upstream response; there is
/// no partially-populated variant. Field names serialize in camelCase to
/// match the JSON contract between proxy and dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    /// Provider's location identifier.
    pub id: i64,
    /// Resolved place name.
    pub city: String,
    /// ISO country code.
    pub country: String,
    /// Rounded Celsius.
    pub temperature: i32,
    /// Rounded Celsius.
    pub feels_like: i32,
    /// Short condition text, e.g. "light rain".
    pub description: String,
    /// Provider icon code, e.g. "10d".
    pub icon: String,
    /// Percent.
    pub humidity: u8,
    /// Meters per second.
    pub wind_speed: f64,
    /// hPa.
    pub pressure: u32,
    /// Kilometers, rounded. Absent whenever the provider omitted it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<u32>,
    pub coordinates: Coordinates,
}

/// One 3-hour slot of a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastEntry {
    /// Provider-formatted timestamp, e.g. "2024-05-01 12:00:00".
    pub date: String,
    /// Rounded Celsius.
    pub temperature: i32,
    pub description: String,
    pub icon: String,
    pub humidity: u8,
    pub wind_speed: f64,
}

/// Roughly 24 hours of forecast for one city: the first 8 three-hour slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub city: String,
    pub country: String,
    pub forecast: Vec<ForecastEntry>,
}

/// Body of `GET /api/weather/cities`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitiesResponse {
    pub cities: Vec<WeatherRecord>,
}

/// Body of `GET /api/health`. Returned 200 even when the API key is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    /// RFC 3339.
    pub timestamp: String,
    pub api_key_configured: bool,
}

/// JSON error body emitted by the proxy and parsed back by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Short error category, e.g. "City not found".
    pub error: String,
    /// Human-readable message suitable for a UI banner.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_endpoints: Option<Vec<String>>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            suggestions: None,
            details: None,
            available_endpoints: None,
        }
    }
}
