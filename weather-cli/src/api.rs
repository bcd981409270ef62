//! Client-side wrapper around the proxy's HTTP surface.
//!
//! The mirror image of the server's error mapping: every transport or HTTP
//! failure becomes an [`ApiError`] with a message fit for an error banner.
//! No retries and no caching; each call is independent and terminal.

use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use weather_core::{CitiesResponse, ErrorBody, ForecastRecord, HealthResponse, WeatherRecord};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Deadline for weather and forecast calls.
const WEATHER_TIMEOUT: Duration = Duration::from_secs(15);
/// Health should answer quickly; give it a shorter leash.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

/// What a proxy call can fail with, from the caller's point of view.
///
/// `Timeout` and `Unreachable` are deliberately distinct: one means the
/// backend is up but slow, the other that it could not be reached at all.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected locally, before any network round-trip.
    #[error("City name is required and cannot be empty")]
    InvalidInput,

    #[error("Request timed out. Please try again.")]
    Timeout,

    #[error("Unable to connect to the weather service. Please make sure the backend server is running.")]
    Unreachable,

    /// The proxy answered with a non-success status; `message` is the body's
    /// message when one could be parsed, otherwise synthesized from the status.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build proxy HTTP client")?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.get_json("health", HEALTH_TIMEOUT).await
    }

    /// Weather for the proxy's default city list. Best-effort on the server
    /// side: the list can be shorter than the default set, never an error
    /// for partial failure.
    pub async fn cities(&self) -> Result<Vec<WeatherRecord>, ApiError> {
        let response: CitiesResponse = self.get_json("weather/cities", WEATHER_TIMEOUT).await?;
        Ok(response.cities)
    }

    pub async fn search(&self, city: &str) -> Result<WeatherRecord, ApiError> {
        let city = validate_city(city)?;
        self.get_json(&format!("weather/search/{city}"), WEATHER_TIMEOUT)
            .await
    }

    pub async fn forecast(&self, city: &str) -> Result<ForecastRecord, ApiError> {
        let city = validate_city(city)?;
        self.get_json(&format!("weather/forecast/{city}"), WEATHER_TIMEOUT)
            .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        timeout: Duration,
    ) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, path);

        let res = self
            .http
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = res.status();
        let body = res.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            return Err(map_error_body(status.as_u16(), &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| ApiError::Unexpected(format!("invalid response body: {e}")))
    }
}

fn validate_city(city: &str) -> Result<&str, ApiError> {
    let trimmed = city.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput);
    }
    Ok(trimmed)
}

fn map_transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else if err.is_connect() {
        ApiError::Unreachable
    } else {
        ApiError::Unexpected(err.to_string())
    }
}

/// Prefer the body's own message; fall back to a generic line synthesized
/// from the status code when the body is not a recognizable error shape.
fn map_error_body(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| if b.message.is_empty() { b.error } else { b.message })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Server error: HTTP {status}"));

    ApiError::Api { status, message }
}
