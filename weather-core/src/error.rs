use thiserror::Error;

use crate::model::ErrorBody;

/// Everything that can go wrong between a caller and the upstream provider.
///
/// Every upstream failure mode collapses into one of these variants before a
/// response leaves the proxy; no raw reqwest or serde error escapes.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Empty or whitespace-only city name, rejected before any network call.
    #[error("City name is required and cannot be empty")]
    InvalidInput,

    /// The upstream provider has no match for this city.
    #[error("Could not find weather data for \"{0}\". Please check the spelling and try again.")]
    NotFound(String),

    /// The server lacks a (valid) provider API key. Covers both a missing
    /// key in the environment and an upstream 401; never the caller's fault.
    #[error("Weather provider API key is not configured. Please contact the administrator.")]
    Misconfigured,

    /// Upstream 429.
    #[error("API rate limit exceeded. Please try again later.")]
    RateLimited,

    /// The upstream call exceeded its deadline and was abandoned.
    #[error("The weather service is taking too long to respond. Please try again.")]
    Timeout,

    /// Any other upstream failure: unexpected status, network fault,
    /// unparseable payload. Carries the raw provider message when present.
    #[error("Weather service error: {0}")]
    Upstream(String),
}

impl WeatherError {
    /// HTTP status the proxy answers with for this error.
    pub fn status(&self) -> u16 {
        match self {
            WeatherError::InvalidInput => 400,
            WeatherError::NotFound(_) => 404,
            WeatherError::Timeout => 408,
            WeatherError::RateLimited => 429,
            WeatherError::Misconfigured | WeatherError::Upstream(_) => 500,
        }
    }

    /// Short category string, the `error` field of the wire body.
    pub fn kind(&self) -> &'static str {
        match self {
            WeatherError::InvalidInput => "Invalid city name",
            WeatherError::NotFound(_) => "City not found",
            WeatherError::Misconfigured => "Server configuration error",
            WeatherError::RateLimited => "Too many requests",
            WeatherError::Timeout => "Request timeout",
            WeatherError::Upstream(_) => "Weather service error",
        }
    }

    /// JSON body the proxy sends for this error.
    pub fn to_body(&self) -> ErrorBody {
        let mut body = ErrorBody::new(self.kind(), self.to_string());
        if matches!(self, WeatherError::NotFound(_)) {
            body.suggestions = Some(
                "Try using the full city name or include the country (e.g. \"Paris, France\")"
                    .to_string(),
            );
        }
        body
    }
}
