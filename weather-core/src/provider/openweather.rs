use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::WeatherError;
use crate::model::{Coordinates, ForecastEntry, ForecastRecord, WeatherRecord};

use super::WeatherProvider;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Per-call deadline for upstream requests. A call that overruns it is
/// abandoned and reported as [`WeatherError::Timeout`]; no cancel signal is
/// sent upstream.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// OpenWeather client: issues `/weather` and `/forecast` calls in metric
/// units and normalizes the raw payloads into flat records.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>) -> anyhow::Result<Self> {
        Self::with_timeout(api_key, UPSTREAM_TIMEOUT)
    }

    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build upstream HTTP client")?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
        })
    }

    /// Point the client at a different upstream, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch(&self, endpoint: &str, city: &str) -> Result<String, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = res.status();
        let body = res.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            return Err(map_status(status, city, &body));
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, city: &str) -> Result<WeatherRecord, WeatherError> {
        let body = self.fetch("weather", city).await?;

        let raw: OwCurrent = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Upstream(format!("unexpected current payload: {e}")))?;

        Ok(normalize_current(raw))
    }

    async fn forecast(&self, city: &str) -> Result<ForecastRecord, WeatherError> {
        let body = self.fetch("forecast", city).await?;

        let raw: OwForecast = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Upstream(format!("unexpected forecast payload: {e}")))?;

        Ok(normalize_forecast(raw))
    }
}

fn map_transport_error(err: reqwest::Error) -> WeatherError {
    if err.is_timeout() {
        WeatherError::Timeout
    } else {
        WeatherError::Upstream(err.to_string())
    }
}

fn map_status(status: StatusCode, city: &str, body: &str) -> WeatherError {
    match status {
        StatusCode::NOT_FOUND => WeatherError::NotFound(city.to_string()),
        // A rejected key is our configuration problem, not the caller's.
        StatusCode::UNAUTHORIZED => WeatherError::Misconfigured,
        StatusCode::TOO_MANY_REQUESTS => WeatherError::RateLimited,
        other => WeatherError::Upstream(
            provider_message(body)
                .unwrap_or_else(|| format!("upstream returned status {}", other.as_u16())),
        ),
    }
}

/// OpenWeather error bodies carry a human-readable `message` field.
fn provider_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct OwError {
        message: String,
    }

    serde_json::from_str::<OwError>(body)
        .ok()
        .map(|e| e.message)
        .filter(|m| !m.is_empty())
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrent {
    id: i64,
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwCondition>,
    wind: OwWind,
    coord: OwCoord,
    /// Meters. OpenWeather omits this field under some conditions.
    visibility: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwSlot {
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwCondition>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecast {
    city: OwCity,
    list: Vec<OwSlot>,
}

fn condition(weather: &[OwCondition]) -> (String, String) {
    weather.first().map_or_else(
        || ("Unknown".to_string(), String::new()),
        |w| (w.description.clone(), w.icon.clone()),
    )
}

/// Either every field of the record is populated from the payload or the
/// payload fails to parse; there is no partial outcome.
fn normalize_current(raw: OwCurrent) -> WeatherRecord {
    let (description, icon) = condition(&raw.weather);

    WeatherRecord {
        id: raw.id,
        city: raw.name,
        country: raw.sys.country,
        temperature: raw.main.temp.round() as i32,
        feels_like: raw.main.feels_like.round() as i32,
        description,
        icon,
        humidity: raw.main.humidity,
        wind_speed: raw.wind.speed,
        pressure: raw.main.pressure,
        visibility: raw.visibility.map(|meters| (meters / 1000.0).round() as u32),
        coordinates: Coordinates {
            lat: raw.coord.lat,
            lon: raw.coord.lon,
        },
    }
}

/// Roughly the next 24 hours: the first 8 three-hour slots.
const FORECAST_SLOTS: usize = 8;

fn normalize_forecast(raw: OwForecast) -> ForecastRecord {
    let forecast = raw
        .list
        .into_iter()
        .take(FORECAST_SLOTS)
        .map(|slot| {
            let (description, icon) = condition(&slot.weather);
            ForecastEntry {
                date: slot.dt_txt,
                temperature: slot.main.temp.round() as i32,
                description,
                icon,
                humidity: slot.main.humidity,
                wind_speed: slot.wind.speed,
            }
        })
        .collect();

    ForecastRecord {
        city: raw.city.name,
        country: raw.city.country,
        forecast,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn current_payload() -> serde_json::Value {
        json!({
            "id": 2643743,
            "name": "London",
            "sys": { "country": "GB" },
            "main": { "temp": 17.6, "feels_like": 16.4, "humidity": 72, "pressure": 1012 },
            "weather": [{ "description": "light rain", "icon": "10d" }],
            "wind": { "speed": 3.6 },
            "coord": { "lat": 51.51, "lon": -0.13 },
            "visibility": 9400.0
        })
    }

    #[test]
    fn normalize_rounds_temperatures_and_converts_visibility() {
        let raw: OwCurrent = serde_json::from_value(current_payload()).expect("payload parses");
        let record = normalize_current(raw);

        assert_eq!(record.temperature, 18);
        assert_eq!(record.feels_like, 16);
        assert_eq!(record.visibility, Some(9));
        assert_eq!(record.city, "London");
        assert_eq!(record.country, "GB");
        assert_eq!(record.icon, "10d");
    }

    #[test]
    fn normalize_omits_visibility_when_upstream_does() {
        let mut payload = current_payload();
        payload.as_object_mut().expect("object").remove("visibility");

        let raw: OwCurrent = serde_json::from_value(payload).expect("payload parses");
        let record = normalize_current(raw);

        assert_eq!(record.visibility, None);
    }

    #[test]
    fn normalize_tolerates_missing_condition_entry() {
        let mut payload = current_payload();
        payload["weather"] = json!([]);

        let raw: OwCurrent = serde_json::from_value(payload).expect("payload parses");
        let record = normalize_current(raw);

        assert_eq!(record.description, "Unknown");
        assert_eq!(record.icon, "");
    }

    #[test]
    fn normalize_forecast_keeps_only_the_first_eight_slots() {
        let slots: Vec<_> = (0..12)
            .map(|i| {
                json!({
                    "dt_txt": format!("2024-05-01 {:02}:00:00", i * 3 % 24),
                    "main": { "temp": 10.0 + i as f64, "feels_like": 9.0, "humidity": 50, "pressure": 1000 },
                    "weather": [{ "description": "clear sky", "icon": "01d" }],
                    "wind": { "speed": 1.5 }
                })
            })
            .collect();

        let raw: OwForecast = serde_json::from_value(json!({
            "city": { "name": "Tokyo", "country": "JP" },
            "list": slots
        }))
        .expect("payload parses");

        let record = normalize_forecast(raw);
        assert_eq!(record.forecast.len(), 8);
        assert_eq!(record.forecast[0].temperature, 10);
        assert_eq!(record.forecast[7].temperature, 17);
    }

    #[tokio::test]
    async fn current_fetches_and_normalizes() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "London"))
            .and(query_param("appid", "KEY"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_payload()))
            .mount(&server)
            .await;

        let client = OpenWeatherClient::new("KEY").expect("client builds").with_base_url(server.uri());
        let record = client.current("London").await.expect("call succeeds");

        assert_eq!(record.id, 2643743);
        assert_eq!(record.temperature, 18);
    }

    #[tokio::test]
    async fn upstream_404_maps_to_not_found_with_city() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "message": "city not found" })),
            )
            .mount(&server)
            .await;

        let client = OpenWeatherClient::new("KEY").expect("client builds").with_base_url(server.uri());
        let err = client.current("Atlantis").await.unwrap_err();

        assert!(matches!(err, WeatherError::NotFound(ref c) if c == "Atlantis"));
        assert!(err.to_string().contains("Atlantis"));
    }

    #[tokio::test]
    async fn upstream_401_maps_to_misconfigured() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid API key" })),
            )
            .mount(&server)
            .await;

        let client = OpenWeatherClient::new("BAD").expect("client builds").with_base_url(server.uri());
        let err = client.current("London").await.unwrap_err();

        assert!(matches!(err, WeatherError::Misconfigured));
    }

    #[tokio::test]
    async fn upstream_429_maps_to_rate_limited() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = OpenWeatherClient::new("KEY").expect("client builds").with_base_url(server.uri());
        let err = client.current("London").await.unwrap_err();

        assert!(matches!(err, WeatherError::RateLimited));
    }

    #[tokio::test]
    async fn unexpected_status_carries_the_provider_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(502).set_body_json(json!({ "message": "bad gateway" })),
            )
            .mount(&server)
            .await;

        let client = OpenWeatherClient::new("KEY").expect("client builds").with_base_url(server.uri());
        let err = client.current("London").await.unwrap_err();

        match err {
            WeatherError::Upstream(msg) => assert!(msg.contains("bad gateway")),
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_upstream_times_out_instead_of_hanging() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(current_payload())
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = OpenWeatherClient::with_timeout("KEY", Duration::from_millis(50))
            .expect("client builds")
            .with_base_url(server.uri());
        let err = client.current("London").await.unwrap_err();

        assert!(matches!(err, WeatherError::Timeout));
    }
}
