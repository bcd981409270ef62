//! Core library for the weather dashboard proxy.
//!
//! This crate defines:
//! - Configuration read from the environment
//! - The error taxonomy shared by proxy and client
//! - The upstream provider abstraction and the OpenWeather client
//! - Normalized domain records and wire shapes
//! - The proxy service: validation, fan-out, error mapping
//!
//! It is used by `weather-server` and `weather-cli`, but can also be reused
//! by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;

pub use config::Config;
pub use error::WeatherError;
pub use model::{
    CitiesResponse, Coordinates, ErrorBody, ForecastEntry, ForecastRecord, HealthResponse,
    WeatherRecord,
};
pub use provider::{OpenWeatherClient, WeatherProvider};
pub use service::WeatherService;
