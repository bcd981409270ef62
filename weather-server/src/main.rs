//! Binary crate for the weather proxy server.
//!
//! Reads configuration from the environment once, builds the service, and
//! exposes the `/api` surface. A missing API key does not abort startup:
//! weather endpoints degrade to a configuration error while health keeps
//! answering.

use actix_web::{middleware, web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};

use weather_core::{Config, OpenWeatherClient, WeatherService};

mod routes;

use routes::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let port = config.port();

    let service = match &config.api_key {
        Some(key) => {
            let provider = OpenWeatherClient::new(key.clone())?;
            Some(WeatherService::new(Box::new(provider)))
        }
        None => {
            warn!(
                "OPENWEATHER_API_KEY not set; weather endpoints will answer \
                 with a configuration error until a key is provided"
            );
            None
        }
    };

    let state = web::Data::new(AppState::new(service));

    info!("Weather API server listening on port {port}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await?;

    Ok(())
}
