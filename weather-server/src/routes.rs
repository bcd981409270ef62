//! HTTP surface of the proxy.
//!
//! Every handler converts domain errors through [`error_response`], so no
//! upstream or internal failure leaves this module unmapped.

use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use weather_core::{CitiesResponse, ErrorBody, HealthResponse, WeatherError, WeatherService};

/// Cities shown on the dashboard before any search.
pub const DEFAULT_CITIES: [&str; 8] = [
    "London",
    "New York",
    "Tokyo",
    "Sydney",
    "Mumbai",
    "Paris",
    "Dubai",
    "Singapore",
];

/// Shared, immutable per-process state. `service` is `None` when no API key
/// was configured at startup.
pub struct AppState {
    service: Option<WeatherService>,
}

impl AppState {
    pub fn new(service: Option<WeatherService>) -> Self {
        Self { service }
    }

    fn service(&self) -> Result<&WeatherService, WeatherError> {
        self.service.as_ref().ok_or(WeatherError::Misconfigured)
    }

    fn api_key_configured(&self) -> bool {
        self.service.is_some()
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(health)
        .service(cities)
        .service(search)
        .service(forecast)
        .service(web::scope("/api").default_service(web::route().to(api_not_found)));
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Weather App API Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/api/health",
            "cities": "/api/weather/cities",
            "search": "/api/weather/search/{city}",
            "forecast": "/api/weather/forecast/{city}",
        },
        "status": "running",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Responds 200 whether or not the API key is configured; the flag in the
/// body is how callers find out.
#[get("/api/health")]
async fn health(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: "Weather API server is running".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        api_key_configured: state.api_key_configured(),
    })
}

/// Best-effort batch: cities whose upstream call failed are simply absent
/// from the response.
#[get("/api/weather/cities")]
async fn cities(state: web::Data<AppState>) -> HttpResponse {
    let service = match state.service() {
        Ok(service) => service,
        Err(err) => return error_response(&err),
    };

    let records = service.list(&DEFAULT_CITIES).await;
    log::info!(
        "Fetched weather for {}/{} default cities",
        records.len(),
        DEFAULT_CITIES.len()
    );

    HttpResponse::Ok().json(CitiesResponse { cities: records })
}

#[get("/api/weather/search/{city}")]
async fn search(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let service = match state.service() {
        Ok(service) => service,
        Err(err) => return error_response(&err),
    };

    match service.search(&path).await {
        Ok(record) => {
            log::info!("Found weather for {}, {}", record.city, record.country);
            HttpResponse::Ok().json(record)
        }
        Err(err) => error_response(&err),
    }
}

#[get("/api/weather/forecast/{city}")]
async fn forecast(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let service = match state.service() {
        Ok(service) => service,
        Err(err) => return error_response(&err),
    };

    match service.forecast(&path).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(err) => error_response(&err),
    }
}

async fn api_not_found(req: HttpRequest) -> HttpResponse {
    let mut body = ErrorBody::new(
        "API endpoint not found",
        format!("The endpoint {} does not exist", req.path()),
    );
    body.available_endpoints = Some(vec![
        "/api/health".to_string(),
        "/api/weather/cities".to_string(),
        "/api/weather/search/{city}".to_string(),
        "/api/weather/forecast/{city}".to_string(),
    ]);

    HttpResponse::NotFound().json(body)
}

fn error_response(err: &WeatherError) -> HttpResponse {
    let body = err.to_body();

    match err.status() {
        400 => HttpResponse::BadRequest().json(body),
        404 => HttpResponse::NotFound().json(body),
        408 => HttpResponse::RequestTimeout().json(body),
        429 => HttpResponse::TooManyRequests().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}
