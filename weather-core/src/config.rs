use std::env;

/// Default port, matching the original deployment convention.
pub const DEFAULT_PORT: u16 = 5000;

const PORT_VAR: &str = "PORT";
const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";

/// Runtime configuration, read from the environment exactly once at startup
/// and passed into the service explicitly. Nothing reads the environment
/// again after construction.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Port the proxy binds to. Falls back to [`DEFAULT_PORT`].
    pub port: Option<u16>,

    /// OpenWeather API key. When absent the process still starts: weather
    /// endpoints degrade to a configuration error and health keeps working.
    pub api_key: Option<String>,
}

impl Config {
    /// Read `PORT` and `OPENWEATHER_API_KEY` from the environment.
    pub fn from_env() -> Self {
        Self::from_values(env::var(PORT_VAR).ok(), env::var(API_KEY_VAR).ok())
    }

    fn from_values(port: Option<String>, api_key: Option<String>) -> Self {
        let port = match port.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<u16>() {
                Ok(p) => Some(p),
                Err(_) => {
                    log::warn!("Ignoring unparseable {PORT_VAR}={raw:?}, using {DEFAULT_PORT}");
                    None
                }
            },
        };

        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Self { port, api_key }
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn api_key_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
