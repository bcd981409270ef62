use clap::{Parser, Subcommand};
use inquire::Text;

use weather_core::{ForecastRecord, WeatherRecord};

use crate::api::{ApiClient, DEFAULT_BASE_URL};
use crate::dashboard::Dashboard;
use crate::units::c_to_f;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather dashboard CLI")]
pub struct Cli {
    /// Base URL of the weather proxy API.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Display temperatures in Fahrenheit.
    #[arg(long)]
    pub fahrenheit: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for the default cities.
    Cities,

    /// Show current weather for one city.
    Search {
        /// City name, e.g. "Paris" or "Paris,FR".
        city: String,
    },

    /// Show the next ~24h forecast for a city.
    Forecast {
        /// City name.
        city: String,
    },

    /// Check that the proxy is up and has an API key configured.
    Health,

    /// Interactive dashboard: load the default cities, then search and
    /// merge results into the board.
    Dashboard,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let client = ApiClient::new(&self.api_url)?;

        match self.command {
            Command::Cities => {
                let records = client.cities().await?;
                print_records(&records, self.fahrenheit);
            }
            Command::Search { city } => {
                let record = client.search(&city).await?;
                print_record(&record, self.fahrenheit);
            }
            Command::Forecast { city } => {
                let record = client.forecast(&city).await?;
                print_forecast(&record, self.fahrenheit);
            }
            Command::Health => {
                let health = client.health().await?;
                println!(
                    "{}: {} (API key configured: {})",
                    health.status, health.message, health.api_key_configured
                );
            }
            Command::Dashboard => run_dashboard(&client, self.fahrenheit).await?,
        }

        Ok(())
    }
}

/// The interactive loop mirrors the dashboard UI: a failed search leaves the
/// board as it was, a failed initial load leaves it in an error state rather
/// than pretending the result was empty.
async fn run_dashboard(client: &ApiClient, fahrenheit: bool) -> anyhow::Result<()> {
    let mut board = Dashboard::new();

    match client.cities().await {
        Ok(records) => {
            board.replace_all(records);
            render_board(&board, fahrenheit);
        }
        Err(err) => println!("Error: {err}"),
    }

    loop {
        let input = Text::new("Search city (leave empty to quit):").prompt()?;
        let city = input.trim();
        if city.is_empty() {
            break;
        }

        match client.search(city).await {
            Ok(record) => {
                board.upsert(record);
                render_board(&board, fahrenheit);
            }
            Err(err) => println!("Error: {err}"),
        }
    }

    Ok(())
}

fn render_board(board: &Dashboard, fahrenheit: bool) {
    print_records(board.records(), fahrenheit);
}

fn format_temp(celsius: i32, fahrenheit: bool) -> String {
    if fahrenheit {
        format!("{}°F", c_to_f(celsius))
    } else {
        format!("{celsius}°C")
    }
}

fn print_records(records: &[WeatherRecord], fahrenheit: bool) {
    if records.is_empty() {
        println!("No weather data available.");
        return;
    }
    for record in records {
        print_record(record, fahrenheit);
    }
}

fn print_record(record: &WeatherRecord, fahrenheit: bool) {
    let mut line = format!(
        "{}, {}: {} (feels like {}), {}, humidity {}%, wind {} m/s, pressure {} hPa",
        record.city,
        record.country,
        format_temp(record.temperature, fahrenheit),
        format_temp(record.feels_like, fahrenheit),
        record.description,
        record.humidity,
        record.wind_speed,
        record.pressure,
    );
    if let Some(km) = record.visibility {
        line.push_str(&format!(", visibility {km} km"));
    }
    println!("{line}");
}

fn print_forecast(record: &ForecastRecord, fahrenheit: bool) {
    println!("Forecast for {}, {}:", record.city, record.country);
    for entry in &record.forecast {
        println!(
            "  {}  {}  {}, humidity {}%, wind {} m/s",
            entry.date,
            format_temp(entry.temperature, fahrenheit),
            entry.description,
            entry.humidity,
            entry.wind_speed,
        );
    }
}
