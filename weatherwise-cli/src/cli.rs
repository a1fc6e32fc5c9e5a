use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Password;

use weatherwise_core::format::{TemperatureUnit, WindSpeedUnit};
use weatherwise_core::{Config, OpenWeatherClient, WeatherStore};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherwise", version, about = "City weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current conditions and the 5-day forecast for a city.
    Show {
        /// City name, e.g. "London" or "London,GB".
        city: String,

        /// Temperature unit: c or f.
        #[arg(long, default_value_t)]
        units: TemperatureUnit,

        /// Wind speed unit: m/s, km/h or mph.
        #[arg(long, default_value_t)]
        wind: WindSpeedUnit,

        /// Print at most this many forecast entries (3-hour steps).
        #[arg(long)]
        entries: Option<usize>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, units, wind, entries } => show(&city, units, wind, entries).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(
    city: &str,
    units: TemperatureUnit,
    wind: WindSpeedUnit,
    entries: Option<usize>,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let api_key = config.resolve_api_key()?;

    let provider = Arc::new(OpenWeatherClient::new(api_key));
    let store = WeatherStore::new(provider);

    store.fetch_weather_data(city).await;

    let state = store.state();
    if let Some(err) = &state.error {
        anyhow::bail!("Could not fetch weather for '{}': {err}", state.search_query);
    }

    let Some(snapshot) = &state.current_weather else {
        anyhow::bail!("No weather data returned for '{city}'");
    };

    print!("{}", render::snapshot_card(snapshot, units, wind));
    if !state.forecast.is_empty() {
        println!();
        print!("{}", render::forecast_list(&state.forecast, units, entries));
    }

    Ok(())
}
