use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::FetchError;
use crate::model::{Condition, ForecastEntry, WeatherSnapshot};

use super::WeatherProvider;

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// OpenWeather client for current conditions and the 5-day forecast.
///
/// Requests always ask for metric units; unit conversion is a display
/// concern handled by [`crate::format`].
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
    ) -> Result<T, FetchError> {
        let url = format!("{BASE_URL}/{endpoint}");
        debug!(endpoint, city, "requesting weather data");

        let res = self
            .http
            .get(url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(provider_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|err| {
            FetchError::Unknown(format!("unexpected response from weather provider: {err}"))
        })
    }
}

/// Classify a non-success response, preferring the human-readable
/// `message` OpenWeather embeds in its JSON error bodies.
fn provider_error(status: u16, body: &str) -> FetchError {
    let message = serde_json::from_str::<OwErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| format!("weather provider returned status {status}"));

    FetchError::Provider { status, message }
}

fn unix_to_utc(ts: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(ts, 0).unwrap_or_else(Utc::now)
}

fn condition_from(weather: &[OwWeather]) -> Condition {
    weather
        .first()
        .map(|w| Condition {
            category: w.main.clone(),
            description: w.description.clone(),
            icon: w.icon.clone(),
        })
        .unwrap_or_else(|| Condition {
            category: "Unknown".to_string(),
            description: "unknown".to_string(),
            icon: String::new(),
        })
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: u32,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    // Occasionally absent from current-conditions responses.
    #[serde(default)]
    visibility: u32,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    clouds: OwClouds,
    sys: OwSys,
}

impl OwCurrentResponse {
    fn into_snapshot(self) -> WeatherSnapshot {
        WeatherSnapshot {
            location_name: self.name,
            country: self.sys.country,
            condition: condition_from(&self.weather),
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            temp_min_c: self.main.temp_min,
            temp_max_c: self.main.temp_max,
            humidity_pct: self.main.humidity,
            pressure_hpa: self.main.pressure,
            wind_speed_mps: self.wind.speed,
            wind_direction_deg: self.wind.deg,
            visibility_m: self.visibility,
            cloudiness_pct: self.clouds.all,
            sunrise: unix_to_utc(self.sys.sunrise),
            sunset: unix_to_utc(self.sys.sunset),
            observation_time: unix_to_utc(self.dt),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    pop: f64,
}

impl OwForecastEntry {
    fn into_entry(self) -> ForecastEntry {
        ForecastEntry {
            timestamp: unix_to_utc(self.dt),
            timestamp_txt: self.dt_txt,
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            temp_min_c: self.main.temp_min,
            temp_max_c: self.main.temp_max,
            condition: condition_from(&self.weather),
            humidity_pct: self.main.humidity,
            wind_speed_mps: self.wind.speed,
            wind_direction_deg: self.wind.deg,
            precipitation_probability: self.pop,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        let parsed: OwCurrentResponse = self.get_json("weather", city).await?;
        Ok(parsed.into_snapshot())
    }

    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, FetchError> {
        let parsed: OwForecastResponse = self.get_json("forecast", city).await?;
        Ok(parsed.list.into_iter().map(OwForecastEntry::into_entry).collect())
    }
}
