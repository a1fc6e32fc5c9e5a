use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Primary weather condition as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Coarse category, e.g. "Clear" or "Rain".
    pub category: String,
    /// Human-readable description, e.g. "light rain".
    pub description: String,
    /// Provider icon code, e.g. "10d".
    pub icon: String,
}

/// Current conditions for one location. Replaced wholesale on each fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    /// ISO country code, e.g. "GB".
    pub country: String,
    pub condition: Condition,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    pub wind_direction_deg: f64,
    pub visibility_m: u32,
    pub cloudiness_pct: u8,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub observation_time: DateTime<Utc>,
}

/// One 3-hour point of the 5-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    /// Provider's text form of the timestamp, e.g. "2022-01-01 12:00:00".
    pub timestamp_txt: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub condition: Condition,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub wind_direction_deg: f64,
    /// Precipitation probability in 0..=1.
    pub precipitation_probability: f64,
}
