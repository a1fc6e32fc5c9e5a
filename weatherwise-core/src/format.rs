//! Pure display formatting for weather values.
//!
//! All functions here are total over their numeric domain: degrees and
//! speeds are not range-checked, and out-of-range inputs still produce a
//! label or a string.

use std::fmt;
use std::str::FromStr;

/// Temperature display unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemperatureUnit::Celsius => f.write_str("c"),
            TemperatureUnit::Fahrenheit => f.write_str("f"),
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(format!("unknown temperature unit '{s}' (expected 'c' or 'f')")),
        }
    }
}

/// Wind speed display unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindSpeedUnit {
    #[default]
    MetersPerSecond,
    KilometersPerHour,
    MilesPerHour,
}

impl fmt::Display for WindSpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindSpeedUnit::MetersPerSecond => f.write_str("m/s"),
            WindSpeedUnit::KilometersPerHour => f.write_str("km/h"),
            WindSpeedUnit::MilesPerHour => f.write_str("mph"),
        }
    }
}

impl FromStr for WindSpeedUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "m/s" | "ms" | "mps" => Ok(WindSpeedUnit::MetersPerSecond),
            "km/h" | "kmh" => Ok(WindSpeedUnit::KilometersPerHour),
            "mph" => Ok(WindSpeedUnit::MilesPerHour),
            _ => Err(format!(
                "unknown wind speed unit '{s}' (expected 'm/s', 'km/h' or 'mph')"
            )),
        }
    }
}

/// Format a Celsius temperature as a rounded integer with a unit suffix.
pub fn format_temperature(celsius: f64, unit: TemperatureUnit) -> String {
    match unit {
        TemperatureUnit::Celsius => format!("{}°C", celsius.round() as i64),
        TemperatureUnit::Fahrenheit => {
            let fahrenheit = celsius * 9.0 / 5.0 + 32.0;
            format!("{}°F", fahrenheit.round() as i64)
        }
    }
}

/// Format a wind speed given in m/s, converting to the requested unit.
pub fn format_wind_speed(meters_per_second: f64, unit: WindSpeedUnit) -> String {
    match unit {
        WindSpeedUnit::MetersPerSecond => {
            format!("{} m/s", meters_per_second.round() as i64)
        }
        WindSpeedUnit::KilometersPerHour => {
            format!("{} km/h", (meters_per_second * 3.6).round() as i64)
        }
        WindSpeedUnit::MilesPerHour => {
            format!("{} mph", (meters_per_second * 2.237).round() as i64)
        }
    }
}

const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Map a wind direction in degrees onto one of 8 compass labels.
///
/// Accepts any real input: values ≥ 360°, fractional and negative degrees
/// all wrap onto the compass. Bucket boundaries (22.5°, 67.5°, ...) round
/// to the even bucket, so 22.5° is N and 67.5° is E.
pub fn wind_direction(degrees: f64) -> &'static str {
    let bucket = (degrees / 45.0).round_ties_even() as i64;
    COMPASS_POINTS[bucket.rem_euclid(8) as usize]
}

/// Icon URL for a provider icon code. The code is not validated.
pub fn weather_icon_url(icon_code: &str) -> String {
    format!("https://openweathermap.org/img/wn/{icon_code}@2x.png")
}
