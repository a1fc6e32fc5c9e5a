//! Terminal rendering of the store's state: a current-conditions card
//! followed by the forecast list.

use chrono::{DateTime, Utc};

use weatherwise_core::format::{
    TemperatureUnit, WindSpeedUnit, format_temperature, format_wind_speed, weather_icon_url,
    wind_direction,
};
use weatherwise_core::{ForecastEntry, WeatherSnapshot};

pub fn snapshot_card(
    snapshot: &WeatherSnapshot,
    units: TemperatureUnit,
    wind: WindSpeedUnit,
) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}, {}  ({})\n",
        snapshot.location_name, snapshot.country, snapshot.condition.description
    ));
    out.push_str(&format!(
        "  Temperature  {}, feels like {}, min {} / max {}\n",
        format_temperature(snapshot.temperature_c, units),
        format_temperature(snapshot.feels_like_c, units),
        format_temperature(snapshot.temp_min_c, units),
        format_temperature(snapshot.temp_max_c, units),
    ));
    out.push_str(&format!(
        "  Humidity     {}%   Pressure {} hPa   Clouds {}%\n",
        snapshot.humidity_pct, snapshot.pressure_hpa, snapshot.cloudiness_pct,
    ));
    out.push_str(&format!(
        "  Wind         {} {}\n",
        format_wind_speed(snapshot.wind_speed_mps, wind),
        wind_direction(snapshot.wind_direction_deg),
    ));
    out.push_str(&format!(
        "  Visibility   {:.1} km\n",
        f64::from(snapshot.visibility_m) / 1000.0
    ));
    out.push_str(&format!(
        "  Sunrise      {}   Sunset {}\n",
        format_clock(snapshot.sunrise),
        format_clock(snapshot.sunset),
    ));
    out.push_str(&format!(
        "  Icon         {}\n",
        weather_icon_url(&snapshot.condition.icon)
    ));

    out
}

pub fn forecast_list(
    entries: &[ForecastEntry],
    units: TemperatureUnit,
    limit: Option<usize>,
) -> String {
    let shown = limit.unwrap_or(entries.len()).min(entries.len());

    let mut out = String::from("5-day forecast:\n");
    for entry in &entries[..shown] {
        out.push_str(&format!(
            "  {}  {:>5}  {}  rain {}%\n",
            entry.timestamp_txt,
            format_temperature(entry.temperature_c, units),
            entry.condition.description,
            (entry.precipitation_probability * 100.0).round() as i64,
        ));
    }
    if shown < entries.len() {
        out.push_str(&format!("  ... {} more entries\n", entries.len() - shown));
    }

    out
}

fn format_clock(ts: DateTime<Utc>) -> String {
    ts.format("%H:%M UTC").to_string()
}
