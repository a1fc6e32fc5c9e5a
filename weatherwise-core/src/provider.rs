use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::model::{ForecastEntry, WeatherSnapshot};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Source of weather data for a city.
///
/// The store only talks to this trait; the production implementation is
/// [`OpenWeatherClient`], tests substitute a stub.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a city.
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError>;

    /// 5-day forecast in 3-hour steps, chronological.
    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, FetchError>;
}
