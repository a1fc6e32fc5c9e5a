//! Core library for the WeatherWise lookup app.
//!
//! This crate defines:
//! - Domain models for current conditions and the 5-day forecast
//! - Pure formatting utilities (temperature, wind, icon URLs)
//! - The OpenWeather client behind the `WeatherProvider` trait
//! - The `WeatherStore` state container and its fetch orchestration
//! - Configuration & credentials handling
//!
//! It is used by `weatherwise-cli`, but can also be embedded by other
//! frontends that render the store's state.

pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod provider;
pub mod store;

pub use config::Config;
pub use error::FetchError;
pub use model::{Condition, ForecastEntry, WeatherSnapshot};
pub use provider::{OpenWeatherClient, WeatherProvider};
pub use store::{QueryState, WeatherStore};
