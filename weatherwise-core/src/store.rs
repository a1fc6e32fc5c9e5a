//! Shared lookup state and the fetch orchestration that drives it.
//!
//! [`WeatherStore`] is constructed with an injected [`WeatherProvider`]
//! and owned by the frontend; there is no process-wide instance. State
//! lives in a `tokio::sync::watch` channel, so every mutation notifies
//! subscribers synchronously and readers get point-in-time clones.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::model::{ForecastEntry, WeatherSnapshot};
use crate::provider::WeatherProvider;

/// Everything the presentation layer reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    /// Latest current-conditions snapshot, absent until the first
    /// successful fetch.
    pub current_weather: Option<WeatherSnapshot>,
    /// Latest forecast entries, chronological; empty until the first
    /// successful fetch.
    pub forecast: Vec<ForecastEntry>,
    /// True only while a fetch orchestration is in flight.
    pub loading: bool,
    /// Failure of the most recent fetch. Cleared when a new fetch starts.
    pub error: Option<FetchError>,
    /// Last submitted search string.
    pub search_query: String,
}

/// State container sequencing loading/error/success around the paired
/// current + forecast fetch.
#[derive(Debug)]
pub struct WeatherStore {
    provider: Arc<dyn WeatherProvider>,
    state: watch::Sender<QueryState>,
    fetch_seq: AtomicU64,
}

impl WeatherStore {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        let (state, _) = watch::channel(QueryState::default());
        Self {
            provider,
            state,
            fetch_seq: AtomicU64::new(0),
        }
    }

    /// Point-in-time clone of the current state.
    pub fn state(&self) -> QueryState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.state.subscribe()
    }

    pub fn set_current_weather(&self, snapshot: Option<WeatherSnapshot>) {
        self.state.send_modify(|s| s.current_weather = snapshot);
    }

    pub fn set_forecast(&self, forecast: Vec<ForecastEntry>) {
        self.state.send_modify(|s| s.forecast = forecast);
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.send_modify(|s| s.loading = loading);
    }

    pub fn set_error(&self, error: Option<FetchError>) {
        self.state.send_modify(|s| s.error = error);
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.send_modify(|s| s.search_query = query);
    }

    /// Reset snapshot, forecast, error and search query to their initial
    /// empty values. The loading flag is left alone: it belongs to
    /// whatever fetch may still be in flight.
    pub fn clear_weather_data(&self) {
        self.state.send_modify(|s| {
            s.current_weather = None;
            s.forecast.clear();
            s.error = None;
            s.search_query.clear();
        });
    }

    /// Fetch current conditions and the 5-day forecast for `city` and
    /// apply the outcome to the state.
    ///
    /// Both requests are issued together and joined; if either fails the
    /// whole fetch fails, the error is stored, and the previous
    /// snapshot/forecast are left untouched. The method never returns an
    /// error itself.
    ///
    /// Each invocation takes a fresh sequence number; an invocation that
    /// has been superseded by a newer one applies nothing when it
    /// resolves, so the latest call alone determines the observable
    /// state.
    pub async fn fetch_weather_data(&self, city: &str) {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;

        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
            s.search_query = city.to_string();
        });
        debug!(city, seq, "fetching current weather and forecast");

        let result = tokio::try_join!(
            self.provider.current_weather(city),
            self.provider.forecast(city),
        );

        if self.fetch_seq.load(Ordering::SeqCst) != seq {
            debug!(city, seq, "fetch superseded by a newer request, discarding result");
            return;
        }

        match result {
            Ok((snapshot, forecast)) => {
                debug!(city, entries = forecast.len(), "weather fetch succeeded");
                self.state.send_modify(|s| {
                    s.current_weather = Some(snapshot);
                    s.forecast = forecast;
                    s.loading = false;
                });
            }
            Err(err) => {
                warn!(city, error = %err, "weather fetch failed");
                self.state.send_modify(|s| {
                    s.error = Some(err);
                    s.loading = false;
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Condition;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use tokio::sync::Notify;

    fn sample_snapshot(city: &str) -> WeatherSnapshot {
        let ts = |s| DateTime::<Utc>::from_timestamp(s, 0).unwrap();
        WeatherSnapshot {
            location_name: city.to_string(),
            country: "GB".to_string(),
            condition: Condition {
                category: "Clear".to_string(),
                description: "clear sky".to_string(),
                icon: "01d".to_string(),
            },
            temperature_c: 25.0,
            feels_like_c: 27.0,
            temp_min_c: 20.0,
            temp_max_c: 30.0,
            humidity_pct: 60,
            pressure_hpa: 1013,
            wind_speed_mps: 5.0,
            wind_direction_deg: 180.0,
            visibility_m: 10_000,
            cloudiness_pct: 0,
            sunrise: ts(1640952000),
            sunset: ts(1640991600),
            observation_time: ts(1640995200),
        }
    }

    fn sample_forecast() -> Vec<ForecastEntry> {
        vec![ForecastEntry {
            timestamp: DateTime::<Utc>::from_timestamp(1640995200, 0).unwrap(),
            timestamp_txt: "2022-01-01 12:00:00".to_string(),
            temperature_c: 25.0,
            feels_like_c: 27.0,
            temp_min_c: 20.0,
            temp_max_c: 30.0,
            condition: Condition {
                category: "Clear".to_string(),
                description: "clear sky".to_string(),
                icon: "01d".to_string(),
            },
            humidity_pct: 60,
            wind_speed_mps: 5.0,
            wind_direction_deg: 180.0,
            precipitation_probability: 0.1,
        }]
    }

    /// Succeeds with a snapshot named after the city, except for an
    /// optional failing city and an optional city whose current-weather
    /// call blocks until notified.
    #[derive(Debug, Default)]
    struct StubProvider {
        fail_city: Option<(String, FetchError)>,
        gate: Option<(String, Arc<Notify>)>,
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
            if let Some((gated, notify)) = &self.gate {
                if city == gated {
                    notify.notified().await;
                }
            }
            if let Some((failing, err)) = &self.fail_city {
                if city == failing {
                    return Err(err.clone());
                }
            }
            Ok(sample_snapshot(city))
        }

        async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, FetchError> {
            if let Some((failing, err)) = &self.fail_city {
                if city == failing {
                    return Err(err.clone());
                }
            }
            Ok(sample_forecast())
        }
    }

    fn store_with(provider: StubProvider) -> WeatherStore {
        WeatherStore::new(Arc::new(provider))
    }

    #[test]
    fn initial_state_is_empty() {
        let store = store_with(StubProvider::default());
        let state = store.state();

        assert_eq!(state.current_weather, None);
        assert!(state.forecast.is_empty());
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.search_query, "");
    }

    #[test]
    fn setters_replace_single_fields() {
        let store = store_with(StubProvider::default());

        store.set_current_weather(Some(sample_snapshot("Test City")));
        store.set_forecast(sample_forecast());
        store.set_loading(true);
        store.set_error(Some(FetchError::Unknown("boom".to_string())));
        store.set_search_query("Test City");

        let state = store.state();
        assert_eq!(state.current_weather, Some(sample_snapshot("Test City")));
        assert_eq!(state.forecast, sample_forecast());
        assert!(state.loading);
        assert_eq!(state.error, Some(FetchError::Unknown("boom".to_string())));
        assert_eq!(state.search_query, "Test City");
    }

    #[test]
    fn mutations_notify_subscribers_synchronously() {
        let store = store_with(StubProvider::default());
        let mut rx = store.subscribe();

        rx.borrow_and_update();
        store.set_loading(true);

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().loading);
    }

    #[test]
    fn clear_resets_data_but_not_loading() {
        let store = store_with(StubProvider::default());
        store.set_current_weather(Some(sample_snapshot("Test City")));
        store.set_forecast(sample_forecast());
        store.set_error(Some(FetchError::Unknown("boom".to_string())));
        store.set_search_query("Test City");
        store.set_loading(true);

        store.clear_weather_data();

        let state = store.state();
        assert_eq!(state.current_weather, None);
        assert!(state.forecast.is_empty());
        assert_eq!(state.error, None);
        assert_eq!(state.search_query, "");
        assert!(state.loading);
    }

    #[tokio::test]
    async fn successful_fetch_populates_state() {
        let store = store_with(StubProvider::default());

        store.fetch_weather_data("Test City").await;

        let state = store.state();
        assert_eq!(state.current_weather, Some(sample_snapshot("Test City")));
        assert_eq!(state.forecast, sample_forecast());
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.search_query, "Test City");
    }

    #[tokio::test]
    async fn failed_fetch_stores_error_and_keeps_previous_data() {
        let store = store_with(StubProvider {
            fail_city: Some((
                "Invalid City".to_string(),
                FetchError::Provider { status: 404, message: "City not found".to_string() },
            )),
            gate: None,
        });

        store.fetch_weather_data("Test City").await;
        store.fetch_weather_data("Invalid City").await;

        let state = store.state();
        let err = state.error.expect("error must be set");
        assert_eq!(err.to_string(), "City not found");
        assert!(!state.loading);
        // The query is set before the failure and is not rolled back.
        assert_eq!(state.search_query, "Invalid City");
        // Previous data survives the failure.
        assert_eq!(state.current_weather, Some(sample_snapshot("Test City")));
        assert_eq!(state.forecast, sample_forecast());
    }

    #[tokio::test]
    async fn new_fetch_clears_previous_error() {
        let store = store_with(StubProvider {
            fail_city: Some((
                "Invalid City".to_string(),
                FetchError::Provider { status: 404, message: "City not found".to_string() },
            )),
            gate: None,
        });

        store.fetch_weather_data("Invalid City").await;
        assert!(store.state().error.is_some());

        store.fetch_weather_data("Test City").await;

        let state = store.state();
        assert_eq!(state.error, None);
        assert_eq!(state.current_weather, Some(sample_snapshot("Test City")));
    }

    #[tokio::test]
    async fn superseded_fetch_applies_nothing() {
        let gate = Arc::new(Notify::new());
        let store = Arc::new(store_with(StubProvider {
            fail_city: None,
            gate: Some(("Gated City".to_string(), gate.clone())),
        }));

        let slow = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.fetch_weather_data("Gated City").await }
        });

        // Wait until the first invocation has claimed its sequence number
        // and published its synchronous transition.
        let mut rx = store.subscribe();
        rx.wait_for(|s| s.search_query == "Gated City").await.unwrap();

        store.fetch_weather_data("Fast City").await;

        // Release the stale invocation; its result must be discarded.
        gate.notify_one();
        slow.await.unwrap();

        let state = store.state();
        assert_eq!(state.current_weather, Some(sample_snapshot("Fast City")));
        assert_eq!(state.search_query, "Fast City");
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }
}
