use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One point-in-time weather reading, shaped for the display widgets.
///
/// Replaced wholesale on each fetch, never merged or patched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub place_name: String,
    pub country_code: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    pub visibility_m: u32,
    /// Condition group, e.g. "Rain" or "Clear".
    pub condition: String,
    /// Free-form condition description, e.g. "light rain".
    pub description: String,
    /// OpenWeather icon identifier, e.g. "10d".
    pub icon: String,
}

impl WeatherSnapshot {
    /// Visibility in kilometres, as shown on the live panel.
    pub fn visibility_km(&self) -> f64 {
        f64::from(self.visibility_m) / 1000.0
    }
}

/// One timestamped entry of the "upcoming" forecast strip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub at: DateTime<Utc>,
    pub temperature_c: f64,
    pub icon: String,
}

/// Lifecycle of a single widget-owned fetch.
///
/// Each widget owns its state exclusively; nothing is shared across widgets.
/// The `Failed` payload is the short user-facing message rendered in place of
/// data.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Success(T),
    Failed(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            FetchState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_state_defaults_to_idle() {
        let state: FetchState<WeatherSnapshot> = FetchState::default();
        assert!(matches!(state, FetchState::Idle));
    }

    #[test]
    fn fetch_state_accessors() {
        let ok: FetchState<u8> = FetchState::Success(7);
        assert_eq!(ok.success(), Some(&7));
        assert_eq!(ok.failure(), None);

        let bad: FetchState<u8> = FetchState::Failed("nope".into());
        assert_eq!(bad.success(), None);
        assert_eq!(bad.failure(), Some("nope"));
        assert!(!bad.is_loading());
    }

    #[test]
    fn visibility_converts_to_km() {
        let snapshot = WeatherSnapshot {
            place_name: "Nairobi".into(),
            country_code: "KE".into(),
            temperature_c: 24.0,
            feels_like_c: 25.1,
            humidity_pct: 60,
            pressure_hpa: 1013,
            wind_speed_mps: 3.2,
            visibility_m: 8500,
            condition: "Clouds".into(),
            description: "scattered clouds".into(),
            icon: "03d".into(),
        };
        assert!((snapshot.visibility_km() - 8.5).abs() < f64::EPSILON);
    }
}
