use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::error::FetchError;
use crate::model::{ForecastEntry, WeatherSnapshot};
use crate::query::LocationQuery;

/// Number of forecast entries kept for the "upcoming" strip.
///
/// The API returns a 5-day/3-hour list; the strip shows whatever comes first,
/// with no resampling or time-window alignment.
pub const FORECAST_STRIP_LEN: usize = 4;

/// Fixed zoom/tile coordinates of the thermal overlay image.
const TILE_ZOOM: u8 = 3;
const TILE_X: u8 = 4;
const TILE_Y: u8 = 3;

const TILE_BASE_URL: &str = "https://tile.openweathermap.org/map/temp_new";

/// HTTP client for the OpenWeather current-weather and forecast endpoints.
///
/// Stateless between calls; every fetch is independent, with no caching,
/// deduplication or retry.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    /// Fetch the current weather for a resolved location query.
    pub async fn fetch_current(&self, query: &LocationQuery) -> Result<WeatherSnapshot, FetchError> {
        let body = self.get_json("weather", query).await?;

        let parsed: CurrentBody = serde_json::from_str(&body).map_err(FetchError::MalformedBody)?;

        let condition = parsed.weather.into_iter().next().unwrap_or_default();

        Ok(WeatherSnapshot {
            place_name: parsed.name,
            country_code: parsed.sys.country,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            wind_speed_mps: parsed.wind.speed,
            visibility_m: parsed.visibility,
            condition: condition.main,
            description: condition.description,
            icon: condition.icon,
        })
    }

    /// Fetch the short "upcoming" forecast strip for a resolved location query.
    ///
    /// Returns the first [`FORECAST_STRIP_LEN`] entries of the API's ordered
    /// list, or all of them if the list is shorter.
    pub async fn fetch_forecast(
        &self,
        query: &LocationQuery,
    ) -> Result<Vec<ForecastEntry>, FetchError> {
        let body = self.get_json("forecast", query).await?;

        let parsed: ForecastBody = serde_json::from_str(&body).map_err(FetchError::MalformedBody)?;

        let entries = parsed
            .list
            .into_iter()
            .take(FORECAST_STRIP_LEN)
            .map(|item| {
                let icon = item.weather.into_iter().next().unwrap_or_default().icon;
                ForecastEntry {
                    at: unix_to_utc(item.dt),
                    temperature_c: item.main.temp,
                    icon,
                }
            })
            .collect();

        Ok(entries)
    }

    /// URL of the thermal map tile shown on the live panel.
    ///
    /// The tile is an image resource; only the URL is built here, the body is
    /// never fetched or parsed.
    pub fn thermal_tile_url(&self) -> String {
        format!(
            "{TILE_BASE_URL}/{TILE_ZOOM}/{TILE_X}/{TILE_Y}.png?appid={}",
            self.api_key
        )
    }

    async fn get_json(&self, path: &str, query: &LocationQuery) -> Result<String, FetchError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);

        let mut params: Vec<(&str, String)> = vec![
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ];

        match query {
            LocationQuery::Named { name } => params.push(("q", name.clone())),
            LocationQuery::Coordinate { latitude, longitude } => {
                params.push(("lat", latitude.to_string()));
                params.push(("lon", longitude.to_string()));
            }
        }

        let res = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = res.status();
        let body = res.text().await.map_err(FetchError::Transport)?;

        if !status.is_success() {
            tracing::debug!(%status, path, "weather API request failed");
            return Err(FetchError::from_status(status));
        }

        Ok(body)
    }
}

fn unix_to_utc(ts: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(ts, 0).unwrap_or_else(Utc::now)
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Default, Deserialize)]
struct ApiWeather {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ApiWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ApiSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct CurrentBody {
    name: String,
    sys: ApiSys,
    main: ApiMain,
    weather: Vec<ApiWeather>,
    wind: ApiWind,
    #[serde(default)]
    visibility: u32,
}

#[derive(Debug, Deserialize)]
struct ForecastItem {
    dt: i64,
    main: ApiMain,
    weather: Vec<ApiWeather>,
}

#[derive(Debug, Deserialize)]
struct ForecastBody {
    list: Vec<ForecastItem>,
}
