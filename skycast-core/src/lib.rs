//! Core library for the `skycast` OpenWeather demo client.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Free-text location-query resolution
//! - The OpenWeather HTTP client (current weather, forecast, map tile URL)
//! - The geolocation adapter
//! - Widget-side fetch orchestration (search panel, live feed)
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or
//! services.

pub mod client;
pub mod config;
pub mod error;
pub mod geo;
pub mod model;
pub mod query;
pub mod widget;

pub use client::{FORECAST_STRIP_LEN, WeatherClient};
pub use config::{Config, Settings};
pub use error::{FetchError, GeoError};
pub use geo::{Coordinates, IpLocator, LocationSource};
pub use model::{FetchState, ForecastEntry, WeatherSnapshot};
pub use query::{LocationQuery, resolve};
pub use widget::{LiveFeed, SearchPanel, SearchToken};
