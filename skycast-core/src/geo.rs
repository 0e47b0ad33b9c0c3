use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::error::GeoError;
use crate::query::LocationQuery;

/// A latitude/longitude pair from the host environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn as_query(self) -> LocationQuery {
        LocationQuery::Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Capability interface for device geolocation.
///
/// Single-shot: one current-position request per call, no tracking and no
/// automatic retry. Injected into the live-feed widget so tests can
/// substitute a fake.
#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    async fn current_coordinates(&self) -> Result<Coordinates, GeoError>;
}

const IP_API_ENDPOINT: &str = "http://ip-api.com/json";

/// IP-based location lookup, the host-environment position source for a
/// terminal client. Free endpoint, no API key.
#[derive(Debug, Clone)]
pub struct IpLocator {
    endpoint: String,
    http: Client,
}

impl IpLocator {
    pub fn new() -> Self {
        Self::with_endpoint(IP_API_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: Client::new(),
        }
    }
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct IpApiBody {
    status: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
}

#[async_trait]
impl LocationSource for IpLocator {
    async fn current_coordinates(&self) -> Result<Coordinates, GeoError> {
        let res = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|err| {
                tracing::debug!(%err, "location lookup request failed");
                GeoError::Unavailable
            })?;

        if !res.status().is_success() {
            return Err(GeoError::Unavailable);
        }

        let body: IpApiBody = res.json().await.map_err(|err| {
            tracing::debug!(%err, "location lookup returned malformed body");
            GeoError::Unavailable
        })?;

        // The endpoint reports refusals in-band with status = "fail".
        if body.status != "success" {
            return Err(GeoError::Denied);
        }

        Ok(Coordinates { latitude: body.lat, longitude: body.lon })
    }
}
