//! Widget-side fetch orchestration.
//!
//! Each widget owns its [`FetchState`] exclusively; nothing is shared between
//! the search panel and the live feed. In-flight requests are never
//! cancelled: instead every search carries a sequence token, and a completion
//! whose token is no longer current is discarded, so a rapid re-trigger
//! cannot be overwritten by an older, slower response.

use crate::client::WeatherClient;
use crate::error::FetchError;
use crate::geo::LocationSource;
use crate::model::{FetchState, ForecastEntry, WeatherSnapshot};
use crate::query::{self, LocationQuery};

/// Identifies one issued search; completions with a stale token are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchToken(u64);

/// The manual location-search panel: one free-text query, one result card.
#[derive(Debug, Default)]
pub struct SearchPanel {
    state: FetchState<WeatherSnapshot>,
    issued: u64,
}

impl SearchPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState<WeatherSnapshot> {
        &self.state
    }

    /// Start a search for `raw` input.
    ///
    /// Blank input is guarded here, before resolution: returns `None` and
    /// leaves the display state untouched. Otherwise the panel transitions to
    /// `Loading` and hands back the resolved query plus the token the
    /// eventual completion must present.
    pub fn begin(&mut self, raw: &str) -> Option<(SearchToken, LocationQuery)> {
        if raw.trim().is_empty() {
            return None;
        }

        self.issued += 1;
        self.state = FetchState::Loading;
        Some((SearchToken(self.issued), query::resolve(raw)))
    }

    /// Apply a fetch result for a previously issued token.
    ///
    /// Returns `false` when the token is stale, in which case the result is
    /// discarded and the display state is left as-is.
    pub fn complete(
        &mut self,
        token: SearchToken,
        result: Result<WeatherSnapshot, FetchError>,
    ) -> bool {
        if token.0 != self.issued {
            tracing::debug!(stale = token.0, current = self.issued, "discarding stale search result");
            return false;
        }

        self.state = match result {
            Ok(snapshot) => FetchState::Success(snapshot),
            Err(err) => {
                tracing::warn!(%err, "search fetch failed");
                FetchState::Failed(err.user_message().to_string())
            }
        };
        true
    }

    /// Resolve, fetch and apply in one step. Convenience for sequential
    /// callers such as the CLI, where no concurrent re-trigger can occur.
    pub async fn search(&mut self, client: &WeatherClient, raw: &str) {
        let Some((token, query)) = self.begin(raw) else {
            return;
        };
        let result = client.fetch_current(&query).await;
        self.complete(token, result);
    }
}

/// The geolocation-driven live-feed panel: current conditions plus the
/// four-entry "upcoming" strip.
///
/// The two fetches are issued concurrently with no joint rollback; the slots
/// are independent and merged only at render time, so one may show data while
/// the other shows a failure message.
#[derive(Debug, Default)]
pub struct LiveFeed {
    current: FetchState<WeatherSnapshot>,
    forecast: FetchState<Vec<ForecastEntry>>,
}

impl LiveFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &FetchState<WeatherSnapshot> {
        &self.current
    }

    pub fn forecast(&self) -> &FetchState<Vec<ForecastEntry>> {
        &self.forecast
    }

    /// Detect the device location and refresh both slots.
    ///
    /// A denied or unavailable location fails both slots without issuing any
    /// weather request.
    pub async fn refresh(&mut self, locator: &dyn LocationSource, client: &WeatherClient) {
        self.current = FetchState::Loading;
        self.forecast = FetchState::Loading;

        let coords = match locator.current_coordinates().await {
            Ok(coords) => coords,
            Err(err) => {
                tracing::warn!(%err, "geolocation failed");
                let message = err.user_message().to_string();
                self.current = FetchState::Failed(message.clone());
                self.forecast = FetchState::Failed(message);
                return;
            }
        };

        let query = coords.as_query();
        let (current, forecast) =
            tokio::join!(client.fetch_current(&query), client.fetch_forecast(&query));

        self.current = match current {
            Ok(snapshot) => FetchState::Success(snapshot),
            Err(err) => {
                tracing::warn!(%err, "live current-weather fetch failed");
                FetchState::Failed(err.user_message().to_string())
            }
        };

        self.forecast = match forecast {
            Ok(strip) => FetchState::Success(strip),
            Err(err) => {
                tracing::warn!(%err, "live forecast fetch failed");
                FetchState::Failed(err.user_message().to_string())
            }
        };
    }
}
