use reqwest::StatusCode;
use thiserror::Error;

/// Failure to fetch or decode weather data.
///
/// The original demo collapsed every failure into one message; the variants
/// here keep HTTP status classes apart for logging, while
/// [`FetchError::user_message`] reproduces the coarse user-facing strings the
/// widgets display.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("location not found")]
    NotFound,

    #[error("API key missing or invalid")]
    InvalidKey,

    #[error("API rate limit reached")]
    RateLimited,

    #[error("weather API returned status {status}")]
    Api { status: StatusCode },

    #[error("failed to reach weather API")]
    Transport(#[source] reqwest::Error),

    #[error("could not parse weather API response")]
    MalformedBody(#[source] serde_json::Error),
}

impl FetchError {
    /// Classify a non-2xx response status.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => FetchError::NotFound,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FetchError::InvalidKey,
            StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited,
            status => FetchError::Api { status },
        }
    }

    /// Short message rendered in place of data.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::NotFound => "Location not found. Please try again.",
            _ => "API limit reached or key invalid.",
        }
    }
}

/// Failure to obtain the device's current coordinates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeoError {
    #[error("location access denied")]
    Denied,

    #[error("location service unavailable")]
    Unavailable,
}

impl GeoError {
    pub fn user_message(&self) -> &'static str {
        "Location access denied."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert!(matches!(FetchError::from_status(StatusCode::NOT_FOUND), FetchError::NotFound));
        assert!(matches!(FetchError::from_status(StatusCode::BAD_REQUEST), FetchError::NotFound));
        assert!(matches!(
            FetchError::from_status(StatusCode::UNAUTHORIZED),
            FetchError::InvalidKey
        ));
        assert!(matches!(
            FetchError::from_status(StatusCode::TOO_MANY_REQUESTS),
            FetchError::RateLimited
        ));
        assert!(matches!(
            FetchError::from_status(StatusCode::INTERNAL_SERVER_ERROR),
            FetchError::Api { .. }
        ));
    }

    #[test]
    fn user_messages_stay_coarse() {
        assert_eq!(
            FetchError::NotFound.user_message(),
            "Location not found. Please try again."
        );
        assert_eq!(
            FetchError::RateLimited.user_message(),
            "API limit reached or key invalid."
        );
        assert_eq!(
            FetchError::InvalidKey.user_message(),
            "API limit reached or key invalid."
        );
    }
}
