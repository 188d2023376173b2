//! Error types shared by the fetchers, the catalog and the cycle runner.

use reqwest::StatusCode;
use thiserror::Error;

/// A network source could not deliver a usable document.
///
/// Always recoverable: the current cycle is skipped and the next one retries.
#[derive(Debug, Error)]
pub enum DataFetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status { url: String, status: StatusCode },

    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl DataFetchError {
    /// URL of the source that failed
    pub fn url(&self) -> &str {
        match self {
            DataFetchError::Transport { url, .. }
            | DataFetchError::Status { url, .. }
            | DataFetchError::Decode { url, .. } => url,
        }
    }
}

/// A live-feed record that cannot become a [`crate::models::QueryPoint`].
///
/// These are dropped from the batch without being shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedRecordError {
    #[error("record has no latitude/longitude")]
    MissingCoordinates,

    #[error("record has no cid")]
    MissingCid,

    #[error("coordinates out of range: lat={latitude}, lon={longitude}")]
    OutOfRange { latitude: f64, longitude: f64 },
}

/// Why a cycle was abandoned before classification.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("failed to fetch FIR boundaries: {0}")]
    Boundaries(#[source] DataFetchError),

    #[error("failed to fetch live traffic: {0}")]
    Traffic(#[source] DataFetchError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = DataFetchError::Status {
            url: "https://example.com/boundaries.geojson".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(
            err.to_string(),
            "https://example.com/boundaries.geojson returned status 500 Internal Server Error"
        );
        assert_eq!(err.url(), "https://example.com/boundaries.geojson");
    }

    #[test]
    fn test_cycle_error_names_stage() {
        let err = CycleError::Traffic(DataFetchError::Decode {
            url: "https://data.example.com".to_string(),
            message: "expected value".to_string(),
        });
        assert!(err.to_string().starts_with("failed to fetch live traffic"));
    }
}
