//! HTTP fetcher for the VATSpy boundary file and the VATSIM data feed.

use std::time::Duration;

use geojson::{Feature, FeatureCollection, GeoJson};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::DataFetchError;
use crate::models::DataFeed;
use crate::source::{BoundarySource, TrafficSource};

/// Fetches both network sources with one shared client
#[derive(Clone)]
pub struct VatsimClient {
    client: Client,
    boundary_url: String,
    data_url: String,
}

impl VatsimClient {
    pub fn new(
        boundary_url: impl Into<String>,
        data_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            boundary_url: boundary_url.into(),
            data_url: data_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            &config.boundary_url,
            &config.data_url,
            &config.user_agent,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn boundary_url(&self) -> &str {
        &self.boundary_url
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    async fn get_text(&self, url: &str) -> Result<String, DataFetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| DataFetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        check_status(url, response.status())?;

        let body = response
            .text()
            .await
            .map_err(|source| DataFetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

impl BoundarySource for VatsimClient {
    async fn fetch_boundaries(&self) -> Result<Vec<Feature>, DataFetchError> {
        info!("Downloading FIR boundaries from {}", self.boundary_url);
        let body = self.get_text(&self.boundary_url).await?;
        parse_boundaries(&self.boundary_url, &body)
    }
}

impl TrafficSource for VatsimClient {
    async fn fetch_traffic(&self) -> Result<DataFeed, DataFetchError> {
        debug!("Downloading VATSIM data from {}", self.data_url);
        let body = self.get_text(&self.data_url).await?;
        parse_data_feed(&self.data_url, &body)
    }
}

/// Anything other than a 2xx response is a fetch failure
pub fn check_status(url: &str, status: StatusCode) -> Result<(), DataFetchError> {
    if status.is_success() {
        Ok(())
    } else {
        warn!("{} responded with status {}", url, status);
        Err(DataFetchError::Status {
            url: url.to_string(),
            status,
        })
    }
}

/// Parse a GeoJSON FeatureCollection body into its features
pub fn parse_boundaries(url: &str, body: &str) -> Result<Vec<Feature>, DataFetchError> {
    let decode_error = |message: String| DataFetchError::Decode {
        url: url.to_string(),
        message,
    };

    match body.parse::<GeoJson>() {
        Ok(GeoJson::FeatureCollection(FeatureCollection { features, .. })) => Ok(features),
        Ok(_) => Err(decode_error("expected a FeatureCollection".to_string())),
        Err(e) => Err(decode_error(e.to_string())),
    }
}

/// Parse the VATSIM v3 data document
pub fn parse_data_feed(url: &str, body: &str) -> Result<DataFeed, DataFetchError> {
    serde_json::from_str(body).map_err(|e| DataFetchError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.com/feed";

    #[test]
    fn test_check_status() {
        assert!(check_status(URL, StatusCode::OK).is_ok());
        assert!(matches!(
            check_status(URL, StatusCode::INTERNAL_SERVER_ERROR),
            Err(DataFetchError::Status { status, .. }) if status == StatusCode::INTERNAL_SERVER_ERROR
        ));
        assert!(check_status(URL, StatusCode::NOT_FOUND).is_err());
    }

    #[test]
    fn test_parse_boundaries() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"id": "VABF"},
                "geometry": {"type": "Polygon", "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]]}
            }]
        }"#;
        let features = parse_boundaries(URL, body).unwrap();
        assert_eq!(features.len(), 1);
    }

    #[test]
    fn test_parse_boundaries_rejects_other_geojson() {
        let body = r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#;
        assert!(matches!(
            parse_boundaries(URL, body),
            Err(DataFetchError::Decode { .. })
        ));
        assert!(parse_boundaries(URL, "<html>rate limited</html>").is_err());
    }

    #[test]
    fn test_parse_data_feed() {
        let body = r#"{
            "pilots": [
                {"cid": 1234567, "callsign": "AIC101", "latitude": 19.1, "longitude": 72.8, "altitude": 35000}
            ],
            "controllers": [
                {"cid": 7654321, "callsign": "VIDF_CTR", "frequency": "120.900"}
            ]
        }"#;
        let feed = parse_data_feed(URL, body).unwrap();
        assert_eq!(feed.pilots.len(), 1);
        assert_eq!(feed.controllers.len(), 1);
        assert!(feed.controllers[0].latitude.is_none());
    }

    #[test]
    fn test_parse_data_feed_invalid() {
        assert!(matches!(
            parse_data_feed(URL, "not json"),
            Err(DataFetchError::Decode { .. })
        ));
    }

    #[test]
    fn test_client_from_config() {
        let config = Config::default();
        let client = VatsimClient::from_config(&config).unwrap();
        assert_eq!(client.boundary_url(), config.boundary_url);
        assert_eq!(client.data_url(), config.data_url);
    }
}
