//! Live traffic records from the VATSIM data feed.

use serde::Deserialize;
use serde_json::Value;

use crate::error::MalformedRecordError;

/// Callsign shown when a record carries none
pub const UNKNOWN_CALLSIGN: &str = "N/A";

/// The subset of the VATSIM v3 data document we consume.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataFeed {
    #[serde(default)]
    pub pilots: Vec<MemberRecord>,

    #[serde(default)]
    pub controllers: Vec<MemberRecord>,
}

impl DataFeed {
    /// All members, pilots first
    pub fn into_members(self) -> Vec<MemberRecord> {
        let mut members = self.pilots;
        members.extend(self.controllers);
        members
    }
}

/// A pilot or controller entry as it appears on the wire.
///
/// Every field is optional; [`QueryPoint::try_from`] is the only place
/// that decides whether a record is usable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberRecord {
    /// Numeric in the live feed, accepted as a string too
    #[serde(default)]
    pub cid: Option<Value>,

    #[serde(default)]
    pub callsign: Option<String>,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,
}

/// A validated position to classify.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPoint {
    pub cid: String,
    pub callsign: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl QueryPoint {
    pub fn new(cid: impl Into<String>, callsign: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            cid: cid.into(),
            callsign: callsign.into(),
            latitude: lat,
            longitude: lon,
        }
    }

    /// Planar point in (x = longitude, y = latitude) order
    pub fn as_point(&self) -> geo::Point<f64> {
        geo::Point::new(self.longitude, self.latitude)
    }
}

impl TryFrom<&MemberRecord> for QueryPoint {
    type Error = MalformedRecordError;

    fn try_from(record: &MemberRecord) -> Result<Self, Self::Error> {
        let (latitude, longitude) = match (record.latitude, record.longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => return Err(MalformedRecordError::MissingCoordinates),
        };

        if !latitude.is_finite()
            || !longitude.is_finite()
            || !(-90.0..=90.0).contains(&latitude)
            || !(-180.0..=180.0).contains(&longitude)
        {
            return Err(MalformedRecordError::OutOfRange {
                latitude,
                longitude,
            });
        }

        let cid = match &record.cid {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => return Err(MalformedRecordError::MissingCid),
        };

        let callsign = record
            .callsign
            .clone()
            .unwrap_or_else(|| UNKNOWN_CALLSIGN.to_string());

        Ok(Self {
            cid,
            callsign,
            latitude,
            longitude,
        })
    }
}

/// Outcome of classifying one point
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub point: QueryPoint,
    pub fir: Option<String>,
}

impl ClassificationResult {
    pub fn is_match(&self) -> bool {
        self.fir.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> MemberRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_valid_record() {
        let r = record(r#"{"cid": 1234567, "callsign": "AIC101", "latitude": 19.1, "longitude": 72.8}"#);
        let point = QueryPoint::try_from(&r).unwrap();
        assert_eq!(point.cid, "1234567");
        assert_eq!(point.callsign, "AIC101");
        assert_eq!(point.as_point(), geo::Point::new(72.8, 19.1));
    }

    #[test]
    fn test_missing_coordinates() {
        let r = record(r#"{"cid": 123, "callsign": "ABC1"}"#);
        assert_eq!(
            QueryPoint::try_from(&r),
            Err(MalformedRecordError::MissingCoordinates)
        );

        let r = record(r#"{"cid": 123, "latitude": 10.0, "longitude": null}"#);
        assert_eq!(
            QueryPoint::try_from(&r),
            Err(MalformedRecordError::MissingCoordinates)
        );
    }

    #[test]
    fn test_missing_callsign_uses_sentinel() {
        let r = record(r#"{"cid": "987", "latitude": 1.0, "longitude": 2.0}"#);
        let point = QueryPoint::try_from(&r).unwrap();
        assert_eq!(point.cid, "987");
        assert_eq!(point.callsign, UNKNOWN_CALLSIGN);
    }

    #[test]
    fn test_missing_cid() {
        let r = record(r#"{"callsign": "X", "latitude": 1.0, "longitude": 2.0}"#);
        assert_eq!(QueryPoint::try_from(&r), Err(MalformedRecordError::MissingCid));
    }

    #[test]
    fn test_out_of_range() {
        let r = record(r#"{"cid": 1, "latitude": 91.0, "longitude": 2.0}"#);
        assert!(matches!(
            QueryPoint::try_from(&r),
            Err(MalformedRecordError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_feed_members_pilots_first() {
        let feed: DataFeed = serde_json::from_str(
            r#"{
                "general": {"version": 3},
                "pilots": [{"cid": 1, "latitude": 0.0, "longitude": 0.0}],
                "controllers": [{"cid": 2, "callsign": "VIDF_CTR"}]
            }"#,
        )
        .unwrap();
        let members = feed.into_members();
        assert_eq!(members.len(), 2);
        assert_eq!(members[1].callsign.as_deref(), Some("VIDF_CTR"));
    }

    #[test]
    fn test_feed_missing_lists() {
        let feed: DataFeed = serde_json::from_str("{}").unwrap();
        assert!(feed.into_members().is_empty());
    }
}
