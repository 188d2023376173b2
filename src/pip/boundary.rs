//! FIR catalog construction from boundary features.

use geo::Polygon;
use geojson::Feature;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::geometry::shapes_from_geometry;
use crate::error::DataFetchError;
use crate::models::Region;
use crate::source::BoundarySource;

/// The allow-listed FIRs and their shapes, in allow-list order.
///
/// Every allow-listed code has an entry, possibly with no shapes.
#[derive(Debug, Clone, Default)]
pub struct RegionCatalog {
    regions: Vec<Region>,
}

impl RegionCatalog {
    /// Select and convert the features belonging to each allow-listed FIR.
    ///
    /// A feature belongs to a code when any of its property values is a
    /// string equal to that code. No key is singled out, so one feature can
    /// land in several regions.
    pub fn build<S: AsRef<str>>(features: &[Feature], allowlist: &[S]) -> Self {
        let regions = allowlist
            .iter()
            .map(|code| {
                let code = code.as_ref();
                let shapes: Vec<Polygon<f64>> = features
                    .iter()
                    .filter(|feature| feature_matches(feature, code))
                    .filter_map(|feature| feature.geometry.as_ref())
                    .flat_map(|geometry| shapes_from_geometry(&geometry.value))
                    .collect();
                Region::with_shapes(code, shapes)
            })
            .collect();

        let catalog = Self { regions };
        catalog.log_summary();
        catalog
    }

    /// Fetch the boundary document and build the catalog from it
    pub async fn fetch<B, S>(source: &B, allowlist: &[S]) -> Result<Self, DataFetchError>
    where
        B: BoundarySource,
        S: AsRef<str>,
    {
        let features = source.fetch_boundaries().await?;
        debug!("Boundary document has {} features", features.len());
        Ok(Self::build(&features, allowlist))
    }

    /// Catalog from already-built regions, kept in the given order
    pub fn from_regions(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn get(&self, code: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.code == code)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.code.as_str())
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.codes().any(|c| c == code)
    }

    /// Number of regions (allow-listed codes)
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Total shapes across all regions
    pub fn shape_count(&self) -> usize {
        self.regions.iter().map(|r| r.shapes.len()).sum()
    }

    fn log_summary(&self) {
        info!(
            "FIR catalog built: {} regions, {} shapes",
            self.len(),
            self.shape_count()
        );
        for region in &self.regions {
            if region.is_empty() {
                warn!("No boundary shapes found for FIR {}", region.code);
            } else {
                debug!(
                    "  {}: {} shapes, bbox {:?}",
                    region.code,
                    region.shapes.len(),
                    region.bbox().map(|r| (r.min().x, r.min().y, r.max().x, r.max().y))
                );
            }
        }
    }
}

fn feature_matches(feature: &Feature, code: &str) -> bool {
    feature
        .properties
        .as_ref()
        .map(|props| {
            props
                .values()
                .any(|value| matches!(value, Value::String(s) if s == code))
        })
        .unwrap_or(false)
}
