//! Point-in-FIR classification.
//!
//! Containment uses [`geo::Contains`], which excludes the boundary: a point
//! lying exactly on an edge or vertex of a shape is not inside it. Two FIRs
//! that share an edge therefore both miss a point on that edge.
//!
//! There is no spatial index. Each lookup walks every shape of every region
//! in allow-list order, which is fine for a handful of FIRs and a few hundred
//! points per cycle. An index added for larger inputs must keep the
//! first-match-in-allow-list-order result.

use geo::Contains;
use tracing::{debug, trace};

use super::RegionCatalog;
use crate::models::{ClassificationResult, MemberRecord, QueryPoint};

/// Resolves points against a borrowed catalog
pub struct PointClassifier<'a> {
    catalog: &'a RegionCatalog,
}

impl<'a> PointClassifier<'a> {
    pub fn new(catalog: &'a RegionCatalog) -> Self {
        Self { catalog }
    }

    /// First region (in catalog order) with a shape containing the point
    pub fn classify(&self, point: &QueryPoint) -> Option<&'a str> {
        let p = point.as_point();
        self.catalog
            .regions()
            .iter()
            .find(|region| region.shapes.iter().any(|shape| shape.contains(&p)))
            .map(|region| region.code.as_str())
    }

    /// Validate and classify a batch of raw records.
    ///
    /// Records that fail validation are left out of the result.
    pub fn classify_batch(&self, records: &[MemberRecord]) -> Vec<ClassificationResult> {
        let mut skipped = 0usize;

        let results: Vec<ClassificationResult> = records
            .iter()
            .filter_map(|record| match QueryPoint::try_from(record) {
                Ok(point) => Some(point),
                Err(e) => {
                    trace!("Skipping record {:?}: {}", record.cid, e);
                    skipped += 1;
                    None
                }
            })
            .map(|point| {
                let fir = self.classify(&point).map(str::to_string);
                ClassificationResult { point, fir }
            })
            .collect();

        debug!(
            "Classified {} points ({} skipped, {} matched)",
            results.len(),
            skipped,
            results.iter().filter(|r| r.is_match()).count()
        );

        results
    }
}

/// Results that landed in a region
pub fn matches(results: &[ClassificationResult]) -> impl Iterator<Item = &ClassificationResult> {
    results.iter().filter(|r| r.is_match())
}
