//! FIR region types.

use geo::{BoundingRect, Polygon, Rect};

/// FIRs watched when no configuration overrides them
pub const DEFAULT_FIR_CODES: &[&str] = &["VABF", "VIDF", "VOMF", "VECF", "VEGF"];

/// One allow-listed FIR and the shapes that make it up.
///
/// Each shape is the outer ring of a source polygon, in (lon, lat) order.
/// Interior rings are never kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub code: String,
    pub shapes: Vec<Polygon<f64>>,
}

impl Region {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            shapes: Vec::new(),
        }
    }

    pub fn with_shapes(code: impl Into<String>, shapes: Vec<Polygon<f64>>) -> Self {
        Self {
            code: code.into(),
            shapes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Bounding box over all shapes (for logging)
    pub fn bbox(&self) -> Option<Rect<f64>> {
        self.shapes
            .iter()
            .filter_map(|shape| shape.bounding_rect())
            .reduce(|a, b| {
                Rect::new(
                    (a.min().x.min(b.min().x), a.min().y.min(b.min().y)),
                    (a.max().x.max(b.max().x), a.max().y.max(b.max().y)),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    #[test]
    fn test_bbox_spans_all_shapes() {
        let region = Region::with_shapes(
            "VECF",
            vec![
                polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)],
                polygon![(x: 5.0, y: -2.0), (x: 6.0, y: -2.0), (x: 6.0, y: 3.0)],
            ],
        );
        let rect = region.bbox().unwrap();
        assert_eq!(rect.min().x, 0.0);
        assert_eq!(rect.min().y, -2.0);
        assert_eq!(rect.max().x, 6.0);
        assert_eq!(rect.max().y, 3.0);
    }

    #[test]
    fn test_empty_region_has_no_bbox() {
        let region = Region::new("VEGF");
        assert!(region.is_empty());
        assert!(region.bbox().is_none());
    }
}
