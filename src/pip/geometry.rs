use geo::{Coord, LineString, Polygon};
use geojson::{PolygonType, Position, Value};
use tracing::debug;

/// Convert a GeoJSON geometry into the simple shapes used for containment.
///
/// A `Polygon` yields its outer ring, a `MultiPolygon` yields the outer ring
/// of every part. Interior rings are dropped. Any other geometry type yields
/// nothing.
pub fn shapes_from_geometry(value: &Value) -> Vec<Polygon<f64>> {
    match value {
        Value::Polygon(rings) => outer_ring_polygon(rings).into_iter().collect(),
        Value::MultiPolygon(parts) => parts.iter().filter_map(outer_ring_polygon).collect(),
        _ => {
            debug!("Ignoring non-polygon geometry");
            Vec::new()
        }
    }
}

/// Build a polygon from the first ring of a GeoJSON polygon
pub fn outer_ring_polygon(rings: &PolygonType) -> Option<Polygon<f64>> {
    let outer = rings.first()?;
    ring_to_polygon(outer)
}

/// Build a hole-free polygon from one ring of positions.
///
/// Positions with fewer than two ordinates are skipped. The ring may or may
/// not repeat its first vertex at the end; either way it needs at least
/// three distinct vertices.
pub fn ring_to_polygon(ring: &[Position]) -> Option<Polygon<f64>> {
    let mut coords: Vec<Coord<f64>> = ring
        .iter()
        .filter_map(|pos| match pos.as_slice() {
            [x, y, ..] => Some(Coord { x: *x, y: *y }),
            _ => None,
        })
        .collect();

    // Drop the closing vertex so the count below is of distinct vertices
    if coords.len() > 1 && coords.first() == coords.last() {
        coords.pop();
    }

    if coords.len() < 3 {
        debug!("Dropping ring with {} vertices", coords.len());
        return None;
    }

    // Polygon::new closes the exterior ring
    Some(Polygon::new(LineString::new(coords), vec![]))
}
