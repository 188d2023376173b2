//! Point-in-Polygon (PIP) FIR lookup.
//!
//! Builds the allow-listed FIR catalog from boundary features and resolves
//! positions to the first FIR whose outer ring contains them.

mod boundary;
mod geometry;
mod service;

pub use boundary::RegionCatalog;
pub use geometry::{outer_ring_polygon, ring_to_polygon, shapes_from_geometry};
pub use service::{matches, PointClassifier};
