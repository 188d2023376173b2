//! firwatch - report which VATSIM pilots and controllers are inside a set of FIRs
//!
//! This library provides the catalog, classifier and cycle runner used by the
//! `firwatch` binary.

pub mod config;
pub mod cycle;
pub mod error;
pub mod models;
pub mod pip;
pub mod report;
pub mod source;
pub mod vatsim;

pub use config::Config;
pub use cycle::{CycleOutcome, CycleRunner, CycleSummary, RunOptions};
pub use error::{CycleError, DataFetchError, MalformedRecordError};
pub use models::{ClassificationResult, QueryPoint, Region};
pub use pip::{PointClassifier, RegionCatalog};
