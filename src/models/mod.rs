//! Core data models for FIR tracking.

pub mod region;
pub mod traffic;

pub use region::{Region, DEFAULT_FIR_CODES};
pub use traffic::{ClassificationResult, DataFeed, MemberRecord, QueryPoint, UNKNOWN_CALLSIGN};
