//! VATSIM network sources.

mod fetcher;

pub use fetcher::{check_status, parse_boundaries, parse_data_feed, VatsimClient};
