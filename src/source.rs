//! Collaborator traits the cycle runner is built on.
//!
//! The HTTP implementations live in [`crate::vatsim`]; tests supply their own.

use std::future::Future;
use std::time::Duration;

use geojson::Feature;

use crate::error::DataFetchError;
use crate::models::DataFeed;

/// Supplies FIR boundary features
pub trait BoundarySource {
    fn fetch_boundaries(&self) -> impl Future<Output = Result<Vec<Feature>, DataFetchError>>;
}

/// Supplies the live pilot/controller feed
pub trait TrafficSource {
    fn fetch_traffic(&self) -> impl Future<Output = Result<DataFeed, DataFetchError>>;
}

/// Waits between cycles
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// Wall-clock sleeper backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
