//! The fetch → classify → report → wait loop.
//!
//! Every cycle rebuilds the catalog and re-fetches the traffic; nothing is
//! carried from one cycle to the next. A failed fetch skips the rest of the
//! cycle and the loop simply waits for the next one.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::CycleError;
use crate::models::ClassificationResult;
use crate::pip::{PointClassifier, RegionCatalog};
use crate::report::Reporter;
use crate::source::{BoundarySource, Sleeper, TrafficSource};

/// Counts for one completed cycle
#[derive(Debug, Clone, PartialEq)]
pub struct CycleSummary {
    pub started_at: DateTime<Utc>,
    /// Allow-listed regions in the catalog
    pub regions: usize,
    pub shapes: usize,
    /// Records that passed validation and were classified
    pub points: usize,
    /// Records dropped for missing or invalid fields
    pub skipped: usize,
    pub matched: usize,
}

#[derive(Debug)]
pub enum CycleOutcome {
    Completed(CycleSummary),
    Skipped(CycleError),
}

/// Loop settings
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub interval: Duration,
    /// Stop after this many cycles (no wait after the last one); `Some(0)` runs none
    pub max_cycles: Option<usize>,
}

/// Runs cycles over injected sources and a reporter
pub struct CycleRunner<B, T, R> {
    boundaries: B,
    traffic: T,
    reporter: R,
    allowlist: Vec<String>,
}

impl<B, T, R> CycleRunner<B, T, R>
where
    B: BoundarySource,
    T: TrafficSource,
    R: Reporter,
{
    pub fn new(boundaries: B, traffic: T, reporter: R, allowlist: Vec<String>) -> Self {
        Self {
            boundaries,
            traffic,
            reporter,
            allowlist,
        }
    }

    pub fn boundaries(&self) -> &B {
        &self.boundaries
    }

    pub fn traffic(&self) -> &T {
        &self.traffic
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Run a single cycle and report its outcome
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let started_at = Utc::now();

        let catalog = match RegionCatalog::fetch(&self.boundaries, &self.allowlist).await {
            Ok(catalog) => catalog,
            Err(e) => return self.skip(CycleError::Boundaries(e)),
        };

        let records = match self.traffic.fetch_traffic().await {
            Ok(feed) => feed.into_members(),
            Err(e) => return self.skip(CycleError::Traffic(e)),
        };

        let results = PointClassifier::new(&catalog).classify_batch(&records);
        let points = results.len();

        let matches: Vec<ClassificationResult> = results
            .into_iter()
            .filter(|r| {
                r.fir
                    .as_deref()
                    .is_some_and(|code| self.allowlist.iter().any(|c| c == code))
            })
            .collect();

        let summary = CycleSummary {
            started_at,
            regions: catalog.len(),
            shapes: catalog.shape_count(),
            points,
            skipped: records.len() - points,
            matched: matches.len(),
        };

        if let Err(e) = self.reporter.report(&summary, &matches) {
            warn!("Failed to write report: {}", e);
        }

        info!(
            "Cycle complete: {} records, {} classified, {} in watched FIRs",
            records.len(),
            summary.points,
            summary.matched
        );

        CycleOutcome::Completed(summary)
    }

    fn skip(&mut self, error: CycleError) -> CycleOutcome {
        warn!("Skipping cycle: {}", error);
        if let Err(e) = self.reporter.report_failure(&error) {
            warn!("Failed to write report: {}", e);
        }
        CycleOutcome::Skipped(error)
    }

    /// Loop until `shutdown` resolves or `max_cycles` is reached.
    ///
    /// `shutdown` is checked before each cycle and raced against the wait.
    /// Returns the number of cycles run.
    pub async fn run<S, F>(&mut self, sleeper: &S, options: RunOptions, shutdown: F) -> usize
    where
        S: Sleeper,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut cycles = 0usize;

        loop {
            if options.max_cycles.is_some_and(|max| cycles >= max) {
                debug!("Reached {} cycles", cycles);
                break;
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                _ = std::future::ready(()) => {}
            }

            self.run_cycle().await;
            cycles += 1;

            if options.max_cycles.is_some_and(|max| cycles >= max) {
                debug!("Reached {} cycles", cycles);
                break;
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                _ = sleeper.sleep(options.interval) => {}
            }
        }

        cycles
    }
}
