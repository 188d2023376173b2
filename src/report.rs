//! Console output for each cycle.

use std::io::{self, Write};

use crate::cycle::CycleSummary;
use crate::error::CycleError;
use crate::models::ClassificationResult;

/// Clear screen and move the cursor home
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";
const SEPARATOR_WIDTH: usize = 30;

/// Receives the outcome of every cycle
pub trait Reporter {
    /// Replace the previous output with this cycle's matches
    fn report(
        &mut self,
        summary: &CycleSummary,
        matches: &[ClassificationResult],
    ) -> io::Result<()>;

    /// Show why a cycle was skipped.
    ///
    /// The previous report stays on screen; the failure line is appended
    /// below it so the last known matches remain visible.
    fn report_failure(&mut self, error: &CycleError) -> io::Result<()>;
}

/// Plain-text reporter writing to a terminal (or any writer)
pub struct ConsoleReporter<W: Write> {
    out: W,
    clear_screen: bool,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout(clear_screen: bool) -> Self {
        Self::new(io::stdout(), clear_screen)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, clear_screen: bool) -> Self {
        Self { out, clear_screen }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            write!(self.out, "{}", CLEAR_SCREEN)?;
        }
        Ok(())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(
        &mut self,
        summary: &CycleSummary,
        matches: &[ClassificationResult],
    ) -> io::Result<()> {
        self.clear()?;

        writeln!(
            self.out,
            "[{}] {} points checked, {} in watched FIRs",
            summary.started_at.format("%Y-%m-%d %H:%M:%SZ"),
            summary.points,
            matches.len()
        )?;
        writeln!(self.out)?;

        for result in matches {
            let Some(fir) = result.fir.as_deref() else {
                continue;
            };
            let point = &result.point;
            writeln!(
                self.out,
                "CID {} Callsign: {} is in FIR {}.",
                point.cid, point.callsign, fir
            )?;
            writeln!(self.out, "Callsign: {}", point.callsign)?;
            writeln!(self.out, "FIR: {}", fir)?;
            writeln!(self.out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
        }

        self.out.flush()
    }

    fn report_failure(&mut self, error: &CycleError) -> io::Result<()> {
        writeln!(self.out, "{}. Retrying next cycle.", error)?;
        self.out.flush()
    }
}
