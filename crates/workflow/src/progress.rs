//! Progress reporting with an optional reporter.
//!
//! Counts are a heuristic progress bar driven by elapsed workflow milestones and
//! poll iterations; they do not measure how much remote work is left.

use std::sync::Arc;

use delivery::ProgressReporter;

/// Upper bound of every progress count.
pub const TOTAL: u32 = 100;

/// Amount the count advances per poll iteration.
pub const STEP: u32 = 5;

/// Optional [`ProgressReporter`]; reports are dropped when none is set.
#[derive(Clone, Default)]
pub struct Progress {
    reporter: Option<Arc<dyn ProgressReporter>>,
}

impl Progress {
    /// Wraps `reporter`; `None` silences all reports.
    pub fn new(reporter: Option<Arc<dyn ProgressReporter>>) -> Self {
        Self { reporter }
    }

    /// Forwards one report to the reporter, if any.
    pub fn report(&self, current: u32, total: u32, message: &str) {
        if let Some(reporter) = &self.reporter {
            reporter.report(current, total, message);
        }
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress")
            .field("reporter", &self.reporter.is_some())
            .finish()
    }
}

/// Returns the count after one more poll iteration: advances by [`STEP`]
/// unless that would reach [`TOTAL`].
pub fn advance(step: u32) -> u32 {
    if step + STEP < TOTAL {
        step + STEP
    } else {
        step
    }
}
