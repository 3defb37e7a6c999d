use std::time::{Duration, Instant};

/// Per-call instrumentation: a comparison counter and a stopwatch.
///
/// A fresh meter is created at the start of every evaluator call, so counts
/// never leak from one pass into the next.
#[derive(Debug)]
pub struct Meter {
    comparisons: u64,
    started: Instant,
}

impl Meter {
    pub fn start() -> Self {
        Self { comparisons: 0, started: Instant::now() }
    }

    #[inline]
    pub fn tick(&mut self) { self.comparisons += 1; }

    pub fn comparisons(&self) -> u64 { self.comparisons }

    pub fn elapsed(&self) -> Duration { self.started.elapsed() }
}
