/// Timing helpers for simulation generations.
///
/// Provides an RAII scope for measuring one generation and a running tally.
use std::time::Instant;

/// Measures elapsed time from creation.
pub struct ProfilerScope {
    start: Instant,
}

impl ProfilerScope {
    /// Starts timing now.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Gets elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Running tally of generation durations.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickTimer {
    last_tick_ms: f64,
    total_ms: f64,
    ticks: u32,
}

impl TickTimer {
    /// Creates an empty timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one generation's duration in milliseconds.
    pub fn record(&mut self, time_ms: f64) {
        self.last_tick_ms = time_ms;
        self.total_ms += time_ms;
        self.ticks += 1;
    }

    /// Records the elapsed time of a finished scope.
    pub fn finish(&mut self, scope: &ProfilerScope) -> f64 {
        let elapsed = scope.elapsed_ms();
        self.record(elapsed);
        elapsed
    }

    /// Gets the last recorded generation time.
    pub fn last_tick_ms(&self) -> f64 {
        self.last_tick_ms
    }

    /// Mean generation time, zero before the first record.
    pub fn mean_tick_ms(&self) -> f64 {
        if self.ticks == 0 {
            0.0
        } else {
            self.total_ms / f64::from(self.ticks)
        }
    }

    /// Number of recorded generations.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }
}
