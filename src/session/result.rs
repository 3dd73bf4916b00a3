use std::time::Duration;

/// Read-only view of a session for the renderer, taken once per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct DrillSnapshot {
    pub cursor: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// Distinct target positions ever typed wrong.
    pub error_positions: usize,
    pub started: bool,
    pub finished: bool,
    pub timed_out: bool,
    pub complete: bool,
    pub elapsed: Duration,
    pub remaining: Option<Duration>,
    pub wpm: f64,
    pub accuracy: f64,
    pub typed: usize,
    pub total: usize,
}

impl DrillSnapshot {
    pub fn progress_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.typed as f64 / self.total as f64 * 100.0
    }
}
