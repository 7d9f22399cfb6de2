use std::fmt;

/// Outcome counts of one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Input files attempted.
    pub processed: usize,
    /// Input files with at least one skipped output.
    pub failed: usize,
    /// Output files written.
    pub written: usize,
}

impl BatchSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed, {} failed, {} written",
            self.processed, self.failed, self.written
        )
    }
}
