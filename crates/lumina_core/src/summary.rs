//! End-of-run summaries.

use serde::Serialize;

/// Counts reported at the end of a pipeline stage.
///
/// # Examples
///
/// ```
/// use lumina_core::RunSummary;
///
/// let summary = RunSummary::new(10, 4, 6);
/// assert_eq!(summary.considered(), &10);
/// assert_eq!(summary.already_satisfied(), &4);
/// assert_eq!(summary.attempted(), &6);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct RunSummary {
    /// Source items enumerated
    considered: usize,
    /// Items whose output already existed
    already_satisfied: usize,
    /// Items processed this run
    attempted: usize,
    /// Items generated and persisted
    succeeded: usize,
    /// Items whose generation failed
    failed: usize,
    /// Generated items the store refused
    persist_failures: usize,
}

impl RunSummary {
    /// Summary for a backlog before any item completes.
    pub fn new(considered: usize, already_satisfied: usize, attempted: usize) -> Self {
        Self {
            considered,
            already_satisfied,
            attempted,
            ..Self::default()
        }
    }

    /// Count an item generated and persisted.
    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    /// Count an item whose generation failed.
    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    /// Count a generated item the store refused.
    pub fn record_persist_failure(&mut self) {
        self.persist_failures += 1;
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total items:          {}", self.considered)?;
        writeln!(f, "Already existing:     {}", self.already_satisfied)?;
        writeln!(f, "Processed this run:   {}", self.attempted)?;
        writeln!(f, "Succeeded:            {}", self.succeeded)?;
        writeln!(f, "Failed:               {}", self.failed)?;
        write!(f, "Persistence failures: {}", self.persist_failures)
    }
}
