//! Batch-wide statistics.

use std::fmt;

use crate::solver::TaskResult;

/// Aggregate counters over a completed batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalStats {
    /// Number of tasks submitted.
    pub attempts: usize,
    /// Number of tasks that found a path.
    pub successes: usize,
    /// Sum of path node counts over all tasks.
    pub total_length: usize,
}

impl GlobalStats {
    /// Fold per-task results into global counters.
    ///
    /// A pure, order-independent reduction; callers run it only after
    /// every task has completed, so no counter is ever shared between
    /// running tasks.
    pub fn reduce(results: &[TaskResult]) -> Self {
        let mut stats = Self {
            attempts: results.len(),
            ..Self::default()
        };
        for r in results {
            stats.total_length += r.path_len;
            if r.found {
                stats.successes += 1;
            }
        }
        stats
    }
}

impl fmt::Display for GlobalStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Global statistics ===")?;
        writeln!(f, "Total maze attempts: {}", self.attempts)?;
        writeln!(f, "Total path length over all mazes: {}", self.total_length)?;
        write!(f, "Number of successful mazes: {}", self.successes)
    }
}
