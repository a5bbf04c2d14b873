//! Statistics collection for searches
//!
//! This module provides structures for collecting and reporting statistics
//! about a completed search.

use std::time::Duration;

/// Statistics collected during a search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStatistics {
    /// Number of rounds performed
    pub iterations: usize,

    /// Total time spent searching
    pub total_time: Duration,

    /// Total number of nodes in the tree
    pub tree_size: usize,

    /// Maximum depth reached in the tree
    pub max_depth: usize,

    /// Time spent past the deadline of a time-limited search
    ///
    /// Always `None` for iteration budgets.
    pub overrun: Option<Duration>,
}

impl SearchStatistics {
    /// Creates a new, empty statistics object
    pub fn new() -> Self {
        SearchStatistics {
            iterations: 0,
            total_time: Duration::from_secs(0),
            tree_size: 1, // Start with root node
            max_depth: 0,
            overrun: None,
        }
    }

    /// Returns the average time per round in microseconds
    pub fn avg_time_per_iteration_us(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.total_time.as_micros() as f64 / self.iterations as f64
    }

    /// Returns the number of rounds per second
    pub fn iterations_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.iterations as f64 / self.total_time.as_secs_f64()
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        let overrun = match self.overrun {
            Some(d) => format!("{:.3} ms", d.as_secs_f64() * 1000.0),
            None => "n/a".to_string(),
        };

        format!(
            "MCTS Search Statistics:\n\
             - Iterations: {}\n\
             - Total time: {:.3} seconds\n\
             - Tree size: {} nodes\n\
             - Max depth: {}\n\
             - Avg time per iteration: {:.3} µs\n\
             - Iterations per second: {:.1}\n\
             - Deadline overrun: {}",
            self.iterations,
            self.total_time.as_secs_f64(),
            self.tree_size,
            self.max_depth,
            self.avg_time_per_iteration_us(),
            self.iterations_per_second(),
            overrun
        )
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_handle_empty_search() {
        let stats = SearchStatistics::new();
        assert_eq!(stats.avg_time_per_iteration_us(), 0.0);
        assert_eq!(stats.iterations_per_second(), 0.0);
        assert!(stats.summary().contains("Deadline overrun: n/a"));
    }

    #[test]
    fn test_rates() {
        let stats = SearchStatistics {
            iterations: 500,
            total_time: Duration::from_millis(250),
            tree_size: 120,
            max_depth: 6,
            overrun: Some(Duration::from_millis(2)),
        };
        assert!((stats.iterations_per_second() - 2000.0).abs() < 1e-6);
        assert!((stats.avg_time_per_iteration_us() - 500.0).abs() < 1e-6);
        assert!(stats.summary().contains("Tree size: 120 nodes"));
    }
}
