//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Visits a root child must gain beyond the current best before the
    /// blocking search stops (default: 1000).
    pub visit_budget: u32,

    /// Root visits between snapshots of the interruptible search
    /// (default: 100).
    pub snapshot_interval: u32,

    /// Maximum plies played in one rollout (default: 20).
    pub rollout_depth: usize,

    /// Neighbourhood radius for regular expansion (default: 1).
    pub expand_bias: usize,

    /// Neighbourhood radius for the one-time widening (default: 2).
    pub widen_bias: usize,

    /// Deepest node eligible for widening; the root has depth 1 (default: 2).
    pub widen_max_depth: u32,

    /// Stones that must be on the board before widening applies (default: 8).
    pub widen_min_moves: usize,

    /// Random seed for rollouts.
    /// Same seed produces deterministic searches.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            visit_budget: 1000,
            snapshot_interval: 100,
            rollout_depth: 20,
            expand_bias: 1,
            widen_bias: 2,
            widen_max_depth: 2,
            widen_min_moves: 8,
            seed: 42,
        }
    }
}

impl SearchConfig {
    /// Create a new config with a custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with a custom visit budget.
    pub fn with_visit_budget(mut self, budget: u32) -> Self {
        self.visit_budget = budget;
        self
    }

    /// Create a new config with a custom snapshot interval.
    pub fn with_snapshot_interval(mut self, interval: u32) -> Self {
        self.snapshot_interval = interval.max(1);
        self
    }

    /// Create a new config with a custom rollout depth.
    pub fn with_rollout_depth(mut self, depth: usize) -> Self {
        self.rollout_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.visit_budget, 1000);
        assert_eq!(config.snapshot_interval, 100);
        assert_eq!(config.rollout_depth, 20);
        assert_eq!(config.expand_bias, 1);
        assert_eq!(config.widen_bias, 2);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SearchConfig::default()
            .with_seed(123)
            .with_visit_budget(50)
            .with_rollout_depth(8);

        assert_eq!(config.seed, 123);
        assert_eq!(config.visit_budget, 50);
        assert_eq!(config.rollout_depth, 8);
    }

    #[test]
    fn test_snapshot_interval_is_positive() {
        let config = SearchConfig::default().with_snapshot_interval(0);
        assert_eq!(config.snapshot_interval, 1);
    }

    #[test]
    fn test_serialization() {
        let config = SearchConfig::default().with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
