//! Backtracking search configuration.

use super::error::CspError;

/// Which unassigned variable the search branches on next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariableOrder {
    /// Lowest-index unassigned variable.
    #[default]
    FirstUnassigned,

    /// Variable with the fewest conflict-free values left (MRV).
    /// Ties go to the lower index.
    MinimumRemainingValues,
}

/// In which order the values of the chosen variable are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueOrder {
    /// The order returned by `ConstraintProblem::domain`.
    #[default]
    DomainOrder,

    /// Domain order, reversed.
    Reversed,

    /// Values causing fewer conflicts first (stable on ties).
    LeastConstraining,

    /// Seeded random permutation of the domain.
    Shuffled,
}

/// Configuration parameters for [`BacktrackingSearch`](super::BacktrackingSearch).
///
/// # Examples
///
/// ```
/// use u_wavepick::csp::{SearchConfig, ValueOrder, VariableOrder};
///
/// let config = SearchConfig::default()
///     .with_variable_order(VariableOrder::MinimumRemainingValues)
///     .with_value_order(ValueOrder::Shuffled)
///     .with_seed(7)
///     .with_node_limit(10_000);
/// assert_eq!(config.node_limit, Some(10_000));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Variable selection heuristic.
    pub variable_order: VariableOrder,
    /// Value ordering heuristic.
    pub value_order: ValueOrder,
    /// Random seed for [`ValueOrder::Shuffled`] (None uses 42).
    pub seed: Option<u64>,
    /// Maximum number of `var = value` trials before giving up (None for
    /// unlimited).
    pub node_limit: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            variable_order: VariableOrder::FirstUnassigned,
            value_order: ValueOrder::DomainOrder,
            seed: None,
            node_limit: None,
        }
    }
}

impl SearchConfig {
    /// Sets the variable selection heuristic.
    pub fn with_variable_order(mut self, order: VariableOrder) -> Self {
        self.variable_order = order;
        self
    }

    /// Sets the value ordering heuristic.
    pub fn with_value_order(mut self, order: ValueOrder) -> Self {
        self.value_order = order;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the trial budget.
    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), CspError> {
        if self.node_limit == Some(0) {
            return Err(CspError::InvalidConfig(
                "node_limit must be positive when set".into(),
            ));
        }
        Ok(())
    }
}
