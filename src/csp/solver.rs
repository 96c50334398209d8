//! Backtracking search engine.
//!
//! # Algorithm
//!
//! 1. If the assignment is complete, return it when it passes the goal test
//! 2. Otherwise select an unassigned variable (per [`VariableOrder`])
//! 3. For each value (per [`ValueOrder`]) whose trial extension has zero
//!    conflicts, recurse on the extended assignment
//! 4. Backtrack when every value fails
//!
//! Every `var = value` trial counts as one node against the optional budget.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::assignment::Assignment;
use super::config::{SearchConfig, ValueOrder, VariableOrder};
use super::error::CspError;
use super::problem::ConstraintProblem;

/// Status of the search after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// A complete assignment passing the goal test was found.
    Solved,
    /// The whole space was searched; no solution exists.
    NoSolution,
    /// The node budget ran out before the search finished.
    NodeLimit,
    /// Cancelled externally.
    Cancelled,
}

/// Result of a backtracking run.
#[derive(Debug, Clone)]
pub struct SearchResult<V> {
    /// Final status.
    pub status: SearchStatus,
    /// The satisfying assignment, when `status == Solved`.
    pub assignment: Option<Assignment<V>>,
    /// Number of `var = value` trials made.
    pub nodes: usize,
    /// Solve time in milliseconds.
    pub solve_time_ms: u64,
}

impl<V> SearchResult<V> {
    /// Whether a solution was found.
    pub fn is_solved(&self) -> bool {
        self.status == SearchStatus::Solved
    }

    /// Whether the search proved that no solution exists.
    pub fn is_exhausted(&self) -> bool {
        self.status == SearchStatus::NoSolution
    }
}

/// Depth-first backtracking search over a [`ConstraintProblem`].
pub struct BacktrackingSearch;

impl BacktrackingSearch {
    /// Runs the search to completion (or until the node budget runs out).
    ///
    /// # Examples
    ///
    /// ```
    /// use u_wavepick::csp::{Assignment, BacktrackingSearch, ConstraintProblem, SearchConfig};
    ///
    /// /// Pick at least two of three switches.
    /// struct AtLeastTwo;
    ///
    /// impl ConstraintProblem for AtLeastTwo {
    ///     type Value = bool;
    ///     fn variable_count(&self) -> usize { 3 }
    ///     fn domain(&self, _var: usize) -> &[bool] { &[false, true] }
    ///     fn conflicts(&self, _var: usize, _value: &bool, _a: &Assignment<bool>) -> usize { 0 }
    ///     fn goal_test(&self, a: &Assignment<bool>) -> bool {
    ///         a.iter().filter(|(_, v)| v == &Some(&true)).count() >= 2
    ///     }
    /// }
    ///
    /// let result = BacktrackingSearch::run(&AtLeastTwo, &SearchConfig::default()).unwrap();
    /// assert!(result.is_solved());
    /// ```
    pub fn run<P: ConstraintProblem>(
        problem: &P,
        config: &SearchConfig,
    ) -> Result<SearchResult<P::Value>, CspError> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// The token is checked before every trial.
    pub fn run_with_cancel<P: ConstraintProblem>(
        problem: &P,
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult<P::Value>, CspError> {
        config.validate()?;

        let start_time = Instant::now();
        let mut state = SearchState {
            problem,
            config,
            rng: StdRng::seed_from_u64(config.seed.unwrap_or(42)),
            nodes: 0,
            halted: None,
            cancel,
        };

        let root = Assignment::new(problem.variable_count());
        let found = state.backtrack(&root);

        let status = match (&found, state.halted) {
            (Some(_), _) => SearchStatus::Solved,
            (None, Some(halt)) => halt,
            (None, None) => SearchStatus::NoSolution,
        };

        debug!(
            "backtracking finished: {:?} after {} nodes over {} variables",
            status,
            state.nodes,
            problem.variable_count()
        );

        Ok(SearchResult {
            status,
            assignment: found,
            nodes: state.nodes,
            solve_time_ms: start_time.elapsed().as_millis() as u64,
        })
    }
}

struct SearchState<'a, P: ConstraintProblem> {
    problem: &'a P,
    config: &'a SearchConfig,
    rng: StdRng,
    nodes: usize,
    halted: Option<SearchStatus>,
    cancel: Option<Arc<AtomicBool>>,
}

impl<P: ConstraintProblem> SearchState<'_, P> {
    fn backtrack(&mut self, assignment: &Assignment<P::Value>) -> Option<Assignment<P::Value>> {
        let Some(var) = self.select_variable(assignment) else {
            return self
                .problem
                .goal_test(assignment)
                .then(|| assignment.clone());
        };

        for value in self.order_values(var, assignment) {
            if self.should_halt() {
                return None;
            }
            self.nodes += 1;

            if self.problem.conflicts(var, &value, assignment) > 0 {
                continue;
            }
            trace!("{} = {:?}", self.problem.variable_name(var), value);

            let extended = assignment.with(var, value);
            if let Some(solution) = self.backtrack(&extended) {
                return Some(solution);
            }
            if self.halted.is_some() {
                return None;
            }
        }
        None
    }

    fn should_halt(&mut self) -> bool {
        if self.halted.is_some() {
            return true;
        }
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                self.halted = Some(SearchStatus::Cancelled);
                return true;
            }
        }
        if let Some(limit) = self.config.node_limit {
            if self.nodes >= limit {
                self.halted = Some(SearchStatus::NodeLimit);
                return true;
            }
        }
        false
    }

    fn select_variable(&self, assignment: &Assignment<P::Value>) -> Option<usize> {
        match self.config.variable_order {
            VariableOrder::FirstUnassigned => assignment.first_unassigned(),
            VariableOrder::MinimumRemainingValues => {
                let mut best: Option<(usize, usize)> = None;
                for var in (0..assignment.len()).filter(|&v| !assignment.is_assigned(v)) {
                    let remaining = self
                        .problem
                        .domain(var)
                        .iter()
                        .filter(|value| self.problem.conflicts(var, value, assignment) == 0)
                        .count();
                    match best {
                        Some((best_remaining, _)) if remaining >= best_remaining => {}
                        _ => best = Some((remaining, var)),
                    }
                }
                best.map(|(_, var)| var)
            }
        }
    }

    fn order_values(&mut self, var: usize, assignment: &Assignment<P::Value>) -> Vec<P::Value> {
        let mut values = self.problem.domain(var).to_vec();
        match self.config.value_order {
            ValueOrder::DomainOrder => {}
            ValueOrder::Reversed => values.reverse(),
            ValueOrder::LeastConstraining => {
                values.sort_by_cached_key(|value| self.problem.conflicts(var, value, assignment));
            }
            ValueOrder::Shuffled => values.shuffle(&mut self.rng),
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- N-queens: one variable per column, value = row ----

    struct Queens {
        n: usize,
        rows: Vec<usize>,
        neighbors: Vec<Vec<usize>>,
    }

    impl Queens {
        fn new(n: usize) -> Self {
            Self {
                n,
                rows: (0..n).collect(),
                neighbors: (0..n)
                    .map(|c| (0..n).filter(|&o| o != c).collect())
                    .collect(),
            }
        }

        fn attacks(c1: usize, r1: usize, c2: usize, r2: usize) -> bool {
            r1 == r2 || c1.abs_diff(c2) == r1.abs_diff(r2)
        }
    }

    impl ConstraintProblem for Queens {
        type Value = usize;

        fn variable_count(&self) -> usize {
            self.n
        }

        fn domain(&self, _var: usize) -> &[usize] {
            &self.rows
        }

        fn neighbors(&self, var: usize) -> &[usize] {
            &self.neighbors[var]
        }

        fn conflicts(&self, var: usize, value: &usize, a: &Assignment<usize>) -> usize {
            self.neighbors(var)
                .iter()
                .filter(|&&other| match a.get(other) {
                    Some(&row) => Self::attacks(var, *value, other, row),
                    None => false,
                })
                .count()
        }

        fn goal_test(&self, a: &Assignment<usize>) -> bool {
            a.is_complete()
                && (0..self.n).all(|c| {
                    let row = *a.get(c).unwrap();
                    (0..self.n)
                        .filter(|&o| o != c)
                        .all(|o| !Self::attacks(c, row, o, *a.get(o).unwrap()))
                })
        }
    }

    // ---- Three booleans that must be pairwise different: unsatisfiable ----

    struct PairwiseDistinctBools;

    impl ConstraintProblem for PairwiseDistinctBools {
        type Value = bool;

        fn variable_count(&self) -> usize {
            3
        }

        fn domain(&self, _var: usize) -> &[bool] {
            &[false, true]
        }

        fn conflicts(&self, var: usize, value: &bool, a: &Assignment<bool>) -> usize {
            (0..3)
                .filter(|&o| o != var && a.get(o) == Some(value))
                .count()
        }

        fn goal_test(&self, a: &Assignment<bool>) -> bool {
            a.is_complete() && a.get(0) != a.get(1) && a.get(1) != a.get(2) && a.get(0) != a.get(2)
        }
    }

    #[test]
    fn test_four_queens_solved() {
        let problem = Queens::new(4);
        let result = BacktrackingSearch::run(&problem, &SearchConfig::default()).unwrap();

        assert!(result.is_solved());
        let assignment = result.assignment.unwrap();
        assert!(problem.goal_test(&assignment));
        // First solution in domain order.
        assert_eq!(assignment, Assignment::complete([1, 3, 0, 2]));
    }

    #[test]
    fn test_heuristics_still_reach_a_goal() {
        let problem = Queens::new(6);
        for variable_order in [VariableOrder::FirstUnassigned, VariableOrder::MinimumRemainingValues] {
            for value_order in [
                ValueOrder::DomainOrder,
                ValueOrder::Reversed,
                ValueOrder::LeastConstraining,
                ValueOrder::Shuffled,
            ] {
                let config = SearchConfig::default()
                    .with_variable_order(variable_order)
                    .with_value_order(value_order)
                    .with_seed(42);
                let result = BacktrackingSearch::run(&problem, &config).unwrap();
                assert!(
                    result.is_solved(),
                    "{variable_order:?}/{value_order:?} failed with {:?}",
                    result.status
                );
                assert!(problem.goal_test(result.assignment.as_ref().unwrap()));
            }
        }
    }

    #[test]
    fn test_shuffled_is_deterministic_per_seed() {
        let problem = Queens::new(8);
        let config = SearchConfig::default()
            .with_value_order(ValueOrder::Shuffled)
            .with_seed(7);

        let a = BacktrackingSearch::run(&problem, &config).unwrap();
        let b = BacktrackingSearch::run(&problem, &config).unwrap();
        assert_eq!(a.assignment, b.assignment);
        assert_eq!(a.nodes, b.nodes);
    }

    #[test]
    fn test_unsatisfiable_is_exhausted() {
        let result =
            BacktrackingSearch::run(&PairwiseDistinctBools, &SearchConfig::default()).unwrap();
        assert_eq!(result.status, SearchStatus::NoSolution);
        assert!(result.is_exhausted());
        assert!(result.assignment.is_none());
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_three_queens_no_solution() {
        let result = BacktrackingSearch::run(&Queens::new(3), &SearchConfig::default()).unwrap();
        assert_eq!(result.status, SearchStatus::NoSolution);
    }

    #[test]
    fn test_node_limit() {
        let config = SearchConfig::default().with_node_limit(3);
        let result = BacktrackingSearch::run(&Queens::new(8), &config).unwrap();

        assert_eq!(result.status, SearchStatus::NodeLimit);
        assert_eq!(result.nodes, 3);
        assert!(result.assignment.is_none());
    }

    #[test]
    fn test_cancelled_before_start() {
        let cancel = Arc::new(AtomicBool::new(true));
        let result = BacktrackingSearch::run_with_cancel(
            &Queens::new(4),
            &SearchConfig::default(),
            Some(cancel),
        )
        .unwrap();

        assert_eq!(result.status, SearchStatus::Cancelled);
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SearchConfig::default().with_node_limit(0);
        assert_eq!(
            BacktrackingSearch::run(&Queens::new(4), &config).unwrap_err(),
            CspError::InvalidConfig("node_limit must be positive when set".into())
        );
    }

    #[test]
    fn test_zero_variables_uses_goal_test() {
        struct Empty(bool);
        impl ConstraintProblem for Empty {
            type Value = bool;
            fn variable_count(&self) -> usize {
                0
            }
            fn domain(&self, _var: usize) -> &[bool] {
                &[]
            }
            fn conflicts(&self, _: usize, _: &bool, _: &Assignment<bool>) -> usize {
                0
            }
            fn goal_test(&self, _: &Assignment<bool>) -> bool {
                self.0
            }
        }

        let solved = BacktrackingSearch::run(&Empty(true), &SearchConfig::default()).unwrap();
        assert!(solved.is_solved());
        let unsolved = BacktrackingSearch::run(&Empty(false), &SearchConfig::default()).unwrap();
        assert_eq!(unsolved.status, SearchStatus::NoSolution);
    }
}
