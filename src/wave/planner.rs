//! Entry point tying validation, search and enumeration together.

use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use log::info;

use crate::csp::{BacktrackingSearch, SearchConfig, SearchStatus};
use crate::error::WaveError;

use super::config::{EnumerationConfig, WaveBounds};
use super::enumerator::{WaveEnumerator, WaveOutcome};
use super::evaluator::{WaveEvaluator, WaveSolution};
use super::instance::WaveInstance;
use super::model::WaveModel;

/// Result of a backtracking search for a single wave.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The first wave the search reached.
    Found(WaveSolution),
    /// The search space holds no feasible wave.
    NoFeasibleWave,
    /// The search stopped early (node budget or cancellation) without a wave.
    Interrupted(SearchStatus),
}

impl SearchOutcome {
    /// The wave, if one was found.
    pub fn solution(&self) -> Option<&WaveSolution> {
        match self {
            SearchOutcome::Found(solution) => Some(solution),
            _ => None,
        }
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Found(solution) => write!(f, "{solution}"),
            SearchOutcome::NoFeasibleWave => f.write_str("no feasible wave"),
            SearchOutcome::Interrupted(status) => write!(f, "search interrupted ({status:?})"),
        }
    }
}

/// Plans waves for one validated instance.
///
/// # Examples
///
/// ```
/// use u_wavepick::csp::SearchConfig;
/// use u_wavepick::wave::{Aisle, Order, WaveBounds, WaveInstance, WavePlanner};
///
/// let instance = WaveInstance::new(
///     vec![Order::new(0, vec![3, 0, 1, 0, 0]), Order::new(1, vec![0, 1, 0, 1, 0])],
///     vec![Aisle::new(0, vec![3, 1, 1, 1, 0])],
/// )
/// .unwrap();
/// let planner = WavePlanner::new(&instance, WaveBounds::new(1, 10).unwrap()).unwrap();
///
/// let best = planner.best().unwrap().unwrap();
/// assert_eq!(best.orders, vec![0, 1]);
/// assert_eq!(best.cover.aisles, vec![0]);
///
/// assert!(planner.search(&SearchConfig::default()).unwrap().solution().is_some());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct WavePlanner<'a> {
    evaluator: WaveEvaluator<'a>,
}

impl<'a> WavePlanner<'a> {
    /// Creates a planner. Bounds are re-validated here so that values built
    /// without [`WaveBounds::new`] are caught before any search.
    pub fn new(instance: &'a WaveInstance, bounds: WaveBounds) -> Result<Self, WaveError> {
        bounds.validate()?;
        info!(
            "wave planner: {} orders, {} aisles, {} item types, bounds [{}, {}]",
            instance.order_count(),
            instance.aisle_count(),
            instance.item_count(),
            bounds.lower(),
            bounds.upper()
        );
        Ok(Self {
            evaluator: WaveEvaluator::new(instance, bounds),
        })
    }

    /// The underlying evaluator.
    pub fn evaluator(&self) -> &WaveEvaluator<'a> {
        &self.evaluator
    }

    /// Finds one feasible wave with the backtracking engine.
    pub fn search(&self, config: &SearchConfig) -> Result<SearchOutcome, WaveError> {
        self.search_with_cancel(config, None)
    }

    /// Like [`search`](Self::search), with a cancellation token.
    pub fn search_with_cancel(
        &self,
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchOutcome, WaveError> {
        let model = WaveModel::new(self.evaluator);
        let result = BacktrackingSearch::run_with_cancel(&model, config, cancel)?;
        info!("wave search: {:?} after {} nodes", result.status, result.nodes);

        let outcome = match (result.status, result.assignment) {
            (SearchStatus::Solved, Some(assignment)) => self
                .evaluator
                .evaluate(&assignment)
                .map_or(SearchOutcome::NoFeasibleWave, SearchOutcome::Found),
            (SearchStatus::NodeLimit | SearchStatus::Cancelled, _) => {
                SearchOutcome::Interrupted(result.status)
            }
            _ => SearchOutcome::NoFeasibleWave,
        };
        Ok(outcome)
    }

    /// Enumerates and ranks every feasible wave.
    pub fn enumerate(&self, config: &EnumerationConfig) -> Result<WaveOutcome, WaveError> {
        WaveEnumerator::new(self.evaluator).run(config)
    }

    /// Like [`enumerate`](Self::enumerate), with a cancellation token.
    pub fn enumerate_with_cancel(
        &self,
        config: &EnumerationConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<WaveOutcome, WaveError> {
        WaveEnumerator::new(self.evaluator).run_with_cancel(config, cancel)
    }

    /// The most efficient wave (first in enumeration order among ties), by
    /// exhaustive enumeration. `Ok(None)` means no feasible wave exists.
    pub fn best(&self) -> Result<Option<WaveSolution>, WaveError> {
        let outcome = self.enumerate(&EnumerationConfig::default())?;
        Ok(outcome.best().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::{ValueOrder, VariableOrder};
    use crate::wave::{Aisle, EnumerationStrategy, Order};

    fn reference_instance() -> WaveInstance {
        WaveInstance::new(
            vec![
                Order::new(0, vec![2, 0, 1]),
                Order::new(1, vec![1, 1, 0]),
                Order::new(2, vec![0, 2, 1]),
                Order::new(3, vec![1, 0, 2]),
            ],
            vec![
                Aisle::new(0, vec![2, 1, 1]),
                Aisle::new(1, vec![1, 2, 1]),
                Aisle::new(2, vec![1, 1, 2]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_search_result_is_enumerated() {
        let instance = reference_instance();
        let planner = WavePlanner::new(&instance, WaveBounds::new(3, 6).unwrap()).unwrap();
        let outcome = planner.enumerate(&EnumerationConfig::default()).unwrap();
        let ranking = outcome.ranking().unwrap();

        for variable_order in [VariableOrder::FirstUnassigned, VariableOrder::MinimumRemainingValues] {
            for value_order in [ValueOrder::DomainOrder, ValueOrder::Reversed, ValueOrder::Shuffled] {
                let config = SearchConfig::default()
                    .with_variable_order(variable_order)
                    .with_value_order(value_order);
                let found = planner.search(&config).unwrap();
                let solution = found.solution().unwrap();
                assert!(
                    ranking.entries.iter().any(|e| &e.solution == solution),
                    "{solution} missing from enumeration"
                );
            }
        }
    }

    #[test]
    fn test_best_matches_enumeration() {
        let instance = reference_instance();
        let planner = WavePlanner::new(&instance, WaveBounds::new(3, 6).unwrap()).unwrap();
        let best = planner.best().unwrap().unwrap();

        assert_eq!(best.orders, vec![3]);
        assert!((best.efficiency() - 3.0).abs() < 1e-12);

        let bounded = planner
            .enumerate(&EnumerationConfig::default().with_strategy(EnumerationStrategy::BoundedSubsets))
            .unwrap();
        assert!((bounded.best().unwrap().efficiency() - best.efficiency()).abs() < 1e-12);
    }

    #[test]
    fn test_no_feasible_wave() {
        let instance = reference_instance();
        let planner = WavePlanner::new(&instance, WaveBounds::new(50, 60).unwrap()).unwrap();

        assert_eq!(
            planner.search(&SearchConfig::default()).unwrap(),
            SearchOutcome::NoFeasibleWave
        );
        assert_eq!(planner.best(), Ok(None));
        assert!(!planner.enumerate(&EnumerationConfig::default()).unwrap().is_feasible());
    }

    #[test]
    fn test_search_interrupted() {
        let instance = reference_instance();
        let planner = WavePlanner::new(&instance, WaveBounds::new(3, 6).unwrap()).unwrap();

        let outcome = planner
            .search(&SearchConfig::default().with_node_limit(1))
            .unwrap();
        assert_eq!(outcome, SearchOutcome::Interrupted(SearchStatus::NodeLimit));

        let cancel = Arc::new(AtomicBool::new(true));
        let outcome = planner
            .search_with_cancel(&SearchConfig::default(), Some(cancel.clone()))
            .unwrap();
        assert_eq!(outcome, SearchOutcome::Interrupted(SearchStatus::Cancelled));

        let outcome = planner
            .enumerate_with_cancel(&EnumerationConfig::default(), Some(cancel))
            .unwrap();
        assert!(!outcome.is_complete());
    }

    #[test]
    fn test_invalid_configs_surface_as_errors() {
        let instance = reference_instance();
        let planner = WavePlanner::new(&instance, WaveBounds::new(3, 6).unwrap()).unwrap();

        assert_eq!(
            planner.search(&SearchConfig::default().with_node_limit(0)),
            Err(WaveError::InvalidConfig(
                "node_limit must be positive when set".into()
            ))
        );
        assert!(matches!(
            planner.enumerate(&EnumerationConfig::default().with_max_candidates(0)),
            Err(WaveError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_display() {
        let instance = reference_instance();
        let planner = WavePlanner::new(&instance, WaveBounds::new(50, 60).unwrap()).unwrap();
        let text = planner.search(&SearchConfig::default()).unwrap().to_string();
        assert_eq!(text, "no feasible wave");
    }
}
