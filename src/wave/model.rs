//! Wave selection as a constraint satisfaction problem.

use crate::csp::{Assignment, ConstraintProblem};

use super::evaluator::WaveEvaluator;

const SELECTION: [bool; 2] = [false, true];

/// Exposes wave selection to the [`csp`](crate::csp) search engine.
///
/// One boolean variable per order (position in id order), domain
/// `[false, true]`. The wave constraints are global, so no variable has
/// neighbors; conflict counting and the goal test are delegated to
/// [`WaveEvaluator`].
#[derive(Debug, Clone, Copy)]
pub struct WaveModel<'a> {
    evaluator: WaveEvaluator<'a>,
}

impl<'a> WaveModel<'a> {
    /// Wraps an evaluator.
    pub fn new(evaluator: WaveEvaluator<'a>) -> Self {
        Self { evaluator }
    }

    /// The wrapped evaluator.
    pub fn evaluator(&self) -> &WaveEvaluator<'a> {
        &self.evaluator
    }
}

impl ConstraintProblem for WaveModel<'_> {
    type Value = bool;

    fn variable_count(&self) -> usize {
        self.evaluator.instance().order_count()
    }

    fn domain(&self, _var: usize) -> &[bool] {
        &SELECTION
    }

    fn conflicts(&self, var: usize, value: &bool, assignment: &Assignment<bool>) -> usize {
        self.evaluator.conflict_count(&assignment.with(var, *value))
    }

    fn goal_test(&self, assignment: &Assignment<bool>) -> bool {
        self.evaluator.goal_test(assignment)
    }

    fn variable_name(&self, var: usize) -> String {
        match self.evaluator.instance().orders().get(var) {
            Some(order) => format!("order-{}", order.id),
            None => format!("order@{var}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::{BacktrackingSearch, SearchConfig, SearchStatus, ValueOrder, VariableOrder};
    use crate::wave::{Aisle, Order, WaveBounds, WaveInstance};

    fn instance() -> WaveInstance {
        WaveInstance::new(
            vec![
                Order::new(10, vec![2, 0, 1]),
                Order::new(11, vec![1, 1, 0]),
                Order::new(12, vec![0, 2, 1]),
                Order::new(13, vec![1, 0, 2]),
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
    fn test_shape() {
        let instance = instance();
        let model = WaveModel::new(WaveEvaluator::new(&instance, WaveBounds::new(3, 6).unwrap()));

        assert_eq!(model.variable_count(), 4);
        for var in 0..4 {
            assert_eq!(model.domain(var), &[false, true]);
            assert!(model.neighbors(var).is_empty());
        }
        assert_eq!(model.variable_name(2), "order-12");
    }

    #[test]
    fn test_conflicts_do_not_touch_assignment() {
        let instance = instance();
        let model = WaveModel::new(WaveEvaluator::new(&instance, WaveBounds::new(3, 4).unwrap()));
        let partial = Assignment::new(4).with(0, true);

        // 3 + 2 items exceeds UB = 4.
        assert_eq!(model.conflicts(1, &true, &partial), 1);
        assert_eq!(model.conflicts(1, &false, &partial), 0);
        assert_eq!(partial.assigned_count(), 1);
    }

    #[test]
    fn test_backtracking_finds_goal() {
        let instance = instance();
        let model = WaveModel::new(WaveEvaluator::new(&instance, WaveBounds::new(3, 6).unwrap()));

        let result = BacktrackingSearch::run(&model, &SearchConfig::default()).unwrap();
        assert_eq!(result.status, SearchStatus::Solved);
        let assignment = result.assignment.unwrap();
        assert!(model.goal_test(&assignment));
        // Domain order tries "skip" first, so the first goal is the last order alone.
        assert_eq!(assignment, Assignment::complete([false, false, false, true]));
    }

    #[test]
    fn test_backtracking_with_heuristics() {
        let instance = instance();
        let model = WaveModel::new(WaveEvaluator::new(&instance, WaveBounds::new(3, 6).unwrap()));
        let config = SearchConfig::default()
            .with_variable_order(VariableOrder::MinimumRemainingValues)
            .with_value_order(ValueOrder::Reversed);

        let result = BacktrackingSearch::run(&model, &config).unwrap();
        assert!(result.is_solved());
        assert!(model.goal_test(result.assignment.as_ref().unwrap()));
    }

    #[test]
    fn test_backtracking_reports_no_solution() {
        let instance = instance();
        // No selection reaches 100 items.
        let model = WaveModel::new(WaveEvaluator::new(
            &instance,
            WaveBounds::new(100, 200).unwrap(),
        ));

        let result = BacktrackingSearch::run(&model, &SearchConfig::default()).unwrap();
        assert_eq!(result.status, SearchStatus::NoSolution);
        assert!(result.assignment.is_none());
    }
}
