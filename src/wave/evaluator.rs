//! Wave feasibility evaluation.
//!
//! Order selections are `Assignment<bool>` values over order positions
//! (orders sorted by id). The evaluator classifies them as follows:
//!
//! | Assignment | Total items | Coverage | Conflicts |
//! |---|---|---|---|
//! | partial or complete | > UB | - | 1 |
//! | partial | <= UB | - | 0 |
//! | complete | < LB, or 0 | - | 1 |
//! | complete | in [LB, UB] | none | 1 |
//! | complete | in [LB, UB] | found | 0 |

use std::fmt;

use log::trace;

use crate::csp::Assignment;
use crate::error::WaveError;

use super::config::WaveBounds;
use super::coverage::{optimal_cover, AisleCover};
use super::demand::{assignment_of, demand_of_assignment, selected_ids, total_of_assignment};
use super::instance::{OrderId, WaveInstance};

/// An accepted wave with its optimal aisle cover.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveSolution {
    /// Selected order ids, ascending.
    pub orders: Vec<OrderId>,
    /// Total item count of the selected orders.
    pub total_items: u64,
    /// Most efficient covering aisle subset.
    pub cover: AisleCover,
}

impl WaveSolution {
    /// Efficiency score of the wave.
    pub fn efficiency(&self) -> f64 {
        self.cover.efficiency
    }
}

impl fmt::Display for WaveSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "orders {:?} ({} items), {}",
            self.orders, self.total_items, self.cover
        )
    }
}

/// Decides whether order selections form valid waves.
#[derive(Debug, Clone, Copy)]
pub struct WaveEvaluator<'a> {
    instance: &'a WaveInstance,
    bounds: WaveBounds,
}

impl<'a> WaveEvaluator<'a> {
    /// Creates an evaluator over an instance and wave bounds.
    pub fn new(instance: &'a WaveInstance, bounds: WaveBounds) -> Self {
        Self { instance, bounds }
    }

    /// The instance being evaluated.
    pub fn instance(&self) -> &'a WaveInstance {
        self.instance
    }

    /// The wave bounds in force.
    pub fn bounds(&self) -> WaveBounds {
        self.bounds
    }

    /// Returns 1 when `assignment` (partial or complete) violates the wave
    /// constraints and 0 otherwise.
    ///
    /// A partial assignment only conflicts once its selected orders exceed
    /// the upper bound, since adding orders can never lower the total. An
    /// assignment that does not range over exactly the instance's orders
    /// always conflicts.
    pub fn conflict_count(&self, assignment: &Assignment<bool>) -> usize {
        if assignment.len() != self.instance.order_count() {
            return 1;
        }
        let total = total_of_assignment(self.instance, assignment);
        if total > self.bounds.upper() {
            return 1;
        }
        if !assignment.is_complete() {
            return 0;
        }
        usize::from(self.evaluate_complete(assignment, total).is_none())
    }

    /// Whether `assignment` is a goal: one value for every order, total items
    /// within bounds and a covering aisle subset exists.
    pub fn goal_test(&self, assignment: &Assignment<bool>) -> bool {
        self.evaluate(assignment).is_some()
    }

    /// The accepted wave for `assignment`, or `None` when it is not a goal.
    pub fn evaluate(&self, assignment: &Assignment<bool>) -> Option<WaveSolution> {
        if assignment.len() != self.instance.order_count() || !assignment.is_complete() {
            return None;
        }
        let total = total_of_assignment(self.instance, assignment);
        self.evaluate_complete(assignment, total)
    }

    /// Whether selecting exactly `order_ids` gives a valid wave.
    pub fn is_feasible(&self, order_ids: &[OrderId]) -> Result<bool, WaveError> {
        let assignment = assignment_of(self.instance, order_ids)?;
        Ok(self.goal_test(&assignment))
    }

    /// Like [`is_feasible`](Self::is_feasible) but returns the wave itself.
    pub fn solution_for(&self, order_ids: &[OrderId]) -> Result<Option<WaveSolution>, WaveError> {
        let assignment = assignment_of(self.instance, order_ids)?;
        Ok(self.evaluate(&assignment))
    }

    fn evaluate_complete(&self, assignment: &Assignment<bool>, total: u64) -> Option<WaveSolution> {
        // The empty wave is rejected whatever the bounds.
        if total == 0 || !self.bounds.contains(total) {
            return None;
        }
        let demand = demand_of_assignment(self.instance, assignment);
        let Some(cover) = optimal_cover(self.instance, &demand) else {
            trace!("no aisle subset covers demand {:?}", demand.as_slice());
            return None;
        };
        Some(WaveSolution {
            orders: selected_ids(self.instance, assignment),
            total_items: total,
            cover,
        })
    }
}
