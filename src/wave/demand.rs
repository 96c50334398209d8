//! Item demand aggregation.

use std::collections::HashSet;

use crate::csp::Assignment;
use crate::error::{Entity, WaveError};

use super::instance::{Order, OrderId, WaveInstance};

/// Per-item-type quantity required by a set of orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandVector(Vec<u64>);

impl DemandVector {
    /// All-zero demand over `item_count` item types.
    pub fn zeros(item_count: usize) -> Self {
        Self(vec![0; item_count])
    }

    /// Wraps raw per-item quantities.
    pub fn from_quantities(quantities: Vec<u64>) -> Self {
        Self(quantities)
    }

    /// Sum over all item types, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.0.iter().fold(0, |acc, &q| acc.saturating_add(q))
    }

    /// Whether nothing is demanded.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&q| q == 0)
    }

    /// Number of item types.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vector has no item types at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Quantities, indexed by item type.
    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    /// Adds one order's quantities; `None` if any item type overflows.
    fn checked_add(&mut self, quantities: &[u64]) -> Option<()> {
        for (d, &q) in self.0.iter_mut().zip(quantities) {
            *d = d.checked_add(q)?;
        }
        Some(())
    }

    /// Adds quantities that are known to fit (distinct orders of one
    /// instance).
    fn saturating_add(&mut self, quantities: &[u64]) {
        for (d, &q) in self.0.iter_mut().zip(quantities) {
            *d = d.saturating_add(q);
        }
    }
}

/// Sums per-item quantities over the given orders.
///
/// An empty selection yields the all-zero vector. Each id is summed as many
/// times as it appears; use [`WaveEvaluator::is_feasible`] when a selection
/// must list each order once. Repeating ids can push a sum past `u64::MAX`,
/// which is reported as [`WaveError::QuantityOverflow`].
///
/// [`WaveEvaluator::is_feasible`]: super::WaveEvaluator::is_feasible
///
/// # Examples
///
/// ```
/// use u_wavepick::wave::{aggregate, Aisle, Order, WaveInstance};
///
/// let instance = WaveInstance::new(
///     vec![Order::new(0, vec![3, 0, 1]), Order::new(1, vec![0, 1, 0])],
///     vec![Aisle::new(0, vec![3, 1, 1])],
/// )
/// .unwrap();
///
/// let demand = aggregate(&instance, &[0, 1]).unwrap();
/// assert_eq!(demand.as_slice(), &[3, 1, 1]);
/// ```
pub fn aggregate(instance: &WaveInstance, order_ids: &[OrderId]) -> Result<DemandVector, WaveError> {
    let mut demand = DemandVector::zeros(instance.item_count());
    for &id in order_ids {
        demand
            .checked_add(&instance.order(id)?.quantities)
            .ok_or_else(|| overflow(id))?;
    }
    Ok(demand)
}

/// Total item count over the given orders.
pub fn total_items(instance: &WaveInstance, order_ids: &[OrderId]) -> Result<u64, WaveError> {
    order_ids.iter().try_fold(0u64, |acc, &id| {
        let order = instance.order(id)?;
        acc.checked_add(order.total_items()).ok_or_else(|| overflow(id))
    })
}

fn overflow(id: OrderId) -> WaveError {
    WaveError::QuantityOverflow {
        entity: Entity::Demand,
        id,
    }
}

/// Demand of the orders marked `true` in an order-selection assignment.
///
/// Variables are order positions; unassigned slots count as not selected.
pub(crate) fn demand_of_assignment(
    instance: &WaveInstance,
    assignment: &Assignment<bool>,
) -> DemandVector {
    let mut demand = DemandVector::zeros(instance.item_count());
    for order in selected(instance, assignment) {
        demand.saturating_add(&order.quantities);
    }
    demand
}

/// Total items of the orders marked `true` in an assignment.
pub(crate) fn total_of_assignment(instance: &WaveInstance, assignment: &Assignment<bool>) -> u64 {
    selected(instance, assignment).fold(0, |acc, o| acc.saturating_add(o.total_items()))
}

/// Ids of the orders marked `true`, ascending.
pub(crate) fn selected_ids(instance: &WaveInstance, assignment: &Assignment<bool>) -> Vec<OrderId> {
    selected(instance, assignment).map(|o| o.id).collect()
}

fn selected<'a>(
    instance: &'a WaveInstance,
    assignment: &'a Assignment<bool>,
) -> impl Iterator<Item = &'a Order> + 'a {
    instance
        .orders()
        .iter()
        .enumerate()
        .filter(move |&(pos, _)| assignment.get(pos) == Some(&true))
        .map(|(_, order)| order)
}

/// Builds the complete assignment selecting exactly `order_ids`.
pub(crate) fn assignment_of(
    instance: &WaveInstance,
    order_ids: &[OrderId],
) -> Result<Assignment<bool>, WaveError> {
    let mut picked = vec![false; instance.order_count()];
    let mut seen = HashSet::with_capacity(order_ids.len());
    for &id in order_ids {
        if !seen.insert(id) {
            return Err(WaveError::DuplicateOrder(id));
        }
        picked[instance.order_position(id)?] = true;
    }
    Ok(Assignment::complete(picked))
}
