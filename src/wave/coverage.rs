//! Aisle coverage optimization.
//!
//! Exact search: aisle subsets are enumerated by increasing size, and in
//! lexicographic order of aisle id within a size. A subset *covers* a demand
//! vector when its summed stock dominates the demand for every item type.
//! The best cover maximizes `total demand / subset size`; ties keep the first
//! subset found.

use std::fmt;

use itertools::Itertools;

use crate::error::{Entity, WaveError};

use super::demand::DemandVector;
use super::instance::{Aisle, AisleId, WaveInstance};

/// An aisle subset covering a demand vector, with its efficiency.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AisleCover {
    /// Aisle ids in enumeration order (ascending).
    pub aisles: Vec<AisleId>,
    /// Total demand divided by the number of aisles.
    pub efficiency: f64,
}

impl fmt::Display for AisleCover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "aisles {:?} efficiency {:.3}", self.aisles, self.efficiency)
    }
}

/// Finds the most efficient aisle subset covering `demand`.
///
/// Returns `Ok(None)` when the demand is all zero (an empty wave is never
/// valid) or when no subset of aisles covers it.
///
/// # Examples
///
/// ```
/// use u_wavepick::wave::{best_covering_aisles, Aisle, DemandVector, Order, WaveInstance};
///
/// let instance = WaveInstance::new(
///     vec![Order::new(0, vec![5, 0])],
///     vec![Aisle::new(0, vec![2, 0]), Aisle::new(1, vec![2, 0])],
/// )
/// .unwrap();
///
/// let demand = DemandVector::from_quantities(vec![5, 0]);
/// assert_eq!(best_covering_aisles(&instance, &demand).unwrap(), None);
/// ```
pub fn best_covering_aisles(
    instance: &WaveInstance,
    demand: &DemandVector,
) -> Result<Option<AisleCover>, WaveError> {
    check_demand(instance, demand)?;
    Ok(optimal_cover(instance, demand))
}

/// Whether the aisles `aisle_ids` together cover `demand`.
pub fn covers(
    instance: &WaveInstance,
    aisle_ids: &[AisleId],
    demand: &DemandVector,
) -> Result<bool, WaveError> {
    check_demand(instance, demand)?;
    let aisles = aisle_ids
        .iter()
        .map(|&id| instance.aisle(id))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(dominates(&aisles, demand))
}

/// Coverage search for a demand vector already known to have dimension `K`.
pub(crate) fn optimal_cover(instance: &WaveInstance, demand: &DemandVector) -> Option<AisleCover> {
    if demand.is_zero() {
        return None;
    }

    let total = demand.total() as f64;
    let aisles = instance.aisles();
    let mut best: Option<AisleCover> = None;

    for size in 1..=aisles.len() {
        // Efficiency only falls as the subset grows.
        if best.is_some() {
            break;
        }
        for combo in aisles.iter().combinations(size) {
            if !dominates(&combo, demand) {
                continue;
            }
            let efficiency = total / size as f64;
            if best.as_ref().map_or(true, |b| efficiency > b.efficiency) {
                best = Some(AisleCover {
                    aisles: combo.iter().map(|a| a.id).collect(),
                    efficiency,
                });
            }
        }
    }
    best
}

/// Stock is summed with saturation: any sum that reaches `u64::MAX` already
/// meets every possible demand, so the comparison stays exact.
fn dominates(aisles: &[&Aisle], demand: &DemandVector) -> bool {
    demand.as_slice().iter().enumerate().all(|(item, &needed)| {
        aisles
            .iter()
            .fold(0u64, |stock, a| stock.saturating_add(a.quantities[item]))
            >= needed
    })
}

fn check_demand(instance: &WaveInstance, demand: &DemandVector) -> Result<(), WaveError> {
    if demand.len() != instance.item_count() {
        return Err(WaveError::DimensionMismatch {
            entity: Entity::Demand,
            id: 0,
            expected: instance.item_count(),
            found: demand.len(),
        });
    }
    Ok(())
}
