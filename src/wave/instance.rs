//! Orders, aisles and the validated problem instance.

use std::collections::{BTreeMap, HashMap};

use crate::error::{Entity, WaveError};

/// Identifier of an order.
pub type OrderId = usize;

/// Identifier of an aisle.
pub type AisleId = usize;

/// A customer order: required quantity per item type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    /// Unique order id.
    pub id: OrderId,
    /// Required quantity for each item type `0..K`.
    pub quantities: Vec<u64>,
}

impl Order {
    /// Creates an order.
    pub fn new(id: OrderId, quantities: Vec<u64>) -> Self {
        Self { id, quantities }
    }

    /// Total number of items across all item types, saturating at
    /// `u64::MAX`. Orders inside a [`WaveInstance`] never saturate.
    pub fn total_items(&self) -> u64 {
        self.quantities.iter().fold(0, |acc, &q| acc.saturating_add(q))
    }
}

/// A storage aisle: available quantity per item type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aisle {
    /// Unique aisle id.
    pub id: AisleId,
    /// Stocked quantity for each item type `0..K`.
    pub quantities: Vec<u64>,
}

impl Aisle {
    /// Creates an aisle.
    pub fn new(id: AisleId, quantities: Vec<u64>) -> Self {
        Self { id, quantities }
    }
}

/// A validated wave-picking instance.
///
/// Orders and aisles are stored sorted by id, which fixes the enumeration
/// order of every search over them. The item dimension `K` is taken from the
/// order with the smallest id; every other order and aisle must match it.
///
/// # Examples
///
/// ```
/// use u_wavepick::wave::{Aisle, Order, WaveInstance};
///
/// let instance = WaveInstance::new(
///     vec![Order::new(0, vec![3, 0, 1]), Order::new(1, vec![0, 1, 0])],
///     vec![Aisle::new(0, vec![3, 1, 1])],
/// )
/// .unwrap();
///
/// assert_eq!(instance.item_count(), 3);
/// assert_eq!(instance.order_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct WaveInstance {
    orders: Vec<Order>,
    aisles: Vec<Aisle>,
    item_count: usize,
    order_index: HashMap<OrderId, usize>,
    aisle_index: HashMap<AisleId, usize>,
}

impl WaveInstance {
    /// Builds an instance, validating ids and dimensions.
    ///
    /// The quantities of all orders together must fit in `u64`, so the
    /// demand and item total of any wave are exact. Aisle stock is not
    /// limited. An empty aisle table is allowed; such an instance simply has
    /// no feasible wave.
    pub fn new(mut orders: Vec<Order>, mut aisles: Vec<Aisle>) -> Result<Self, WaveError> {
        orders.sort_by_key(|o| o.id);
        aisles.sort_by_key(|a| a.id);

        let item_count = orders
            .first()
            .map(|o| o.quantities.len())
            .ok_or(WaveError::NoOrders)?;

        let mut order_index = HashMap::with_capacity(orders.len());
        let mut grand_total = 0u64;
        for (pos, order) in orders.iter().enumerate() {
            if order_index.insert(order.id, pos).is_some() {
                return Err(WaveError::DuplicateOrderId(order.id));
            }
            check_dimension(Entity::Order, order.id, item_count, order.quantities.len())?;
            grand_total = order
                .quantities
                .iter()
                .try_fold(grand_total, |acc, &q| acc.checked_add(q))
                .ok_or(WaveError::QuantityOverflow {
                    entity: Entity::Order,
                    id: order.id,
                })?;
        }

        let mut aisle_index = HashMap::with_capacity(aisles.len());
        for (pos, aisle) in aisles.iter().enumerate() {
            if aisle_index.insert(aisle.id, pos).is_some() {
                return Err(WaveError::DuplicateAisleId(aisle.id));
            }
            check_dimension(Entity::Aisle, aisle.id, item_count, aisle.quantities.len())?;
        }

        Ok(Self {
            orders,
            aisles,
            item_count,
            order_index,
            aisle_index,
        })
    }

    /// Builds an instance from `id -> quantities` tables.
    pub fn from_tables(
        orders: BTreeMap<OrderId, Vec<u64>>,
        aisles: BTreeMap<AisleId, Vec<u64>>,
    ) -> Result<Self, WaveError> {
        Self::new(
            orders.into_iter().map(|(id, q)| Order::new(id, q)).collect(),
            aisles.into_iter().map(|(id, q)| Aisle::new(id, q)).collect(),
        )
    }

    /// Item dimension `K`.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Number of orders.
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Number of aisles.
    pub fn aisle_count(&self) -> usize {
        self.aisles.len()
    }

    /// Orders, sorted by id.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Aisles, sorted by id.
    pub fn aisles(&self) -> &[Aisle] {
        &self.aisles
    }

    /// Looks up an order by id.
    pub fn order(&self, id: OrderId) -> Result<&Order, WaveError> {
        self.order_position(id).map(|pos| &self.orders[pos])
    }

    /// Looks up an aisle by id.
    pub fn aisle(&self, id: AisleId) -> Result<&Aisle, WaveError> {
        self.aisle_index
            .get(&id)
            .map(|&pos| &self.aisles[pos])
            .ok_or(WaveError::UnknownAisle(id))
    }

    /// Position of an order in [`orders`](Self::orders); this is also its
    /// CSP variable index.
    pub fn order_position(&self, id: OrderId) -> Result<usize, WaveError> {
        self.order_index
            .get(&id)
            .copied()
            .ok_or(WaveError::UnknownOrder(id))
    }
}

fn check_dimension(
    entity: Entity,
    id: usize,
    expected: usize,
    found: usize,
) -> Result<(), WaveError> {
    if expected != found {
        return Err(WaveError::DimensionMismatch {
            entity,
            id,
            expected,
            found,
        });
    }
    Ok(())
}
