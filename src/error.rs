//! Error taxonomy for wave planning.
//!
//! Every variant is a precondition or contract violation detected at the
//! input boundary. Finding no feasible wave is not an error; it is reported
//! through [`WaveOutcome`](crate::wave::WaveOutcome) and
//! [`SearchOutcome`](crate::wave::SearchOutcome).

use thiserror::Error;

use crate::csp::CspError;
use crate::wave::{AisleId, OrderId};

/// Which table a dimension mismatch was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Order,
    Aisle,
    Demand,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::Order => f.write_str("order"),
            Entity::Aisle => f.write_str("aisle"),
            Entity::Demand => f.write_str("demand vector"),
        }
    }
}

/// Errors raised while building or querying a wave-picking problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaveError {
    /// The order table is empty, so the item dimension is undefined.
    #[error("instance has no orders; item dimension is undefined")]
    NoOrders,

    /// A quantity vector does not have the instance's item dimension.
    #[error("{entity} {id} has {found} item quantities, expected {expected}")]
    DimensionMismatch {
        entity: Entity,
        id: usize,
        expected: usize,
        found: usize,
    },

    /// Two orders share an identifier.
    #[error("duplicate order id {0}")]
    DuplicateOrderId(OrderId),

    /// Two aisles share an identifier.
    #[error("duplicate aisle id {0}")]
    DuplicateAisleId(AisleId),

    /// Wave bounds must satisfy `0 < lower <= upper`.
    #[error("invalid wave bounds [{lower}, {upper}]: require 0 < lower <= upper")]
    InvalidBounds { lower: u64, upper: u64 },

    /// An order id that is not part of the instance.
    #[error("unknown order id {0}")]
    UnknownOrder(OrderId),

    /// An aisle id that is not part of the instance.
    #[error("unknown aisle id {0}")]
    UnknownAisle(AisleId),

    /// The same order appears more than once in a selection.
    #[error("order {0} selected more than once")]
    DuplicateOrder(OrderId),

    /// Summed item quantities do not fit in `u64`.
    #[error("{entity} {id}: summed item quantities overflow u64")]
    QuantityOverflow { entity: Entity, id: usize },

    /// A search or enumeration configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<CspError> for WaveError {
    fn from(err: CspError) -> Self {
        match err {
            CspError::InvalidConfig(msg) => WaveError::InvalidConfig(msg),
        }
    }
}
