//! Warehouse wave picking.
//!
//! Selects a *wave* (a subset of customer orders) whose total item count lies
//! in `[LB, UB]`, together with the aisle subset that stocks every item the
//! wave needs using as few aisles as possible. Waves are compared by
//! efficiency: total items divided by the number of aisles visited.
//!
//! # Key Components
//!
//! - **Instance**: [`WaveInstance`], [`Order`], [`Aisle`], [`WaveBounds`]
//! - **Aggregation**: [`aggregate`] — per-item demand of a set of orders
//! - **Coverage**: [`best_covering_aisles`] — exact aisle subset search
//! - **Evaluation**: [`WaveEvaluator`] — conflict counting and goal test
//! - **CSP adapter**: [`WaveModel`] — wave selection as a
//!   [`ConstraintProblem`](crate::csp::ConstraintProblem)
//! - **Enumeration**: [`WaveEnumerator`] — every feasible wave, ranked
//! - **Planner**: [`WavePlanner`] — validated entry point
//!
//! # Design
//!
//! Every search here is exact and exponential: `2^orders` selections and
//! `2^aisles - 1` aisle subsets. Instances are expected to be small. Both the
//! backtracking search and the enumerator accept a budget and a cancellation
//! token for larger inputs.

mod config;
mod coverage;
mod demand;
mod enumerator;
mod evaluator;
mod instance;
mod model;
mod planner;

pub use config::{EnumerationConfig, EnumerationStrategy, WaveBounds};
pub use coverage::{best_covering_aisles, covers, AisleCover};
pub use demand::{aggregate, total_items, DemandVector};
pub use enumerator::{RankedWave, WaveEnumerator, WaveOutcome, WaveRanking};
pub use evaluator::{WaveEvaluator, WaveSolution};
pub use instance::{Aisle, AisleId, Order, OrderId, WaveInstance};
pub use model::WaveModel;
pub use planner::{SearchOutcome, WavePlanner};
