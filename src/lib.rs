//! Exact wave-picking optimization for warehouse order fulfillment.
//!
//! Given customer orders and storage aisles, each described by a quantity per
//! item type, this crate selects a wave of orders whose total item count lies
//! within configured bounds and the aisle subset that covers the wave's demand
//! most efficiently (items per aisle visited).
//!
//! - **CSP (Constraint Satisfaction)**: Domain-agnostic problem contract with
//!   conflict counting and goal testing, plus a backtracking engine with
//!   pluggable variable/value ordering.
//! - **Wave**: Demand aggregation, exact aisle coverage, feasibility
//!   evaluation, the CSP adapter, and exhaustive ranked enumeration.
//!
//! # Example
//!
//! ```
//! use u_wavepick::wave::{Aisle, EnumerationConfig, Order, WaveBounds, WaveInstance, WavePlanner};
//!
//! let instance = WaveInstance::new(
//!     vec![
//!         Order::new(0, vec![2, 0, 1]),
//!         Order::new(1, vec![1, 1, 0]),
//!         Order::new(2, vec![0, 2, 1]),
//!         Order::new(3, vec![1, 0, 2]),
//!     ],
//!     vec![
//!         Aisle::new(0, vec![2, 1, 1]),
//!         Aisle::new(1, vec![1, 2, 1]),
//!         Aisle::new(2, vec![1, 1, 2]),
//!     ],
//! )?;
//!
//! let planner = WavePlanner::new(&instance, WaveBounds::new(3, 6)?)?;
//! let outcome = planner.enumerate(&EnumerationConfig::default())?;
//!
//! match outcome.best() {
//!     Some(best) => println!("best wave: {best}"),
//!     None => println!("no feasible wave"),
//! }
//! # Ok::<(), u_wavepick::WaveError>(())
//! ```
//!
//! # Logging
//!
//! Progress is reported through the [`log`] facade; install any logger to
//! see it.

pub mod csp;
pub mod error;
pub mod wave;

pub use error::WaveError;
