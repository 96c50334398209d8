//! Constraint Satisfaction (CSP) layer.
//!
//! Provides a domain-agnostic contract for finite-domain constraint
//! satisfaction problems and a backtracking search engine that drives it.
//!
//! # Key Components
//!
//! - **Assignment**: [`Assignment`] — immutable partial assignment with
//!   copy-on-write extension
//! - **Problem**: [`ConstraintProblem`] — variables, domains, neighbors,
//!   conflict counting and goal test
//! - **Search**: [`BacktrackingSearch`] — depth-first search with pluggable
//!   variable/value ordering
//!
//! # Design
//!
//! Constraints are not declared as data. A problem answers two questions:
//! how many conflicts a hypothetical `var = value` extension causes, and
//! whether a complete assignment is a goal. This lets global constraints
//! (ones that depend on the whole assignment rather than on pairs of
//! variables) be expressed with an empty neighbor relation.
//!
//! Ordering heuristics only change how fast a solution is reached, never
//! which assignments are reachable.
//!
//! # References
//!
//! Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach",
//! ch. 6 (Constraint Satisfaction Problems)

mod assignment;
mod config;
mod error;
mod problem;
mod solver;

pub use assignment::Assignment;
pub use config::{SearchConfig, ValueOrder, VariableOrder};
pub use error::CspError;
pub use problem::ConstraintProblem;
pub use solver::{BacktrackingSearch, SearchResult, SearchStatus};
