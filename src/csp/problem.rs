//! Core trait for constraint satisfaction problems.

use super::assignment::Assignment;

/// Defines a finite-domain constraint satisfaction problem.
///
/// Users implement this trait to specify:
/// - The variables (indexed `0..variable_count()`) and their domains
/// - Which variables constrain each other (`neighbors`)
/// - How many conflicts a trial `var = value` extension causes
/// - Whether a complete assignment is a solution
///
/// The search engine only ever calls `conflicts` with `var` unassigned in
/// `assignment`. Implementations evaluate the hypothetical extension without
/// mutating `assignment` (see [`Assignment::with`]).
///
/// # Examples
///
/// ```
/// use u_wavepick::csp::{Assignment, ConstraintProblem};
///
/// /// Two booleans that must differ.
/// struct Xor;
///
/// impl ConstraintProblem for Xor {
///     type Value = bool;
///     fn variable_count(&self) -> usize { 2 }
///     fn domain(&self, _var: usize) -> &[bool] { &[false, true] }
///     fn neighbors(&self, var: usize) -> &[usize] {
///         if var == 0 { &[1] } else { &[0] }
///     }
///     fn conflicts(&self, var: usize, value: &bool, a: &Assignment<bool>) -> usize {
///         self.neighbors(var).iter().filter(|&&n| a.get(n) == Some(value)).count()
///     }
///     fn goal_test(&self, a: &Assignment<bool>) -> bool {
///         a.is_complete() && a.get(0) != a.get(1)
///     }
/// }
/// ```
pub trait ConstraintProblem {
    /// The value type of every variable.
    type Value: Clone + std::fmt::Debug;

    /// Number of variables.
    fn variable_count(&self) -> usize;

    /// Candidate values for `var`, in the problem's natural order.
    fn domain(&self, var: usize) -> &[Self::Value];

    /// Variables that share a binary constraint with `var`.
    ///
    /// Defaults to none, which is the right answer for problems whose only
    /// constraints are global.
    fn neighbors(&self, _var: usize) -> &[usize] {
        &[]
    }

    /// Number of constraints violated by extending `assignment` with
    /// `var = value`. Zero means the extension is consistent so far.
    fn conflicts(&self, var: usize, value: &Self::Value, assignment: &Assignment<Self::Value>)
        -> usize;

    /// Whether `assignment` is a solution.
    fn goal_test(&self, assignment: &Assignment<Self::Value>) -> bool;

    /// Human-readable variable name, used in log output.
    fn variable_name(&self, var: usize) -> String {
        format!("x{var}")
    }
}
