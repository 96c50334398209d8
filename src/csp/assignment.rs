//! Partial assignments.

/// A (possibly partial) assignment of values to CSP variables.
///
/// Variables are identified by their index in `0..len()`. Extending an
/// assignment never mutates it: [`Assignment::with`] returns a new value,
/// so trial extensions in sibling search branches cannot observe each other.
///
/// # Examples
///
/// ```
/// use u_wavepick::csp::Assignment;
///
/// let empty: Assignment<bool> = Assignment::new(3);
/// let one = empty.with(1, true);
///
/// assert_eq!(empty.assigned_count(), 0);
/// assert_eq!(one.get(1), Some(&true));
/// assert!(!one.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment<V> {
    values: Vec<Option<V>>,
}

impl<V: Clone> Assignment<V> {
    /// Creates an assignment over `len` variables with nothing assigned.
    pub fn new(len: usize) -> Self {
        Self {
            values: vec![None; len],
        }
    }

    /// Creates a complete assignment from one value per variable.
    pub fn complete<I: IntoIterator<Item = V>>(values: I) -> Self {
        Self {
            values: values.into_iter().map(Some).collect(),
        }
    }

    /// Returns a copy of this assignment with `var` set to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `var >= self.len()`.
    pub fn with(&self, var: usize, value: V) -> Self {
        let mut values = self.values.clone();
        values[var] = Some(value);
        Self { values }
    }

    /// Returns a copy of this assignment with `var` unassigned.
    ///
    /// # Panics
    ///
    /// Panics if `var >= self.len()`.
    pub fn without(&self, var: usize) -> Self {
        let mut values = self.values.clone();
        values[var] = None;
        Self { values }
    }
}

impl<V> Assignment<V> {
    /// Number of variables (assigned or not).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the assignment ranges over zero variables.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of `var`, if assigned. Out-of-range variables read as unassigned.
    pub fn get(&self, var: usize) -> Option<&V> {
        self.values.get(var).and_then(Option::as_ref)
    }

    /// Whether `var` has a value.
    pub fn is_assigned(&self, var: usize) -> bool {
        self.get(var).is_some()
    }

    /// Number of assigned variables.
    pub fn assigned_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Whether every variable has a value.
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Index of the first unassigned variable.
    pub fn first_unassigned(&self) -> Option<usize> {
        self.values.iter().position(Option::is_none)
    }

    /// Iterates `(var, value)` pairs in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<&V>)> {
        self.values.iter().enumerate().map(|(i, v)| (i, v.as_ref()))
    }

    /// Raw slot view.
    pub fn as_slice(&self) -> &[Option<V>] {
        &self.values
    }
}
