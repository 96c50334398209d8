//! Wave bounds and enumeration configuration.

use crate::error::WaveError;

/// Inclusive bounds `[lower, upper]` on a wave's total item count.
///
/// # Examples
///
/// ```
/// use u_wavepick::wave::WaveBounds;
///
/// let bounds = WaveBounds::new(5, 5).unwrap();
/// assert!(bounds.contains(5));
/// assert!(!bounds.contains(6));
/// assert!(WaveBounds::new(0, 3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveBounds {
    lower: u64,
    upper: u64,
}

impl WaveBounds {
    /// Creates bounds, requiring `0 < lower <= upper`.
    pub fn new(lower: u64, upper: u64) -> Result<Self, WaveError> {
        let bounds = Self { lower, upper };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Lower bound (LB).
    pub fn lower(&self) -> u64 {
        self.lower
    }

    /// Upper bound (UB).
    pub fn upper(&self) -> u64 {
        self.upper
    }

    /// Whether `total` lies within the bounds.
    pub fn contains(&self, total: u64) -> bool {
        self.lower <= total && total <= self.upper
    }

    /// Validates the bounds. Needed for values that bypassed [`WaveBounds::new`]
    /// (e.g. deserialized ones).
    pub fn validate(&self) -> Result<(), WaveError> {
        if self.lower == 0 || self.lower > self.upper {
            return Err(WaveError::InvalidBounds {
                lower: self.lower,
                upper: self.upper,
            });
        }
        Ok(())
    }
}

/// How the enumerator walks the space of order selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumerationStrategy {
    /// Every `{skip, pick}` combination over all orders (2^n assignments).
    #[default]
    CartesianProduct,

    /// Order subsets by increasing size, pre-filtered on the item bounds
    /// before aisle coverage is computed.
    BoundedSubsets,
}

/// Configuration parameters for [`WaveEnumerator`](super::WaveEnumerator).
///
/// # Examples
///
/// ```
/// use u_wavepick::wave::{EnumerationConfig, EnumerationStrategy};
///
/// let config = EnumerationConfig::default()
///     .with_strategy(EnumerationStrategy::BoundedSubsets)
///     .with_max_candidates(1 << 12);
/// assert_eq!(config.max_candidates, Some(4096));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnumerationConfig {
    /// Enumeration strategy.
    pub strategy: EnumerationStrategy,
    /// Maximum number of candidate selections examined (None for all).
    pub max_candidates: Option<usize>,
}

impl EnumerationConfig {
    /// Sets the enumeration strategy.
    pub fn with_strategy(mut self, strategy: EnumerationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the candidate budget.
    pub fn with_max_candidates(mut self, n: usize) -> Self {
        self.max_candidates = Some(n);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), WaveError> {
        if self.max_candidates == Some(0) {
            return Err(WaveError::InvalidConfig(
                "max_candidates must be positive when set".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_inclusive() {
        let bounds = WaveBounds::new(3, 6).unwrap();
        assert!(!bounds.contains(2));
        assert!(bounds.contains(3));
        assert!(bounds.contains(6));
        assert!(!bounds.contains(7));
    }

    #[test]
    fn test_bounds_rejects_zero_lower() {
        assert_eq!(
            WaveBounds::new(0, 10),
            Err(WaveError::InvalidBounds { lower: 0, upper: 10 })
        );
    }

    #[test]
    fn test_bounds_rejects_inverted() {
        assert!(WaveBounds::new(8, 4).is_err());
    }

    #[test]
    fn test_enumeration_config_defaults() {
        let config = EnumerationConfig::default();
        assert_eq!(config.strategy, EnumerationStrategy::CartesianProduct);
        assert!(config.max_candidates.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_enumeration_config_zero_budget() {
        let config = EnumerationConfig::default().with_max_candidates(0);
        assert!(config.validate().is_err());
    }
}
