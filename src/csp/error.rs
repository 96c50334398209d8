//! Errors of the constraint search layer.

use thiserror::Error;

/// Errors raised before a search starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CspError {
    /// The search configuration is unusable.
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),
}
