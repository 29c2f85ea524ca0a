//! Grid construction errors.

use thiserror::Error;

/// Errors arising from grid construction.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The source is empty, has an empty first row, or is ragged.
    #[error("invalid grid dimension: {reason}")]
    InvalidDimension {
        /// What was wrong with the requested shape.
        reason: String,
    },
}

impl GridError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidDimension {
            reason: reason.into(),
        }
    }
}
