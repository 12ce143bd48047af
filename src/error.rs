//! Error types and result utilities for plotting helpers.

use thiserror::Error;

/// Convenience type alias for results that may contain a [`PlotError`].
pub type PlotResult<T> = Result<T, PlotError>;

/// Error types that can occur while preparing or rendering plots.
#[derive(Error, Debug)]
pub enum PlotError {
    /// An operation received a sequence with no elements.
    ///
    /// Span extraction, binning and fitting are all undefined over an empty domain.
    #[error("Empty input error: {operation} requires at least one element")]
    EmptyInput {
        /// The operation that rejected the input.
        operation: &'static str,
    },

    /// Two sequences that must be paired element-wise have different lengths.
    ///
    /// This happens when an index does not match its signal, or `x` does not match `y`.
    #[error("Length mismatch in {operation}: expected {expected} elements, got {actual}")]
    LengthMismatch {
        /// The operation that rejected the input.
        operation: &'static str,
        /// Length of the reference sequence.
        expected: usize,
        /// Length of the offending sequence.
        actual: usize,
    },

    /// An invalid parameter was provided to an operation.
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// Name of the parameter.
        parameter: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A numeric range is degenerate or inverted (e.g. `min >= max`).
    #[error("Invalid range error: {0}")]
    InvalidRange(String),

    /// A requested table column does not exist.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// The plot could not be assembled for rendering.
    #[error("Plot rendering error: {reason}")]
    Render {
        /// Description of the failure.
        reason: String,
    },

    /// Writing rendered output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlotError {
    /// Create an [`PlotError::InvalidParameter`] error.
    pub fn invalid_value(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create an [`PlotError::EmptyInput`] error.
    pub const fn empty(operation: &'static str) -> Self {
        Self::EmptyInput { operation }
    }

    /// Create a [`PlotError::LengthMismatch`] error.
    pub const fn length_mismatch(operation: &'static str, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            operation,
            expected,
            actual,
        }
    }
}

/// Check that two paired sequences have the same, non-zero length.
pub(crate) fn ensure_paired(
    operation: &'static str,
    expected: usize,
    actual: usize,
) -> PlotResult<()> {
    if expected == 0 {
        return Err(PlotError::empty(operation));
    }
    if expected != actual {
        return Err(PlotError::length_mismatch(operation, expected, actual));
    }
    Ok(())
}
