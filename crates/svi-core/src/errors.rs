//! Error types for the SVI calibration workspace.
//!
//! A single `thiserror`-derived enum covers the whole pipeline: input
//! validation, bound derivation, the solver call, and numeric sanity
//! checks.  Every variant carries enough context to tell bad input apart
//! from non-convergence; nothing is retried or silently defaulted.

use thiserror::Error;

use crate::Real;

/// The top-level error type used throughout the workspace.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Market sample sequences are empty or of unequal length.
    ///
    /// Detected before any bound or solver construction.
    #[error("input shape error: {0}")]
    InputShape(String),

    /// Sample statistics collapse a parameter bound interval.
    #[error("degenerate sample: {bound} bounds collapsed ({detail})")]
    DegenerateSample {
        /// Name of the parameter whose bound interval collapsed.
        bound: &'static str,
        /// Human-readable description of the collapse.
        detail: String,
    },

    /// The solver exhausted its budget or stopped at an infeasible point.
    #[error("calibration failed: {message}")]
    CalibrationFailed {
        /// The solver's diagnostic message.
        message: String,
        /// The last iterate seen, in (a, b, ρ, η, c) order.
        last_iterate: Vec<Real>,
    },

    /// An evaluation produced a NaN or infinite value.
    #[error("numeric error: {0}")]
    Numeric(String),
}

/// Shorthand `Result` type used throughout the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return early with the given error if a condition does not hold.
///
/// # Example
/// ```
/// use svi_core::{ensure, errors::{Error, Result}};
/// fn non_empty(xs: &[f64]) -> Result<()> {
///     ensure!(!xs.is_empty(), Error::InputShape("sequence is empty".into()));
///     Ok(())
/// }
/// assert!(non_empty(&[1.0]).is_ok());
/// assert!(non_empty(&[]).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}
