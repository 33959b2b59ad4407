//! # svi-core
//!
//! Core types and error definitions for the SVI calibration workspace.
//!
//! This crate provides the primitive type aliases and the error hierarchy
//! shared by the calibration library and the command-line front end.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error types and the `ensure!` convenience macro.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the workspace.
pub type Real = f64;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// Log-moneyness ln(K / F), the independent variable of the smile.
pub type LogMoneyness = Real;

/// Total implied variance σ²·T at a given log-moneyness.
pub type TotalVariance = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
