//! # svi-calibration
//!
//! Calibration of the raw-SVI (Stochastic Volatility Inspired) total-variance
//! curve to market-observed (log-moneyness, total variance) points, subject to
//! static no-arbitrage constraints on the fitted curve's shape.
//!
//! The pipeline is a single linear pass: validate the market sample, derive
//! parameter bounds and an initial guess from sample statistics, hand the
//! objective and the five inequality constraints to a bounded constrained
//! minimizer, and post-check the converged parameter vector for feasibility.
//!
//! This crate provides:
//! * [`MarketSample`] — the validated (k, v) market quote set
//! * [`RawSviParams`] and [`total_variance`] — the five-parameter curve model
//! * [`arbitrage`] — the butterfly-arbitrage and variance-floor conditions
//! * [`Minimizer`] — the solver capability the driver is written against
//! * [`calibrate`] — the calibration driver

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Static no-arbitrage conditions on raw-SVI parameters.
pub mod arbitrage;

/// The calibration driver: bounds, initial guess, and the solve pipeline.
pub mod calibrate;

/// The minimizer capability and the bundled penalized Nelder–Mead search.
pub mod minimizer;

/// The weighted-residual calibration objective.
pub mod objective;

/// The raw-SVI total-variance curve model.
pub mod raw;

/// The validated market quote sample.
pub mod sample;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use arbitrage::ConstraintSet;
pub use calibrate::{calibrate, calibrate_default, Calibration};
pub use minimizer::{Bounds, Minimizer, NelderMead, Problem, Solution};
pub use objective::least_squares;
pub use raw::{total_variance, total_variance_curve, RawSviParams};
pub use sample::MarketSample;
