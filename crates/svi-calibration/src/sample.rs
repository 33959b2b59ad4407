//! `MarketSample` — the validated set of market quotes for one expiry slice.
//!
//! A sample is an ordered sequence of (log-moneyness, total implied variance)
//! pairs.  It is validated on construction and immutable afterwards; the
//! calibration driver owns it for the duration of one run.

use svi_core::{ensure, Error, Real, Result, Size};

/// Market-observed (log-moneyness, total variance) points for one expiry.
///
/// Invariants, enforced at construction: at least one point, and the two
/// sequences have equal length.  Total variances are expected to be ≥ 0 for
/// sane input but are not mechanically enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSample {
    k: Vec<Real>,
    v: Vec<Real>,
}

impl MarketSample {
    /// Create a sample from log-moneyness and total-variance sequences.
    ///
    /// Returns [`Error::InputShape`] when either sequence is empty or the
    /// lengths differ.
    pub fn new(k: Vec<Real>, v: Vec<Real>) -> Result<Self> {
        ensure!(
            !k.is_empty() && !v.is_empty(),
            Error::InputShape("market sample must contain at least one point".into())
        );
        ensure!(
            k.len() == v.len(),
            Error::InputShape(format!(
                "log-moneyness and total-variance lengths differ: {} vs {}",
                k.len(),
                v.len()
            ))
        );
        Ok(Self { k, v })
    }

    /// Number of quote points.
    pub fn len(&self) -> Size {
        self.k.len()
    }

    /// Always `false`: an empty sample cannot be constructed.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The log-moneyness sequence.
    pub fn log_moneyness(&self) -> &[Real] {
        &self.k
    }

    /// The total implied variance sequence.
    pub fn total_variance(&self) -> &[Real] {
        &self.v
    }

    /// Smallest observed log-moneyness.
    pub fn k_min(&self) -> Real {
        self.k.iter().copied().fold(f64::INFINITY, Real::min)
    }

    /// Largest observed log-moneyness.
    pub fn k_max(&self) -> Real {
        self.k.iter().copied().fold(f64::NEG_INFINITY, Real::max)
    }

    /// Smallest observed total variance.
    pub fn v_min(&self) -> Real {
        self.v.iter().copied().fold(f64::INFINITY, Real::min)
    }

    /// Largest observed total variance.
    pub fn v_max(&self) -> Real {
        self.v.iter().copied().fold(f64::NEG_INFINITY, Real::max)
    }
}
