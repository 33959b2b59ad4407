//! The calibration objective.
//!
//! The squared-residual norm between model-implied and market total variance.
//! Residuals carry uniform weight; per-point weights (e.g. inverse-vega) are a
//! possible extension but not part of the current contract.

use nalgebra::DVector;
use svi_core::Real;

use crate::raw::{total_variance, RawSviParams};
use crate::sample::MarketSample;

/// Euclidean norm of the residual vector (model − market total variance).
///
/// Smooth in the parameters wherever c > 0, which a solver may exploit via
/// numerical gradients.
pub fn least_squares(p: &RawSviParams, sample: &MarketSample) -> Real {
    let residuals: Vec<Real> = sample
        .log_moneyness()
        .iter()
        .zip(sample.total_variance())
        .map(|(&k, &v)| total_variance(p, k) - v)
        .collect();
    DVector::from_vec(residuals).norm()
}
