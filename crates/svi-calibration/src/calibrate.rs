//! The calibration driver.
//!
//! Translates a [`MarketSample`] into a fully specified constrained
//! minimization problem — sample-derived bounds, the fixed heuristic initial
//! guess, the residual-norm objective, and the five no-arbitrage constraints
//! — then drives a [`Minimizer`] to a feasible fitted parameter vector.
//!
//! The pipeline is strictly linear: validate → build problem → solve →
//! post-check → report.  The driver holds no state across calls.

use svi_core::{Error, Real, Result};

use crate::arbitrage::{
    left_wing_level, left_wing_slope, min_variance_floor, right_wing_level, right_wing_slope,
    ConstraintSet, NUM_CONSTRAINTS,
};
use crate::minimizer::{Bounds, Minimizer, NelderMead, Problem, NUM_PARAMS};
use crate::objective::least_squares;
use crate::raw::RawSviParams;
use crate::sample::MarketSample;

/// Floor on the variance level parameter a.
const A_LOW: Real = 1e-6;
/// Bounds on the wing slope/scale parameter b.
const B_LOW: Real = 1e-3;
const B_HIGH: Real = 1.0;
/// |ρ| is kept strictly inside (−1, 1) by this tolerance-bounded limit.
const RHO_LIMIT: Real = 0.999_999;
/// Bounds on the smoothing parameter c; the floor keeps the curve away from
/// the non-smooth kink at c = 0.
const C_LOW: Real = 1e-3;
const C_HIGH: Real = 2.0;

/// Functional-value convergence tolerance handed to the solver.
const FTOL: Real = 1e-9;
/// Constraint values above −FEASIBILITY_TOL are accepted at the optimum.
const FEASIBILITY_TOL: Real = 1e-6;

/// Derive the five parameter bound intervals from sample statistics.
///
/// * a ∈ [1e-6, max v] — level cannot exceed the largest observed variance
/// * b ∈ [1e-3, 1]
/// * ρ ∈ [−0.999999, 0.999999]
/// * η ∈ [2·min k, 2·max k] — twice the observed log-moneyness range
/// * c ∈ [1e-3, 2]
///
/// Returns [`Error::DegenerateSample`] when a derived interval collapses:
/// all log-moneyness values identical (η), or the largest total variance not
/// above the level floor (a).
pub fn parameter_bounds(sample: &MarketSample) -> Result<Bounds> {
    let (k_min, k_max) = (sample.k_min(), sample.k_max());
    let v_max = sample.v_max();

    if k_min == k_max {
        return Err(Error::DegenerateSample {
            bound: "eta",
            detail: format!("all log-moneyness values equal {k_min}"),
        });
    }
    if v_max <= A_LOW {
        return Err(Error::DegenerateSample {
            bound: "a",
            detail: format!(
                "maximum total variance {v_max} is not above the level floor {A_LOW}"
            ),
        });
    }

    Ok(Bounds {
        lower: [A_LOW, B_LOW, -RHO_LIMIT, 2.0 * k_min, C_LOW],
        upper: [v_max, B_HIGH, RHO_LIMIT, 2.0 * k_max, C_HIGH],
    })
}

/// The fixed heuristic initial guess: (min v / 2, 0.1, −0.5, 0.1, 0.1),
/// projected onto the derived bounds.
///
/// Only the level term looks at the sample.  The seed itself is never
/// mutated; the solver iterates on copies.
pub fn initial_guess(sample: &MarketSample, bounds: &Bounds) -> RawSviParams {
    let seed = [sample.v_min() / 2.0, 0.1, -0.5, 0.1, 0.1];
    RawSviParams::from_array(bounds.clamp(&seed))
}

/// The result of one calibration run.
#[derive(Debug, Clone)]
pub struct Calibration {
    /// The fitted parameter vector.
    pub params: RawSviParams,
    /// Residual norm of the fit at `params`.
    pub objective: Real,
    /// The five constraint values at `params` (all ≥ −1e-6).
    pub constraint_values: [Real; NUM_CONSTRAINTS],
    /// Solver iterations used.
    pub iterations: usize,
}

/// Calibrate the raw-SVI curve to a market sample using the given minimizer.
///
/// Errors:
/// * [`Error::DegenerateSample`] if a bound interval collapses
/// * [`Error::Numeric`] if the solver returns a non-finite iterate
/// * [`Error::CalibrationFailed`] on non-convergence, or when the reported
///   optimum violates a no-arbitrage constraint; the last iterate is carried
///   in the error, never silently substituted
pub fn calibrate(sample: &MarketSample, minimizer: &dyn Minimizer) -> Result<Calibration> {
    let bounds = parameter_bounds(sample)?;
    let seed = initial_guess(sample, &bounds);
    let constraint_set = ConstraintSet::new(sample.log_moneyness());

    let objective =
        |x: &[Real; NUM_PARAMS]| least_squares(&RawSviParams::from_array(*x), sample);
    let g1 = |x: &[Real; NUM_PARAMS]| right_wing_level(&RawSviParams::from_array(*x));
    let g2 = |x: &[Real; NUM_PARAMS]| right_wing_slope(&RawSviParams::from_array(*x));
    let g3 = |x: &[Real; NUM_PARAMS]| left_wing_level(&RawSviParams::from_array(*x));
    let g4 = |x: &[Real; NUM_PARAMS]| left_wing_slope(&RawSviParams::from_array(*x));
    let g5 = |x: &[Real; NUM_PARAMS]| {
        min_variance_floor(&RawSviParams::from_array(*x), sample.log_moneyness())
    };
    let constraints: [&dyn Fn(&[Real; NUM_PARAMS]) -> Real; NUM_CONSTRAINTS] =
        [&g1, &g2, &g3, &g4, &g5];

    let problem = Problem {
        objective: &objective,
        constraints: &constraints,
        bounds,
        initial: seed.to_array(),
        ftol: FTOL,
    };
    let solution = minimizer.minimize(&problem)?;

    let params = RawSviParams::from_array(solution.x);
    if !params.is_finite() {
        return Err(Error::Numeric(format!(
            "solver returned a non-finite iterate: {:?}",
            solution.x
        )));
    }
    if !solution.converged() {
        return Err(Error::CalibrationFailed {
            message: format!(
                "solver stopped after {} iterations without meeting the function tolerance",
                solution.iterations
            ),
            last_iterate: solution.x.to_vec(),
        });
    }

    let constraint_values = constraint_set.evaluate(&params);
    if constraint_values.iter().any(|&g| g < -FEASIBILITY_TOL) {
        return Err(Error::CalibrationFailed {
            message: format!(
                "optimum violates no-arbitrage constraints: {constraint_values:?}"
            ),
            last_iterate: solution.x.to_vec(),
        });
    }

    Ok(Calibration {
        params,
        objective: least_squares(&params, sample),
        constraint_values,
        iterations: solution.iterations,
    })
}

/// Calibrate with the bundled penalized Nelder–Mead minimizer.
pub fn calibrate_default(sample: &MarketSample) -> Result<Calibration> {
    calibrate(sample, &NelderMead::default())
}
