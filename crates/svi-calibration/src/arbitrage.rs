//! Static no-arbitrage conditions on raw-SVI parameters.
//!
//! Five real-valued inequality functions, each ≥ 0 at an arbitrage-consistent
//! parameter vector: two conditions per wing bounding the tail slope of the
//! variance smile (butterfly-arbitrage avoidance), and a floor on the minimum
//! of $(k_i - \eta)^2 + c^2$ over the market sample guarding against a
//! degenerate smoothing parameter.
//!
//! All functions are pure and cheap: O(1) for the wing conditions, O(n) for
//! the floor.

use svi_core::Real;

use crate::raw::RawSviParams;

/// Number of inequality constraints.
pub const NUM_CONSTRAINTS: usize = 5;

/// Right-wing level condition.
///
/// `(4 − a + b·η·(ρ+1))·(a − b·η·(ρ+1)) − b²·(ρ+1)² ≥ 0` bounds the
/// right-tail slope of the variance smile relative to its level.
pub fn right_wing_level(p: &RawSviParams) -> Real {
    let s = p.b * p.eta * (p.rho + 1.0);
    (4.0 - p.a + s) * (p.a - s) - p.b * p.b * (p.rho + 1.0) * (p.rho + 1.0)
}

/// Right-wing slope condition.
///
/// `4 − b²·(ρ+1)² ≥ 0` caps the maximum right-tail slope independent of level.
pub fn right_wing_slope(p: &RawSviParams) -> Real {
    4.0 - p.b * p.b * (p.rho + 1.0) * (p.rho + 1.0)
}

/// Left-wing level condition: mirror of [`right_wing_level`] with (ρ−1).
pub fn left_wing_level(p: &RawSviParams) -> Real {
    let s = p.b * p.eta * (p.rho - 1.0);
    (4.0 - p.a + s) * (p.a - s) - p.b * p.b * (p.rho - 1.0) * (p.rho - 1.0)
}

/// Left-wing slope condition: mirror of [`right_wing_slope`] with (ρ−1).
pub fn left_wing_slope(p: &RawSviParams) -> Real {
    4.0 - p.b * p.b * (p.rho - 1.0) * (p.rho - 1.0)
}

/// Minimum-variance floor: `min_i (k_i − η)² + c²` over the sample.
///
/// The running minimum is seeded at +∞, so the result is the true minimum
/// over the sample and is always ≥ c² > 0 whenever c > 0.  The constraint is
/// a solver-visible guard against a degenerate, near-zero c.
pub fn min_variance_floor(p: &RawSviParams, ks: &[Real]) -> Real {
    ks.iter()
        .map(|&k| {
            let km = k - p.eta;
            km * km + p.c * p.c
        })
        .fold(f64::INFINITY, Real::min)
}

/// Zero-seeded variant of [`min_variance_floor`].
///
/// The running minimum starts at zero, so the result is clamped to ≤ 0
/// whenever every term over the sample is positive.  Kept only for
/// compatibility with consumers that expect the clamped value; the
/// calibration driver uses the corrected [`min_variance_floor`].
pub fn min_variance_floor_zero_seeded(p: &RawSviParams, ks: &[Real]) -> Real {
    ks.iter()
        .map(|&k| {
            let km = k - p.eta;
            km * km + p.c * p.c
        })
        .fold(0.0, Real::min)
}

/// The five inequality constraints bundled with the market log-moneyness
/// sample they close over.
///
/// Feasibility requires every evaluated entry ≥ 0.  The set holds no other
/// state; evaluation is recomputed at every solver query.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintSet<'a> {
    ks: &'a [Real],
}

impl<'a> ConstraintSet<'a> {
    /// Bundle the constraint functions with a log-moneyness sample.
    pub fn new(ks: &'a [Real]) -> Self {
        Self { ks }
    }

    /// Evaluate all five constraints at `p`, in the order: right-wing level,
    /// right-wing slope, left-wing level, left-wing slope, variance floor.
    pub fn evaluate(&self, p: &RawSviParams) -> [Real; NUM_CONSTRAINTS] {
        [
            right_wing_level(p),
            right_wing_slope(p),
            left_wing_level(p),
            left_wing_slope(p),
            min_variance_floor(p, self.ks),
        ]
    }

    /// Return `true` if every constraint value is ≥ −`tol`.
    pub fn is_feasible(&self, p: &RawSviParams, tol: Real) -> bool {
        self.evaluate(p).iter().all(|&g| g >= -tol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn params() -> RawSviParams {
        RawSviParams {
            a: 0.04,
            b: 0.2,
            rho: -0.3,
            eta: 0.1,
            c: 0.3,
        }
    }

    #[test]
    fn wing_conditions_hold_for_moderate_params() {
        let p = params();
        assert!(right_wing_level(&p) > 0.0);
        assert!(right_wing_slope(&p) > 0.0);
        assert!(left_wing_level(&p) > 0.0);
        assert!(left_wing_slope(&p) > 0.0);
    }

    #[test]
    fn steep_wing_violates_slope_condition() {
        // b·(ρ+1) > 2 breaks the right-wing slope cap
        let p = RawSviParams {
            b: 3.0,
            rho: 0.0,
            ..params()
        };
        assert!(right_wing_slope(&p) < 0.0);
    }

    #[test]
    fn floor_equals_minimum_over_sample() {
        let p = params();
        let ks = [-0.2, 0.05, 0.12, 0.4];
        let expected = ks
            .iter()
            .map(|&k| (k - p.eta).powi(2) + p.c * p.c)
            .fold(f64::INFINITY, Real::min);
        assert_abs_diff_eq!(min_variance_floor(&p, &ks), expected, epsilon = 1e-15);
        assert!(min_variance_floor(&p, &ks) >= p.c * p.c);
    }

    #[test]
    fn zero_seeded_floor_clamps_positive_minima() {
        // Every term is positive, so the zero-seeded fold reports 0.
        let p = params();
        let ks = [-0.2, 0.05, 0.12, 0.4];
        assert_abs_diff_eq!(
            min_variance_floor_zero_seeded(&p, &ks),
            0.0,
            epsilon = 1e-15
        );
        assert!(min_variance_floor(&p, &ks) > 0.0);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let p = params();
        let ks = [-0.15, 0.0, 0.25];
        let set = ConstraintSet::new(&ks);
        assert_eq!(set.evaluate(&p), set.evaluate(&p));
        assert!(set.is_feasible(&p, 0.0));
    }

    proptest! {
        #[test]
        fn wings_are_antisymmetric_in_rho(
            a in 1e-6_f64..0.5,
            b in 1e-3_f64..1.0,
            rho in -0.999_f64..0.999,
            eta in -1.0_f64..1.0,
            c in 1e-3_f64..2.0,
        ) {
            // Flipping ρ → −ρ and η → −η swaps the right and left conditions.
            let p = RawSviParams { a, b, rho, eta, c };
            let q = RawSviParams { rho: -rho, eta: -eta, ..p };
            prop_assert!((right_wing_level(&p) - left_wing_level(&q)).abs() < 1e-9);
            prop_assert!((right_wing_slope(&p) - left_wing_slope(&q)).abs() < 1e-9);
        }

        #[test]
        fn floor_never_below_c_squared(
            eta in -1.0_f64..1.0,
            c in 1e-3_f64..2.0,
            ks in proptest::collection::vec(-2.0_f64..2.0, 1..32),
        ) {
            let p = RawSviParams { a: 0.01, b: 0.1, rho: 0.0, eta, c };
            prop_assert!(min_variance_floor(&p, &ks) >= c * c - 1e-12);
        }
    }
}
