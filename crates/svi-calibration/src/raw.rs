//! The raw-SVI total-variance curve model.
//!
//! The raw SVI (Stochastic Volatility Inspired) parameterization of total
//! variance is
//!
//! $w(k) = a + b \bigl(\rho \cdot (k - \eta) + \sqrt{(k - \eta)^2 + c^2}\bigr)$
//!
//! where $k = \ln(K / F)$ is log-moneyness.
//!
//! Reference: Gatheral (2004).

use svi_core::Real;

/// Raw-SVI parameters θ = (a, b, ρ, η, c).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSviParams {
    /// Overall variance level offset.
    pub a: Real,
    /// Slope/scale of the wings (∈ (0, 1]).
    pub b: Real,
    /// Skew correlation (|ρ| < 1).
    pub rho: Real,
    /// Shift of the smile's center.
    pub eta: Real,
    /// Curvature/smoothing floor (∈ (0, 2]).
    pub c: Real,
}

impl RawSviParams {
    /// Build parameters from a solver vector in (a, b, ρ, η, c) order.
    pub fn from_array(x: [Real; 5]) -> Self {
        Self {
            a: x[0],
            b: x[1],
            rho: x[2],
            eta: x[3],
            c: x[4],
        }
    }

    /// The solver vector in (a, b, ρ, η, c) order.
    pub fn to_array(self) -> [Real; 5] {
        [self.a, self.b, self.rho, self.eta, self.c]
    }

    /// Return `true` if every parameter is finite.
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|x| x.is_finite())
    }
}

/// Compute raw-SVI total variance at log-moneyness `k`.
///
/// The square-root argument is non-negative by construction, so the result
/// is real and finite for every real `k` whenever the parameters are finite.
/// No clamping is performed here; keeping `c` away from zero is the bounds'
/// responsibility.
pub fn total_variance(p: &RawSviParams, k: Real) -> Real {
    let km = k - p.eta;
    p.a + p.b * (p.rho * km + (km * km + p.c * p.c).sqrt())
}

/// Evaluate the curve element-wise over a vector of log-moneyness points.
pub fn total_variance_curve(p: &RawSviParams, ks: &[Real]) -> Vec<Real> {
    ks.iter().map(|&k| total_variance(p, k)).collect()
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
    fn value_at_center() {
        // At k = η: w(η) = a + b·c
        let p = params();
        let w = total_variance(&p, p.eta);
        assert_abs_diff_eq!(w, p.a + p.b * p.c, epsilon = 1e-15);
    }

    #[test]
    fn wings_are_asymptotically_linear() {
        // Far from the center, w(k) ≈ a + b(ρ ± 1)(k − η)
        let p = params();
        let k = 50.0;
        let right = total_variance(&p, k);
        let approx_right = p.a + p.b * (p.rho + 1.0) * (k - p.eta);
        assert!((right - approx_right).abs() < 1e-3, "right wing: {right}");

        let left = total_variance(&p, -k);
        let approx_left = p.a + p.b * (p.rho - 1.0) * (-k - p.eta);
        assert!((left - approx_left).abs() < 1e-3, "left wing: {left}");
    }

    #[test]
    fn array_round_trip() {
        let p = params();
        assert_eq!(RawSviParams::from_array(p.to_array()), p);
    }

    #[test]
    fn curve_matches_pointwise_evaluation() {
        let p = params();
        let ks = [-0.5, -0.1, 0.0, 0.1, 0.5];
        let curve = total_variance_curve(&p, &ks);
        assert_eq!(curve.len(), ks.len());
        for (i, &k) in ks.iter().enumerate() {
            assert_abs_diff_eq!(curve[i], total_variance(&p, k), epsilon = 1e-15);
        }
    }

    proptest! {
        #[test]
        fn finite_for_every_real_k(
            k in -20.0_f64..20.0,
            a in 1e-6_f64..0.5,
            b in 1e-3_f64..1.0,
            rho in -0.999_f64..0.999,
            eta in -1.0_f64..1.0,
            c in 1e-3_f64..2.0,
        ) {
            let p = RawSviParams { a, b, rho, eta, c };
            let w = total_variance(&p, k);
            prop_assert!(w.is_finite());
        }

        #[test]
        fn bounded_below_by_minimum_variance(
            k in -5.0_f64..5.0,
            a in 1e-6_f64..0.5,
            b in 1e-3_f64..1.0,
            rho in -0.999_f64..0.999,
            eta in -1.0_f64..1.0,
            c in 1e-3_f64..2.0,
        ) {
            // w(k) ≥ a + b·c·√(1 − ρ²) for all k
            let p = RawSviParams { a, b, rho, eta, c };
            let floor = a + b * c * (1.0 - rho * rho).sqrt();
            prop_assert!(total_variance(&p, k) >= floor - 1e-12);
        }
    }
}
