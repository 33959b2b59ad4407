//! The minimizer capability the calibration driver is written against.
//!
//! The driver supplies a fully specified problem — objective, inequality
//! constraints (feasible when ≥ 0), per-parameter interval bounds, initial
//! point, and a functional stopping tolerance — and treats the algorithm
//! behind [`Minimizer`] as opaque.  The bundled [`NelderMead`] implementation
//! is a derivative-free simplex search over a merit function in which bound
//! and constraint violations enter as quadratic penalties.

use svi_core::{Real, Result};

/// Dimension of the parameter space: (a, b, ρ, η, c).
pub const NUM_PARAMS: usize = 5;

/// Independent closed interval bounds, one per parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lower bounds in (a, b, ρ, η, c) order.
    pub lower: [Real; NUM_PARAMS],
    /// Upper bounds in (a, b, ρ, η, c) order.
    pub upper: [Real; NUM_PARAMS],
}

impl Bounds {
    /// Return `true` if `x` lies within every interval.
    pub fn contains(&self, x: &[Real; NUM_PARAMS]) -> bool {
        (0..NUM_PARAMS).all(|i| x[i] >= self.lower[i] && x[i] <= self.upper[i])
    }

    /// Project `x` onto the bound intervals component-wise.
    pub fn clamp(&self, x: &[Real; NUM_PARAMS]) -> [Real; NUM_PARAMS] {
        let mut out = *x;
        for i in 0..NUM_PARAMS {
            out[i] = out[i].clamp(self.lower[i], self.upper[i]);
        }
        out
    }
}

/// A bounded, inequality-constrained minimization problem over ℝ⁵.
pub struct Problem<'a> {
    /// The objective function to minimize.
    pub objective: &'a dyn Fn(&[Real; NUM_PARAMS]) -> Real,
    /// Inequality constraint functions; a point is feasible when every one
    /// evaluates ≥ 0.
    pub constraints: &'a [&'a dyn Fn(&[Real; NUM_PARAMS]) -> Real],
    /// Per-parameter interval bounds.
    pub bounds: Bounds,
    /// The starting point.  Solvers iterate on copies; the seed is never
    /// mutated.
    pub initial: [Real; NUM_PARAMS],
    /// Functional-value stopping tolerance.
    pub ftol: Real,
}

/// Why a minimization stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The functional-value tolerance was met.
    FunctionTolerance,
    /// The iteration budget was exhausted before convergence.
    MaxIterations,
}

/// The outcome of a minimization.
#[derive(Debug, Clone)]
pub struct Solution {
    /// The best parameter vector found, in (a, b, ρ, η, c) order.
    pub x: [Real; NUM_PARAMS],
    /// The merit value at `x` (objective plus any penalty terms).
    pub value: Real,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Why the search stopped.
    pub reason: TerminationReason,
}

impl Solution {
    /// Return `true` if the search met its stopping tolerance.
    pub fn converged(&self) -> bool {
        self.reason == TerminationReason::FunctionTolerance
    }
}

/// A generic bounded, inequality-constrained nonlinear minimizer.
pub trait Minimizer {
    /// Minimize the problem's objective subject to its bounds and
    /// constraints, starting from the problem's initial point.
    fn minimize(&self, problem: &Problem<'_>) -> Result<Solution>;
}

// ── Penalized Nelder–Mead ─────────────────────────────────────────────────────

/// Derivative-free Nelder–Mead simplex search with quadratic penalties for
/// bound and constraint violations.
///
/// Non-finite objective or constraint evaluations are treated as infeasible
/// rather than propagated into the convergence test.  The search is fully
/// deterministic: repeated runs from the same seed return identical output.
#[derive(Debug, Clone)]
pub struct NelderMead {
    /// Iteration budget.
    pub max_iterations: usize,
    /// Weight applied to squared bound/constraint violations in the merit
    /// function.
    pub penalty_weight: Real,
}

impl Default for NelderMead {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            penalty_weight: 1e6,
        }
    }
}

impl NelderMead {
    fn merit(&self, problem: &Problem<'_>, x: &[Real; NUM_PARAMS]) -> Real {
        let mut penalty = 0.0;
        for i in 0..NUM_PARAMS {
            if x[i] < problem.bounds.lower[i] {
                let d = problem.bounds.lower[i] - x[i];
                penalty += self.penalty_weight * d * d;
            }
            if x[i] > problem.bounds.upper[i] {
                let d = x[i] - problem.bounds.upper[i];
                penalty += self.penalty_weight * d * d;
            }
        }
        for g in problem.constraints {
            let v = g(x);
            if !v.is_finite() {
                return f64::MAX;
            }
            if v < 0.0 {
                penalty += self.penalty_weight * v * v;
            }
        }
        let f = (problem.objective)(x);
        if !f.is_finite() {
            return f64::MAX;
        }
        f + penalty
    }
}

impl Minimizer for NelderMead {
    fn minimize(&self, problem: &Problem<'_>) -> Result<Solution> {
        const N: usize = NUM_PARAMS;
        let f = |x: &[Real; N]| self.merit(problem, x);

        // Initial simplex: perturb each coordinate relative to its magnitude.
        let x0 = problem.initial;
        let mut simplex: Vec<([Real; N], Real)> = Vec::with_capacity(N + 1);
        simplex.push((x0, f(&x0)));
        for i in 0..N {
            let mut xi = x0;
            let pert = if xi[i].abs() > 1e-8 { xi[i] * 0.1 } else { 0.01 };
            xi[i] += pert;
            simplex.push((xi, f(&xi)));
        }

        let mut iterations = 0;
        loop {
            simplex.sort_by(|a, b| {
                a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal)
            });

            if simplex[N].1 - simplex[0].1 < problem.ftol {
                return Ok(Solution {
                    x: simplex[0].0,
                    value: simplex[0].1,
                    iterations,
                    reason: TerminationReason::FunctionTolerance,
                });
            }
            if iterations >= self.max_iterations {
                return Ok(Solution {
                    x: simplex[0].0,
                    value: simplex[0].1,
                    iterations,
                    reason: TerminationReason::MaxIterations,
                });
            }
            iterations += 1;

            // Centroid (excluding worst)
            let mut centroid = [0.0; N];
            for vertex in simplex.iter().take(N) {
                for i in 0..N {
                    centroid[i] += vertex.0[i];
                }
            }
            for c in &mut centroid {
                *c /= N as Real;
            }

            // Reflection
            let worst = simplex[N].0;
            let mut reflected = [0.0; N];
            for i in 0..N {
                reflected[i] = 2.0 * centroid[i] - worst[i];
            }
            let fr = f(&reflected);

            if fr < simplex[0].1 {
                // Expansion
                let mut expanded = [0.0; N];
                for i in 0..N {
                    expanded[i] = 2.0 * reflected[i] - centroid[i];
                }
                let fe = f(&expanded);
                if fe < fr {
                    simplex[N] = (expanded, fe);
                } else {
                    simplex[N] = (reflected, fr);
                }
            } else if fr < simplex[N - 1].1 {
                simplex[N] = (reflected, fr);
            } else {
                // Contraction
                let mut contracted = [0.0; N];
                if fr < simplex[N].1 {
                    for i in 0..N {
                        contracted[i] = 0.5 * (reflected[i] + centroid[i]);
                    }
                } else {
                    for i in 0..N {
                        contracted[i] = 0.5 * (worst[i] + centroid[i]);
                    }
                }
                let fc = f(&contracted);
                if fc < simplex[N].1 {
                    simplex[N] = (contracted, fc);
                } else {
                    // Shrink towards best
                    let best = simplex[0].0;
                    for entry in simplex.iter_mut().skip(1) {
                        let mut xi = entry.0;
                        for i in 0..N {
                            xi[i] = 0.5 * (xi[i] + best[i]);
                        }
                        *entry = (xi, f(&xi));
                    }
                }
            }
        }
    }
}
