//! Gauss-Legendre and Gauss-Legendre-Lobatto quadrature rules.
//!
//! Both rules produce `n = order + 1` symmetric points in [-1, 1] with
//! positive weights:
//! - Gauss-Legendre: interior points, exact for polynomials of degree
//!   2n-1. Used for integration.
//! - Gauss-Legendre-Lobatto: includes the endpoints ±1, exact for degree
//!   2n-3. Used as interpolation/evaluation nodes; requires n >= 3.
//!
//! Roots are found by Newton iteration seeded at the classical
//! Chebyshev-based guesses. Symmetry is exploited: only the roots on one
//! side of the origin are iterated, the rest are mirrored (plus an exact
//! zero root when the count is odd).

use super::legendre::{legendre, legendre_and_derivative, legendre_second_derivative};
use crate::error::{DgError, Result};
use std::f64::consts::PI;

/// Newton update tolerance on the step magnitude.
const NEWTON_TOL: f64 = 1e-16;
/// Iteration cap; exceeding it is reported, not fatal.
const NEWTON_MAX_ITS: usize = 100;

/// A set of quadrature points and weights on [-1, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct QuadratureRule {
    /// Number of points.
    pub n: usize,
    /// Points in ascending order.
    pub points: Vec<f64>,
    /// Weights, matching `points`.
    pub weights: Vec<f64>,
}

/// Newton iteration for a root of `f`, where `eval` returns (f, f').
///
/// Converges when the update step drops below `NEWTON_TOL`. A run that
/// exhausts the iteration cap keeps the approximate root and reports it.
fn newton_root(seed: f64, rule: &str, eval: impl Fn(f64) -> (f64, f64)) -> f64 {
    let mut x = seed;
    let mut dx = f64::INFINITY;

    for _ in 0..NEWTON_MAX_ITS {
        let (f, df) = eval(x);
        dx = -f / df;
        x += dx;
        if dx.abs() < NEWTON_TOL {
            return x;
        }
    }

    log::warn!(
        "{}: Newton iteration did not converge, last step = {:e}",
        rule,
        dx.abs()
    );
    x
}

/// Gauss-Legendre rule with `order + 1` points.
///
/// The points are the roots of P_n; the weights are
/// w = 2 / ((1 - x²) P'_n(x)²).
pub fn gauss_legendre(order: usize) -> QuadratureRule {
    let n = order + 1;

    // Roots in (0, 1], found by Newton from the Chebyshev guess
    // x_i = cos(π (i - 1/4) / (n + 1/2)), i = 1..n/2 (descending).
    let mut half = Vec::with_capacity(n / 2);
    for i in 1..=n / 2 {
        let seed = (PI * (i as f64 - 0.25) / (n as f64 + 0.5)).cos();
        half.push(newton_root(seed, "gauss_legendre", |x| {
            legendre_and_derivative(n, x)
        }));
    }

    // Mirror to the negative half; odd n has an exact zero root.
    let mut points = Vec::with_capacity(n);
    points.extend(half.iter().map(|&x| -x));
    if n % 2 != 0 {
        points.push(0.0);
    }
    points.extend(half.iter().rev());

    let weights = points
        .iter()
        .map(|&x| {
            let dp = legendre_and_derivative(n, x).1;
            2.0 / ((1.0 - x * x) * dp * dp)
        })
        .collect();

    QuadratureRule { n, points, weights }
}

/// Gauss-Legendre-Lobatto rule with `order + 1` points, including ±1.
///
/// The interior points are the roots of P'_N with N = order; the weights
/// are w = 2 / (N (N+1) P_N(x)²). Fails for fewer than 3 points.
pub fn gauss_lobatto(order: usize) -> Result<QuadratureRule> {
    let n = order + 1;
    if n < 3 {
        return Err(DgError::InvalidQuadrature(format!(
            "Gauss-Legendre-Lobatto needs at least 3 points, got {} (order {})",
            n, order
        )));
    }

    let big_n = order; // polynomial whose derivative roots are the interior points
    let interior = n - 2;

    // Interior roots on the negative side, from the Chebyshev-Lobatto guess
    // x_j = -cos(π j / N), j = 1..interior/2 (ascending towards 0).
    let mut half = Vec::with_capacity(interior / 2);
    for j in 1..=interior / 2 {
        let seed = -(PI * j as f64 / big_n as f64).cos();
        half.push(newton_root(seed, "gauss_lobatto", |x| {
            (
                legendre_and_derivative(big_n, x).1,
                legendre_second_derivative(big_n, x),
            )
        }));
    }

    let mut points = Vec::with_capacity(n);
    points.push(-1.0);
    points.extend(half.iter());
    if interior % 2 != 0 {
        points.push(0.0);
    }
    points.extend(half.iter().rev().map(|&x| -x));
    points.push(1.0);

    let denom = (big_n * (big_n + 1)) as f64;
    let weights = points
        .iter()
        .map(|&x| {
            let p = legendre(big_n, x);
            2.0 / (denom * p * p)
        })
        .collect();

    Ok(QuadratureRule { n, points, weights })
}
