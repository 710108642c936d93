//! Legendre polynomial evaluation.
//!
//! Legendre polynomials P_n(x) are orthogonal on [-1, 1] with weight 1:
//! ∫_{-1}^{1} P_m(x) P_n(x) dx = 2/(2n+1) δ_{mn}
//!
//! All evaluations use the standard three-term recurrences, run iteratively
//! so they stay exact and cheap up to the orders a discretization uses
//! (tens).

/// Evaluate Legendre polynomial P_n(x).
///
/// Recurrence:
/// P_0(x) = 1
/// P_1(x) = x
/// n P_n(x) = (2n-1) x P_{n-1}(x) - (n-1) P_{n-2}(x)
pub fn legendre(n: usize, x: f64) -> f64 {
    if n == 0 {
        return 1.0;
    }
    if n == 1 {
        return x;
    }

    let mut p_prev = 1.0; // P_{k-1}
    let mut p_curr = x; // P_k

    for k in 2..=n {
        let kf = k as f64;
        let p_next = ((2.0 * kf - 1.0) * x * p_curr - (kf - 1.0) * p_prev) / kf;
        p_prev = p_curr;
        p_curr = p_next;
    }

    p_curr
}

/// Evaluate the first derivative P'_n(x).
///
/// Recurrence:
/// P'_0(x) = 0
/// P'_1(x) = 1
/// (n-1) P'_n(x) = (2n-1) x P'_{n-1}(x) - n P'_{n-2}(x)
pub fn legendre_derivative(n: usize, x: f64) -> f64 {
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return 1.0;
    }

    let mut d_prev = 0.0; // P'_{k-1}
    let mut d_curr = 1.0; // P'_k

    for k in 2..=n {
        let kf = k as f64;
        let d_next = ((2.0 * kf - 1.0) * x * d_curr - kf * d_prev) / (kf - 1.0);
        d_prev = d_curr;
        d_curr = d_next;
    }

    d_curr
}

/// Evaluate the second derivative P''_n(x).
///
/// Recurrence:
/// P''_0(x) = P''_1(x) = 0
/// P''_2(x) = 3
/// (n-2) P''_n(x) = (2n-1) x P''_{n-1}(x) - (n+1) P''_{n-2}(x)
pub fn legendre_second_derivative(n: usize, x: f64) -> f64 {
    if n <= 1 {
        return 0.0;
    }
    if n == 2 {
        return 3.0;
    }

    let mut dd_prev = 0.0; // P''_{k-1}
    let mut dd_curr = 3.0; // P''_k

    for k in 3..=n {
        let kf = k as f64;
        let dd_next = ((2.0 * kf - 1.0) * x * dd_curr - (kf + 1.0) * dd_prev) / (kf - 2.0);
        dd_prev = dd_curr;
        dd_curr = dd_next;
    }

    dd_curr
}

/// Evaluate both P_n(x) and P'_n(x) in one pass.
///
/// Used by the Newton root solvers, where both values are needed at every
/// iteration.
pub fn legendre_and_derivative(n: usize, x: f64) -> (f64, f64) {
    (legendre(n, x), legendre_derivative(n, x))
}
