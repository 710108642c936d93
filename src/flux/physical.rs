//! Physical flux functions F(U) for the supported conservation laws.

use faer::Mat;
use std::sync::atomic::{AtomicU64, Ordering};

/// Floor applied to quantities under a square root (water height,
/// density, pressure) before estimating wave speeds.
const POSITIVITY_FLOOR: f64 = 1.0e-12;

static CLAMP_EVENTS: AtomicU64 = AtomicU64::new(0);

/// Number of times a near-vacuum state was floored during wave-speed
/// estimation since program start.
pub fn clamp_events() -> u64 {
    CLAMP_EVENTS.load(Ordering::Relaxed)
}

fn floored(value: f64, what: &str) -> f64 {
    if value < POSITIVITY_FLOOR {
        CLAMP_EVENTS.fetch_add(1, Ordering::Relaxed);
        log::debug!("flooring non-positive {} = {:e} for wave-speed estimate", what, value);
        POSITIVITY_FLOOR
    } else {
        value
    }
}

/// The physical flux of a 1D hyperbolic conservation law
/// dU/dt + dF(U)/dx = 0.
#[derive(Clone, Debug)]
pub enum PhysicalFlux {
    /// Linear advection of a scalar at speed `a`: F = a u.
    Advection { a: f64 },
    /// Decoupled linear advection of several scalars, one speed each.
    MultiAdvection { a: Vec<f64> },
    /// Inviscid Burgers: F = u^2 / 2.
    Burgers,
    /// Shallow water in (h, u) variables with gravity `g`:
    /// F = [h u, u^2/2 + g h].
    ShallowWater { g: f64 },
    /// Compressible Euler in conservative variables (rho, rho u, E) with
    /// ratio of specific heats `gamma`.
    Euler { gamma: f64 },
}

impl PhysicalFlux {
    /// Number of physical variables the flux couples.
    pub fn n_vars(&self) -> usize {
        match self {
            Self::Advection { .. } | Self::Burgers => 1,
            Self::MultiAdvection { a } => a.len(),
            Self::ShallowWater { .. } => 2,
            Self::Euler { .. } => 3,
        }
    }

    /// Evaluate F(U) for one state.
    pub fn eval(&self, u: &[f64]) -> Vec<f64> {
        match self {
            Self::Advection { a } => vec![a * u[0]],
            Self::MultiAdvection { a } => a.iter().zip(u).map(|(ai, ui)| ai * ui).collect(),
            Self::Burgers => vec![0.5 * u[0] * u[0]],
            Self::ShallowWater { g } => {
                let (h, v) = (u[0], u[1]);
                vec![h * v, 0.5 * v * v + g * h]
            }
            Self::Euler { gamma } => {
                let (rho, mom, e) = (floored(u[0], "density"), u[1], u[2]);
                let v = mom / rho;
                let p = (gamma - 1.0) * (e - 0.5 * rho * v * v);
                vec![mom, mom * v + p, (e + p) * v]
            }
        }
    }

    /// Flux Jacobian dF/dU at one state.
    pub fn jacobian(&self, u: &[f64]) -> Mat<f64> {
        match self {
            Self::Advection { a } => Mat::from_fn(1, 1, |_, _| *a),
            Self::MultiAdvection { a } => {
                Mat::from_fn(a.len(), a.len(), |i, j| if i == j { a[i] } else { 0.0 })
            }
            Self::Burgers => Mat::from_fn(1, 1, |_, _| u[0]),
            Self::ShallowWater { g } => {
                let (h, v) = (u[0], u[1]);
                let rows = [[v, h], [*g, v]];
                Mat::from_fn(2, 2, |i, j| rows[i][j])
            }
            Self::Euler { gamma } => {
                let (rho, mom, e) = (floored(u[0], "density"), u[1], u[2]);
                let v = mom / rho;
                let gm1 = gamma - 1.0;
                let rows = [
                    [0.0, 1.0, 0.0],
                    [0.5 * (gamma - 3.0) * v * v, (3.0 - gamma) * v, gm1],
                    [
                        v * (gm1 * v * v - gamma * e / rho),
                        gamma * e / rho - 1.5 * gm1 * v * v,
                        gamma * v,
                    ],
                ];
                Mat::from_fn(3, 3, |i, j| rows[i][j])
            }
        }
    }

    /// Estimated largest characteristic speed |lambda| at one state.
    pub fn max_wave_speed(&self, u: &[f64]) -> f64 {
        match self {
            Self::Advection { a } => a.abs(),
            Self::MultiAdvection { a } => a.iter().fold(0.0, |m: f64, ai| m.max(ai.abs())),
            Self::Burgers => u[0].abs(),
            Self::ShallowWater { g } => {
                let h = floored(u[0], "water height");
                u[1].abs() + (g * h).sqrt()
            }
            Self::Euler { gamma } => {
                let rho = floored(u[0], "density");
                let v = u[1] / rho;
                let p = floored((gamma - 1.0) * (u[2] - 0.5 * rho * v * v), "pressure");
                v.abs() + (gamma * p / rho).sqrt()
            }
        }
    }
}
