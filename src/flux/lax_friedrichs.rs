//! Lax-Friedrichs numerical interface flux.

use super::PhysicalFlux;
use crate::error::{DgError, Result};

/// The (local) Lax-Friedrichs flux
///
/// F*(u0, u1) = (F(u0) + F(u1)) / 2 + (1 - alpha) c n0 (u0 - u1) / 2
///
/// where `c` is the largest wave-speed estimate of the two states and
/// `n0` the outward normal of side 0. `alpha = 0` gives the full upwind
/// dissipation, `alpha = 1` a central (dissipation-free) flux.
#[derive(Clone, Debug)]
pub struct LaxFriedrichs {
    alpha: f64,
}

impl LaxFriedrichs {
    /// Create the flux with dissipation control `alpha` in [0, 1].
    pub fn new(alpha: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(DgError::Config(format!(
                "Lax-Friedrichs alpha must lie in [0, 1], got {}",
                alpha
            )));
        }
        Ok(Self { alpha })
    }

    /// Evaluate the numerical flux for one pair of trace states.
    ///
    /// `n0` is the outward normal (x-component) of the side carrying `u0`.
    pub fn eval(&self, flux: &PhysicalFlux, u0: &[f64], u1: &[f64], n0: f64) -> Vec<f64> {
        let f0 = flux.eval(u0);
        let f1 = flux.eval(u1);
        let c = flux.max_wave_speed(u0).max(flux.max_wave_speed(u1));
        let jump = 0.5 * (1.0 - self.alpha) * c * n0;

        f0.iter()
            .zip(&f1)
            .zip(u0.iter().zip(u1))
            .map(|((f0i, f1i), (u0i, u1i))| 0.5 * (f0i + f1i) + jump * (u0i - u1i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_alpha_outside_unit_interval() {
        assert!(LaxFriedrichs::new(-0.1).is_err());
        assert!(LaxFriedrichs::new(1.1).is_err());
        assert!(LaxFriedrichs::new(0.0).is_ok());
        assert!(LaxFriedrichs::new(1.0).is_ok());
    }

    #[test]
    fn test_consistency_with_the_physical_flux() {
        // Equal traces must reproduce F(u) exactly, for every alpha.
        let physical = PhysicalFlux::Euler { gamma: 1.4 };
        let u = [1.0, 0.5, 2.0];
        for alpha in [0.0, 0.3, 1.0] {
            let lf = LaxFriedrichs::new(alpha).unwrap();
            let f_star = lf.eval(&physical, &u, &u, 1.0);
            let f = physical.eval(&u);
            for v in 0..3 {
                assert!((f_star[v] - f[v]).abs() < 1e-14);
            }
        }
    }

    #[test]
    fn test_full_upwinding_for_advection() {
        // With alpha = 0 and a > 0, the flux must take the upwind value.
        let physical = PhysicalFlux::Advection { a: 2.0 };
        let lf = LaxFriedrichs::new(0.0).unwrap();

        // Side 0 on the left (normal +1): upwind state is u0.
        let f = lf.eval(&physical, &[3.0], &[7.0], 1.0);
        assert!((f[0] - 6.0).abs() < 1e-14);

        // Side 0 on the right (normal -1): upwind state is u1.
        let f = lf.eval(&physical, &[3.0], &[7.0], -1.0);
        assert!((f[0] - 14.0).abs() < 1e-14);
    }

    #[test]
    fn test_central_flux_ignores_the_jump() {
        let physical = PhysicalFlux::Burgers;
        let lf = LaxFriedrichs::new(1.0).unwrap();
        let f = lf.eval(&physical, &[1.0], &[3.0], 1.0);
        assert!((f[0] - 0.5 * (0.5 + 4.5)).abs() < 1e-14);
    }

    #[test]
    fn test_dissipation_scales_with_the_wave_speed() {
        let physical = PhysicalFlux::Advection { a: 4.0 };
        let lf = LaxFriedrichs::new(0.5).unwrap();
        let f = lf.eval(&physical, &[1.0], &[0.0], 1.0);
        // (F(1) + F(0)) / 2 + 0.25 * 4 * (1 - 0) = 2 + 1.
        assert!((f[0] - 3.0).abs() < 1e-14);
    }
}
