//! Explicit time integration.
//!
//! Each scheme is a pure function of the current [`SimulationContext`]:
//! it evaluates [`Discretization::compute`] at one or more intermediate
//! states and returns the advanced context without touching any other
//! state.

use crate::discretization::Discretization;
use crate::error::Result;

/// SSPRK4 five-stage coefficients (Spiteri & Ruuth). Fixed constants of
/// the scheme.
const SSPRK4_C: [f64; 5] = [
    0.0,
    0.39175222700392,
    0.58607968896780,
    0.47454236302687,
    0.93501063100924,
];

/// The full state of a simulation between two steps.
#[derive(Clone, Debug)]
pub struct SimulationContext {
    /// Current simulation time.
    pub time: f64,
    /// Completed step count.
    pub iteration: usize,
    /// Global unknown vector.
    pub state: Vec<f64>,
}

impl SimulationContext {
    /// Start a simulation at t = 0 from an initial state.
    pub fn new(state: Vec<f64>) -> Self {
        Self {
            time: 0.0,
            iteration: 0,
            state,
        }
    }
}

/// Explicit stepping scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scheme {
    /// First-order explicit Euler.
    ExplicitEuler,
    /// Second-order Runge-Kutta (Heun).
    Rk2,
    /// Classic fourth-order Runge-Kutta.
    Rk4,
    /// Five-stage fourth-order strong-stability-preserving Runge-Kutta.
    SspRk4,
}

impl Scheme {
    /// Advance `ctx` by one step of size `dt`.
    pub fn step(
        &self,
        disc: &Discretization,
        ctx: &SimulationContext,
        dt: f64,
    ) -> Result<SimulationContext> {
        let u = &ctx.state;
        let t = ctx.time;

        let state = match self {
            Scheme::ExplicitEuler => {
                let k = disc.compute(u, t)?;
                axpy(u, dt, &k)
            }
            Scheme::Rk2 => {
                // Heun: average of the Euler predictor and its correction.
                let k1 = disc.compute(u, t)?;
                let v1 = axpy(u, dt, &k1);
                let k2 = disc.compute(&v1, t + dt)?;
                u.iter()
                    .zip(&v1)
                    .zip(&k2)
                    .map(|((&ui, &v1i), &k2i)| 0.5 * (ui + v1i + dt * k2i))
                    .collect()
            }
            Scheme::Rk4 => {
                let k1 = disc.compute(u, t)?;
                let k2 = disc.compute(&axpy(u, 0.5 * dt, &k1), t + 0.5 * dt)?;
                let k3 = disc.compute(&axpy(u, 0.5 * dt, &k2), t + 0.5 * dt)?;
                let k4 = disc.compute(&axpy(u, dt, &k3), t + dt)?;
                (0..u.len())
                    .map(|i| u[i] + dt / 6.0 * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]))
                    .collect()
            }
            Scheme::SspRk4 => {
                let k = disc.compute(u, t + SSPRK4_C[0] * dt)?;
                let u1 = axpy(u, 0.391752226571890 * dt, &k);

                let k = disc.compute(&u1, t + SSPRK4_C[1] * dt)?;
                let u2: Vec<f64> = (0..u.len())
                    .map(|i| {
                        0.444370493651235 * u[i]
                            + 0.555629506348765 * u1[i]
                            + 0.368410593050371 * dt * k[i]
                    })
                    .collect();

                let k = disc.compute(&u2, t + SSPRK4_C[2] * dt)?;
                let u3: Vec<f64> = (0..u.len())
                    .map(|i| {
                        0.620101851488403 * u[i]
                            + 0.379898148511597 * u2[i]
                            + 0.251891774271694 * dt * k[i]
                    })
                    .collect();

                let k3 = disc.compute(&u3, t + SSPRK4_C[3] * dt)?;
                let u4: Vec<f64> = (0..u.len())
                    .map(|i| {
                        0.178079954393132 * u[i]
                            + 0.821920045606868 * u3[i]
                            + 0.544974750228521 * dt * k3[i]
                    })
                    .collect();

                let k4 = disc.compute(&u4, t + SSPRK4_C[4] * dt)?;
                (0..u.len())
                    .map(|i| {
                        0.517231671970585 * u2[i]
                            + 0.096059710526147 * u3[i]
                            + 0.063692468666290 * dt * k3[i]
                            + 0.386708617503269 * u4[i]
                            + 0.226007483236906 * dt * k4[i]
                    })
                    .collect()
            }
        };

        Ok(SimulationContext {
            time: t + dt,
            iteration: ctx.iteration + 1,
            state,
        })
    }
}

fn axpy(u: &[f64], a: f64, k: &[f64]) -> Vec<f64> {
    u.iter().zip(k).map(|(&ui, &ki)| ui + a * ki).collect()
}

/// Drives a [`Scheme`] from t = 0 to `tmax` with a fixed step.
#[derive(Clone, Debug)]
pub struct TimeIntegrator {
    scheme: Scheme,
    dt: f64,
    tmax: f64,
}

impl TimeIntegrator {
    pub fn new(scheme: Scheme, dt: f64, tmax: f64) -> Result<Self> {
        if dt <= 0.0 || tmax <= 0.0 {
            return Err(crate::error::DgError::Config(format!(
                "time step and horizon must be positive, got dt = {}, tmax = {}",
                dt, tmax
            )));
        }
        Ok(Self { scheme, dt, tmax })
    }

    /// Run from the discretization's initial state until the clock
    /// reaches `tmax`. Every call advances by the full `dt`, so the final
    /// step may overshoot the horizon; consumers compare results at the
    /// returned context's actual time. `sink` observes every completed
    /// step (iteration, time, state).
    pub fn run(
        &self,
        disc: &Discretization,
        mut sink: impl FnMut(usize, f64, &[f64]),
    ) -> Result<SimulationContext> {
        let mut ctx = SimulationContext::new(disc.initial_state()?);
        sink(ctx.iteration, ctx.time, &ctx.state);

        log::info!(
            "running {:?} to t = {} with dt = {}",
            self.scheme,
            self.tmax,
            self.dt
        );

        while ctx.time < self.tmax {
            ctx = self.scheme.step(disc, &ctx, self.dt)?;
            sink(ctx.iteration, ctx.time, &ctx.state);
        }
        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::{BoundaryCondition, BoundaryKind, InitialCondition};
    use crate::flux::{LaxFriedrichs, PhysicalFlux};
    use crate::formulation::Formulation;
    use crate::mesh::line_mesh;
    use crate::source::SourceTerm;
    use std::f64::consts::PI;

    /// dU/dt = 1 everywhere: constant advected state with s(x) = -1.
    fn clock_discretization() -> Discretization {
        let mesh = line_mesh(1.0, 2).unwrap();
        let formulation = Formulation::new(
            mesh,
            PhysicalFlux::Advection { a: 1.0 },
            InitialCondition::new(vec![Box::new(|_, _| 0.0)]),
            vec![
                BoundaryCondition::new(1, vec![BoundaryKind::Neumann]),
                BoundaryCondition::new(2, vec![BoundaryKind::Neumann]),
            ],
            Some(SourceTerm::new(vec![Box::new(|_| -1.0)])),
        )
        .unwrap();
        Discretization::new(formulation, 2, LaxFriedrichs::new(0.0).unwrap()).unwrap()
    }

    #[test]
    fn test_all_schemes_integrate_a_clock_exactly() {
        // With du/dt = 1 every scheme is exact regardless of order. The
        // state stays spatially constant so the transport term vanishes.
        let disc = clock_discretization();
        for scheme in [
            Scheme::ExplicitEuler,
            Scheme::Rk2,
            Scheme::Rk4,
            Scheme::SspRk4,
        ] {
            let integrator = TimeIntegrator::new(scheme, 0.0625, 1.0).unwrap();
            let ctx = integrator.run(&disc, |_, _, _| {}).unwrap();
            assert!((ctx.time - 1.0).abs() < 1e-12);
            for ui in &ctx.state {
                assert!((ui - ctx.time).abs() < 1e-9, "{:?}: u = {}", scheme, ui);
            }
        }
    }

    #[test]
    fn test_every_step_advances_by_the_full_dt() {
        // The step size is never shortened; with dt = 0.3 and tmax = 1.0
        // the run takes four full steps and overshoots to t = 1.2.
        let disc = clock_discretization();
        let integrator = TimeIntegrator::new(Scheme::ExplicitEuler, 0.3, 1.0).unwrap();
        let mut times = Vec::new();
        let ctx = integrator.run(&disc, |_, t, _| times.push(t)).unwrap();
        assert_eq!(ctx.iteration, 4);
        assert!((ctx.time - 1.2).abs() < 1e-12);
        for w in times.windows(2) {
            assert!((w[1] - w[0] - 0.3).abs() < 1e-12, "step of {}", w[1] - w[0]);
        }
    }

    /// A smooth advected sine on 4 cells; stiff enough that the time
    /// error is measurable, smooth enough that each scheme shows its
    /// design order.
    fn sine_discretization(order: usize) -> Discretization {
        let mesh = line_mesh(10.0, 4).unwrap();
        let formulation = Formulation::new(
            mesh,
            PhysicalFlux::Advection { a: 1.0 },
            InitialCondition::new(vec![Box::new(|x, _| (0.2 * PI * x).sin())]),
            vec![
                BoundaryCondition::new(
                    1,
                    vec![BoundaryKind::Dirichlet(Box::new(|x, t| {
                        (0.2 * PI * (x - t)).sin()
                    }))],
                ),
                BoundaryCondition::new(2, vec![BoundaryKind::Neumann]),
            ],
            None,
        )
        .unwrap();
        Discretization::new(formulation, order, LaxFriedrichs::new(0.0).unwrap()).unwrap()
    }

    fn run_fixed(disc: &Discretization, scheme: Scheme, dt: f64, n_steps: usize) -> Vec<f64> {
        let mut ctx = SimulationContext::new(disc.initial_state().unwrap());
        for _ in 0..n_steps {
            ctx = scheme.step(disc, &ctx, dt).unwrap();
        }
        ctx.state
    }

    fn inf_diff(a: &[f64], b: &[f64]) -> f64 {
        a.iter()
            .zip(b)
            .map(|(&ai, &bi)| (ai - bi).abs())
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_schemes_converge_at_their_design_order() {
        // Compare against a reference computed with a much smaller step on
        // the same spatial discretization, so only the time error remains.
        // Halving dt must shrink it by roughly 2^order.
        let disc = sine_discretization(4);
        let tmax = 0.64;
        let reference = run_fixed(&disc, Scheme::Rk4, tmax / 256.0, 256);

        for (scheme, lo, hi) in [
            (Scheme::ExplicitEuler, 0.7, 1.6),
            (Scheme::Rk2, 1.6, 2.8),
            (Scheme::Rk4, 3.0, 5.5),
            (Scheme::SspRk4, 3.0, 5.5),
        ] {
            let coarse = inf_diff(&run_fixed(&disc, scheme, tmax / 8.0, 8), &reference);
            let fine = inf_diff(&run_fixed(&disc, scheme, tmax / 16.0, 16), &reference);
            let order = (coarse / fine).log2();
            println!(
                "{:?}: e(dt) = {:.3e}, e(dt/2) = {:.3e}, order = {:.2}",
                scheme, coarse, fine, order
            );
            assert!(fine < coarse, "{:?}: no decay", scheme);
            assert!(
                order > lo && order < hi,
                "{:?}: observed order {}",
                scheme,
                order
            );
        }
    }

    #[test]
    fn test_rk2_matches_the_heun_update() {
        // One step must equal u_next = (u + v1 + dt L(v1, t + dt)) / 2
        // with v1 = u + dt L(u, t), computed by hand.
        let disc = sine_discretization(3);
        let ctx = SimulationContext::new(disc.initial_state().unwrap());
        let dt = 0.05;
        let stepped = Scheme::Rk2.step(&disc, &ctx, dt).unwrap();

        let k1 = disc.compute(&ctx.state, ctx.time).unwrap();
        let v1: Vec<f64> = ctx
            .state
            .iter()
            .zip(&k1)
            .map(|(&ui, &ki)| ui + dt * ki)
            .collect();
        let k2 = disc.compute(&v1, ctx.time + dt).unwrap();
        for i in 0..v1.len() {
            let heun = 0.5 * (ctx.state[i] + v1[i] + dt * k2[i]);
            assert!(
                (stepped.state[i] - heun).abs() < 1e-14,
                "row {}: {} vs {}",
                i,
                stepped.state[i],
                heun
            );
        }
    }

    #[test]
    fn test_step_is_pure() {
        let disc = clock_discretization();
        let ctx = SimulationContext::new(disc.initial_state().unwrap());
        let stepped = Scheme::Rk4.step(&disc, &ctx, 0.1).unwrap();

        // The input context is untouched.
        assert_eq!(ctx.time, 0.0);
        assert_eq!(ctx.iteration, 0);
        assert!(ctx.state.iter().all(|&u| u == 0.0));
        assert_eq!(stepped.iteration, 1);
        assert!((stepped.time - 0.1).abs() < 1e-15);
    }

    #[test]
    fn test_integrator_rejects_bad_configuration() {
        assert!(TimeIntegrator::new(Scheme::Rk2, 0.0, 1.0).is_err());
        assert!(TimeIntegrator::new(Scheme::Rk2, 0.1, -1.0).is_err());
    }
}
