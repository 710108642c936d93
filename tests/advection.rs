//! Linear advection of a smooth sine profile over one transit time.
//!
//! The profile u(x, t) = sin(2 pi (x - a t) / l) is fed in at the inlet,
//! so after tmax = l / a the initial profile is reproduced exactly and
//! the discrete solution can be compared against it pointwise.

use dg1d::{
    line_mesh, BoundaryCondition, BoundaryKind, Discretization, Formulation, InitialCondition,
    LaxFriedrichs, PhysicalFlux, Scheme, TimeIntegrator,
};
use std::f64::consts::PI;

const LENGTH: f64 = 10.0;
const SPEED: f64 = 3.0;

fn exact(x: f64, t: f64) -> f64 {
    (2.0 * PI * (x - SPEED * t) / LENGTH).sin()
}

/// Run one transit of the sine profile and return the infinity-norm
/// error against the exact translated solution.
fn run_advection(n_cells: usize, order: usize, scheme: Scheme) -> f64 {
    let mesh = line_mesh(LENGTH, n_cells).unwrap();
    let formulation = Formulation::new(
        mesh,
        PhysicalFlux::Advection { a: SPEED },
        InitialCondition::new(vec![Box::new(|x, t| exact(x, t))]),
        vec![
            BoundaryCondition::new(1, vec![BoundaryKind::Dirichlet(Box::new(|x, t| exact(x, t)))]),
            BoundaryCondition::new(2, vec![BoundaryKind::Neumann]),
        ],
        None,
    )
    .unwrap();

    let disc = Discretization::new(formulation, order, LaxFriedrichs::new(0.0).unwrap()).unwrap();

    let tmax = LENGTH / SPEED;
    let h = LENGTH / n_cells as f64;
    let dt = 0.2 * h / (SPEED * (2 * order + 1) as f64);
    let integrator = TimeIntegrator::new(scheme, dt, tmax).unwrap();
    let ctx = integrator.run(&disc, |_, _, _| {}).unwrap();

    // The last step may overshoot tmax, so compare at the actual time.
    let x = disc.positions();
    ctx.state
        .iter()
        .zip(&x)
        .map(|(&ui, &xi)| (ui - exact(xi, ctx.time)).abs())
        .fold(0.0, f64::max)
}

#[test]
fn test_one_transit_on_a_coarse_mesh() {
    // 3 cells at order 4 resolve a single sine wavelength to ~3e-1.
    let error = run_advection(3, 4, Scheme::Rk4);
    println!("coarse transit: inf error = {:.4e}", error);
    assert!(error < 3e-1, "inf error = {}", error);
}

#[test]
fn test_error_shrinks_with_cell_refinement() {
    let resolutions = [3, 6, 12];
    let errors: Vec<f64> = resolutions
        .iter()
        .map(|&n| run_advection(n, 4, Scheme::Rk4))
        .collect();

    println!("h-refinement at order 4:");
    for (&n, &err) in resolutions.iter().zip(&errors) {
        println!("  n={:3}: inf error={:.4e}", n, err);
    }
    assert!(errors[1] < errors[0]);
    assert!(errors[2] < errors[1]);
}

#[test]
fn test_error_shrinks_with_order_refinement() {
    let orders = [2, 3, 4];
    let errors: Vec<f64> = orders
        .iter()
        .map(|&p| run_advection(3, p, Scheme::Rk4))
        .collect();

    println!("p-refinement on 3 cells:");
    for (&p, &err) in orders.iter().zip(&errors) {
        println!("  p={}: inf error={:.4e}", p, err);
    }
    assert!(errors[1] < errors[0]);
    assert!(errors[2] < errors[1]);
}

#[test]
fn test_schemes_agree_on_the_smooth_profile() {
    // At this resolution the spatial error dominates, so RK4 and SSPRK4
    // land on essentially the same answer.
    let rk4 = run_advection(6, 4, Scheme::Rk4);
    let ssprk4 = run_advection(6, 4, Scheme::SspRk4);
    println!("rk4 = {:.4e}, ssprk4 = {:.4e}", rk4, ssprk4);
    assert!((rk4 - ssprk4).abs() < 1e-3);
}
