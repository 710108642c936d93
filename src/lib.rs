//! # dg1d
//!
//! A nodal Discontinuous Galerkin engine for 1D hyperbolic conservation
//! laws dU/dt + dF(U)/dx + s(x) = 0.
//!
//! This crate provides the core building blocks for DG methods:
//! - Legendre polynomials and Gauss-Legendre / Gauss-Legendre-Lobatto
//!   quadrature
//! - Lagrange shape-function tables
//! - 1D mesh topology (nodes, cells, deduplicated interfaces, groups)
//! - Per-cell element operators
//! - Physical fluxes (advection, Burgers, shallow water, Euler) and the
//!   Lax-Friedrichs numerical flux
//! - The semi-discrete DG right-hand side
//! - Explicit time integration (Euler, RK2, RK4, SSPRK4)

pub mod basis;
pub mod conditions;
pub mod discretization;
pub mod element;
pub mod error;
pub mod flux;
pub mod formulation;
pub mod mesh;
pub mod polynomial;
pub mod source;
pub mod time;

// Re-export main types for convenience
pub use basis::LagrangeBasis;
pub use conditions::{BoundaryCondition, BoundaryKind, InitialCondition, SpaceTimeFn};
pub use discretization::{inverse_mass_matrix, kron_identity, stiffness_matrix, Discretization};
pub use element::Element;
pub use error::{DgError, Result};
pub use flux::{clamp_events, LaxFriedrichs, PhysicalFlux};
pub use formulation::Formulation;
pub use mesh::{line_mesh, Cell, CellKind, Group, Interface, Mesh, Node};
pub use polynomial::{gauss_legendre, gauss_lobatto, QuadratureRule};
pub use source::SourceTerm;
pub use time::{Scheme, SimulationContext, TimeIntegrator};
