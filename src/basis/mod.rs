//! Nodal basis construction.

mod lagrange;

pub use lagrange::LagrangeBasis;
