//! Legendre polynomials and quadrature rules.

mod legendre;
mod quadrature;

pub use legendre::{
    legendre, legendre_and_derivative, legendre_derivative, legendre_second_derivative,
};
pub use quadrature::{gauss_legendre, gauss_lobatto, QuadratureRule};
