//! Crate-wide error type.
//!
//! Configuration errors (bad quadrature order, malformed topology, unmatched
//! interfaces, invalid parameters) are fatal: they propagate as `Err` and
//! abort the run. Numerical convergence issues and positivity clamps are
//! *not* errors; they are reported through the `log` facade.

use thiserror::Error;

/// Error type for DG setup and evaluation.
#[derive(Debug, Error)]
pub enum DgError {
    /// Invalid quadrature configuration.
    #[error("invalid quadrature: {0}")]
    InvalidQuadrature(String),

    /// Malformed mesh topology (missing nodes/cells, group accounting, ...).
    #[error("mesh topology error: {0}")]
    Topology(String),

    /// An interface could not be matched to a cell boundary.
    #[error("interface {interface} is not a boundary of cell {cell}")]
    InterfaceNotFound { interface: usize, cell: usize },

    /// Invalid run configuration (parameter out of range, size mismatch, ...).
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DgError>;
