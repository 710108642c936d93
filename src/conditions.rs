//! Initial and boundary conditions.

use crate::error::{DgError, Result};

/// A user-supplied function of space and time.
pub type SpaceTimeFn = Box<dyn Fn(f64, f64) -> f64 + Send + Sync>;

/// Initial condition: one function of x per physical variable, sampled at
/// t = 0 on the element evaluation points.
pub struct InitialCondition {
    funs: Vec<SpaceTimeFn>,
}

impl InitialCondition {
    pub fn new(funs: Vec<SpaceTimeFn>) -> Self {
        Self { funs }
    }

    /// Number of variables covered.
    pub fn n_vars(&self) -> usize {
        self.funs.len()
    }

    /// Sample variable `var` at position `x` and time `t`.
    pub fn eval(&self, var: usize, x: f64, t: f64) -> Result<f64> {
        let f = self.funs.get(var).ok_or_else(|| {
            DgError::Config(format!(
                "initial condition covers {} variables, requested {}",
                self.funs.len(),
                var
            ))
        })?;
        Ok(f(x, t))
    }
}

impl std::fmt::Debug for InitialCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitialCondition")
            .field("n_vars", &self.funs.len())
            .finish()
    }
}

/// Per-variable boundary behavior at a domain boundary.
pub enum BoundaryKind {
    /// Prescribed exterior value u(x, t); the interface flux sees it as
    /// the ghost state.
    Dirichlet(SpaceTimeFn),
    /// Zero-gradient outflow: the ghost state copies the interior trace.
    Neumann,
}

impl std::fmt::Debug for BoundaryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dirichlet(_) => f.write_str("Dirichlet"),
            Self::Neumann => f.write_str("Neumann"),
        }
    }
}

/// A boundary condition: one [`BoundaryKind`] per variable, attached to a
/// boundary group of the mesh.
#[derive(Debug)]
pub struct BoundaryCondition {
    /// Index of the boundary group this condition applies to.
    pub group: usize,
    /// Per-variable behavior.
    pub kinds: Vec<BoundaryKind>,
}

impl BoundaryCondition {
    pub fn new(group: usize, kinds: Vec<BoundaryKind>) -> Self {
        Self { group, kinds }
    }

    /// Ghost state seen from outside the domain, given the interior trace.
    pub fn ghost_state(&self, interior: &[f64], x: f64, t: f64) -> Result<Vec<f64>> {
        if self.kinds.len() != interior.len() {
            return Err(DgError::Config(format!(
                "boundary condition covers {} variables, state has {}",
                self.kinds.len(),
                interior.len()
            )));
        }
        Ok(self
            .kinds
            .iter()
            .zip(interior)
            .map(|(kind, &ui)| match kind {
                BoundaryKind::Dirichlet(f) => f(x, t),
                BoundaryKind::Neumann => ui,
            })
            .collect())
    }
}
