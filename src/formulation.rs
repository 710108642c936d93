//! Problem formulation: mesh, physics and conditions bundled together.

use crate::conditions::{BoundaryCondition, InitialCondition};
use crate::error::{DgError, Result};
use crate::flux::PhysicalFlux;
use crate::mesh::Mesh;
use crate::source::SourceTerm;

/// A complete continuous problem statement: the conservation law, its
/// domain and the data needed to close it.
///
/// Construction validates that every piece agrees on the number of
/// variables and that each boundary group carries exactly one condition.
#[derive(Debug)]
pub struct Formulation {
    /// The (topology-resolved) mesh.
    pub mesh: Mesh,
    /// Index of the field group.
    pub field: usize,
    /// Number of physical variables.
    pub n_vars: usize,
    /// The physical flux F(U).
    pub flux: PhysicalFlux,
    /// Initial condition, one function per variable.
    pub initial: InitialCondition,
    /// Boundary conditions, one per boundary group.
    pub boundaries: Vec<BoundaryCondition>,
    /// Optional source term s(x).
    pub source: Option<SourceTerm>,
}

impl Formulation {
    pub fn new(
        mesh: Mesh,
        flux: PhysicalFlux,
        initial: InitialCondition,
        boundaries: Vec<BoundaryCondition>,
        source: Option<SourceTerm>,
    ) -> Result<Self> {
        let field = mesh.field_group()?;
        let n_vars = flux.n_vars();

        if initial.n_vars() != n_vars {
            return Err(DgError::Config(format!(
                "initial condition covers {} variables, the flux has {}",
                initial.n_vars(),
                n_vars
            )));
        }
        if let Some(source) = &source {
            if source.n_vars() != n_vars {
                return Err(DgError::Config(format!(
                    "source term covers {} variables, the flux has {}",
                    source.n_vars(),
                    n_vars
                )));
            }
        }

        let mut covered = vec![false; mesh.groups.len()];
        for bc in &boundaries {
            let group = mesh.groups.get(bc.group).ok_or_else(|| {
                DgError::Config(format!("boundary condition targets unknown group {}", bc.group))
            })?;
            if group.dim + 1 != mesh.dim {
                return Err(DgError::Config(format!(
                    "group '{}' is not a boundary group",
                    group.name
                )));
            }
            if covered[bc.group] {
                return Err(DgError::Config(format!(
                    "group '{}' carries more than one boundary condition",
                    group.name
                )));
            }
            if bc.kinds.len() != n_vars {
                return Err(DgError::Config(format!(
                    "boundary condition on '{}' covers {} variables, the flux has {}",
                    group.name,
                    bc.kinds.len(),
                    n_vars
                )));
            }
            covered[bc.group] = true;
        }
        for (gi, group) in mesh.groups.iter().enumerate() {
            if group.dim + 1 == mesh.dim && !covered[gi] {
                return Err(DgError::Config(format!(
                    "boundary group '{}' has no boundary condition",
                    group.name
                )));
            }
        }

        Ok(Self {
            mesh,
            field,
            n_vars,
            flux,
            initial,
            boundaries,
            source,
        })
    }

    /// The boundary condition attached to a boundary group.
    pub fn boundary_for_group(&self, group: usize) -> Option<&BoundaryCondition> {
        self.boundaries.iter().find(|bc| bc.group == group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::BoundaryKind;
    use crate::mesh::line_mesh;

    fn advection_pieces() -> (Mesh, PhysicalFlux, InitialCondition) {
        let mesh = line_mesh(1.0, 4).unwrap();
        let flux = PhysicalFlux::Advection { a: 1.0 };
        let ic = InitialCondition::new(vec![Box::new(|x, _| x)]);
        (mesh, flux, ic)
    }

    #[test]
    fn test_formulation_accepts_consistent_setup() {
        let (mesh, flux, ic) = advection_pieces();
        let bcs = vec![
            BoundaryCondition::new(1, vec![BoundaryKind::Dirichlet(Box::new(|_, _| 0.0))]),
            BoundaryCondition::new(2, vec![BoundaryKind::Neumann]),
        ];
        let formulation = Formulation::new(mesh, flux, ic, bcs, None).unwrap();
        assert_eq!(formulation.n_vars, 1);
        assert!(formulation.boundary_for_group(2).is_some());
        assert!(formulation.boundary_for_group(0).is_none());
    }

    #[test]
    fn test_formulation_rejects_variable_mismatch() {
        let (mesh, flux, _) = advection_pieces();
        let ic = InitialCondition::new(vec![Box::new(|x, _| x), Box::new(|_, _| 0.0)]);
        let bcs = vec![
            BoundaryCondition::new(1, vec![BoundaryKind::Neumann]),
            BoundaryCondition::new(2, vec![BoundaryKind::Neumann]),
        ];
        assert!(Formulation::new(mesh, flux, ic, bcs, None).is_err());
    }

    #[test]
    fn test_formulation_rejects_uncovered_boundary() {
        let (mesh, flux, ic) = advection_pieces();
        let bcs = vec![BoundaryCondition::new(1, vec![BoundaryKind::Neumann])];
        assert!(Formulation::new(mesh, flux, ic, bcs, None).is_err());
    }

    #[test]
    fn test_formulation_rejects_condition_on_field_group() {
        let (mesh, flux, ic) = advection_pieces();
        let bcs = vec![
            BoundaryCondition::new(0, vec![BoundaryKind::Neumann]),
            BoundaryCondition::new(1, vec![BoundaryKind::Neumann]),
            BoundaryCondition::new(2, vec![BoundaryKind::Neumann]),
        ];
        assert!(Formulation::new(mesh, flux, ic, bcs, None).is_err());
    }
}
