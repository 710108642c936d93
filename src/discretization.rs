//! Spatial discretization: the semi-discrete DG operator.
//!
//! Owns one [`Element`] per field cell plus the per-element inverse mass
//! and stiffness matrices, all assembled once at construction. The only
//! per-step work is [`Discretization::compute`], which evaluates the
//! semi-discrete right-hand side
//!
//! du/dt = M^-1 (-S F(u) + elementFlux - source)
//!
//! where the element flux lifts the interface mismatch (F - F*) n back
//! into the cell (strong-form DG).

use faer::{linalg::solvers::Solve, Mat};

use crate::element::Element;
use crate::error::{DgError, Result};
use crate::flux::LaxFriedrichs;
use crate::formulation::Formulation;
use crate::mesh::Cell;

/// The semi-discrete DG operator for one [`Formulation`].
#[derive(Debug)]
pub struct Discretization {
    formulation: Formulation,
    order: usize,
    numerical_flux: LaxFriedrichs,
    /// One element per field cell, in field-group order.
    elements: Vec<Element>,
    /// Mesh cell index -> index into `elements`.
    element_of_cell: Vec<Option<usize>>,
    /// Boundary interface -> index into the formulation's condition list.
    bc_of_interface: Vec<Option<usize>>,
    /// Per-element inverse mass matrix, replicated across variables.
    inv_mass: Vec<Mat<f64>>,
    /// Per-element stiffness matrix, replicated across variables.
    stiffness: Vec<Mat<f64>>,
    /// Per-element projected source term (the source is spatial only, so
    /// this is computed once).
    source_contrib: Vec<Vec<f64>>,
    n_unknowns: usize,
}

/// Assemble and invert an element's mass matrix
/// M(i,j) = sum_k w_k N_i(x_k) N_j(x_k) |J(x_k)|.
pub fn inverse_mass_matrix(element: &Element, cell: &Cell) -> Mat<f64> {
    let nn = element.n_nodes();
    let mut m = Mat::<f64>::zeros(nn, nn);
    for k in 0..element.ipoints.n {
        let w = element.ipoints.weights[k] * cell.djac[k];
        for i in 0..nn {
            for j in 0..nn {
                m[(i, j)] += w * element.eshape.phi[(k, i)] * element.eshape.phi[(k, j)];
            }
        }
    }

    let lu = m.as_ref().full_piv_lu();
    let identity = Mat::<f64>::identity(nn, nn);
    lu.solve(&identity)
}

/// Assemble an element's stiffness matrix
/// S(i,j) = sum_k w_k N_i(x_k) J^-1(x_k) N_j'(x_k) |J(x_k)|.
pub fn stiffness_matrix(element: &Element, cell: &Cell) -> Mat<f64> {
    let nn = element.n_nodes();
    let mut s = Mat::<f64>::zeros(nn, nn);
    for k in 0..element.ipoints.n {
        let w = element.ipoints.weights[k] * cell.djac[k] * cell.ijac[k];
        for i in 0..nn {
            for j in 0..nn {
                s[(i, j)] += w * element.eshape.phi[(k, i)] * element.eshape.dphi[(k, j)];
            }
        }
    }
    s
}

/// Kronecker product of the identity of size `nv` with `m`: `nv` copies
/// of `m` on the block diagonal, matching the per-variable row layout.
pub fn kron_identity(nv: usize, m: &Mat<f64>) -> Mat<f64> {
    let nn = m.nrows();
    Mat::from_fn(nv * nn, nv * nn, |i, j| {
        if i / nn == j / nn {
            m[(i % nn, j % nn)]
        } else {
            0.0
        }
    })
}

impl Discretization {
    /// Build the discretization at polynomial `order`: one element per
    /// field cell, all matrices, and the projected source term.
    pub fn new(
        mut formulation: Formulation,
        order: usize,
        numerical_flux: LaxFriedrichs,
    ) -> Result<Self> {
        let nv = formulation.n_vars;
        let nn = order + 1;
        let field_cells = formulation.mesh.groups[formulation.field].cells.clone();

        let mut elements = Vec::with_capacity(field_cells.len());
        let mut element_of_cell = vec![None; formulation.mesh.cells.len()];
        let mut inv_mass = Vec::with_capacity(field_cells.len());
        let mut stiffness = Vec::with_capacity(field_cells.len());

        for (ei, &ci) in field_cells.iter().enumerate() {
            let base = ei * nv * nn;
            let rows: Vec<Vec<usize>> = (0..nv)
                .map(|v| (base + v * nn..base + (v + 1) * nn).collect())
                .collect();
            let element = Element::new(rows, ci, &mut formulation.mesh, order)?;

            let cell = &formulation.mesh.cells[ci];
            inv_mass.push(kron_identity(nv, &inverse_mass_matrix(&element, cell)));
            stiffness.push(kron_identity(nv, &stiffness_matrix(&element, cell)));

            element_of_cell[ci] = Some(ei);
            elements.push(element);
        }

        let mut bc_of_interface = vec![None; formulation.mesh.interfaces.len()];
        for (bi, bc) in formulation.boundaries.iter().enumerate() {
            for &ii in &formulation.mesh.groups[bc.group].interfaces {
                bc_of_interface[ii] = Some(bi);
            }
        }
        for iface in &formulation.mesh.interfaces {
            if iface.is_boundary() && bc_of_interface[iface.id].is_none() {
                return Err(DgError::Config(format!(
                    "boundary interface {} is not covered by any boundary condition",
                    iface.id
                )));
            }
        }

        let source_contrib = Self::project_source(&formulation, &elements)?;

        log::info!(
            "discretization ready: {} elements of order {}, {} unknowns",
            elements.len(),
            order,
            field_cells.len() * nv * nn
        );

        Ok(Self {
            n_unknowns: field_cells.len() * nv * nn,
            formulation,
            order,
            numerical_flux,
            elements,
            element_of_cell,
            bc_of_interface,
            inv_mass,
            stiffness,
            source_contrib,
        })
    }

    /// Project the source term onto each element's basis, at the
    /// integration points. Empty vectors when there is no source.
    fn project_source(formulation: &Formulation, elements: &[Element]) -> Result<Vec<Vec<f64>>> {
        let Some(source) = &formulation.source else {
            return Ok(vec![Vec::new(); elements.len()]);
        };

        let nv = formulation.n_vars;
        let mut contribs = Vec::with_capacity(elements.len());
        for element in elements {
            let nn = element.n_nodes();
            let cell = &formulation.mesh.cells[element.cell];
            let x = formulation.mesh.cell_x(element.cell);

            let mut b = vec![0.0; nv * nn];
            for k in 0..element.ipoints.n {
                let r = element.ipoints.points[k];
                let xk = 0.5 * (1.0 - r) * x[0] + 0.5 * (1.0 + r) * x[1];
                let w = element.ipoints.weights[k] * cell.djac[k];
                for v in 0..nv {
                    let sv = w * source.eval(v, xk)?;
                    for i in 0..nn {
                        b[v * nn + i] += sv * element.eshape.phi[(k, i)];
                    }
                }
            }
            contribs.push(b);
        }
        Ok(contribs)
    }

    /// Total number of unknowns.
    pub fn n_unknowns(&self) -> usize {
        self.n_unknowns
    }

    /// Polynomial order.
    pub fn order(&self) -> usize {
        self.order
    }

    /// The elements, in field-group order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The underlying formulation.
    pub fn formulation(&self) -> &Formulation {
        &self.formulation
    }

    /// Physical position of every unknown (each variable of a node maps
    /// to the same coordinate).
    pub fn positions(&self) -> Vec<f64> {
        let mut x = vec![0.0; self.n_unknowns];
        for element in &self.elements {
            for rows_v in &element.rows {
                for (i, &row) in rows_v.iter().enumerate() {
                    x[row] = element.positions()[i];
                }
            }
        }
        x
    }

    /// Sample the initial condition at every evaluation point.
    pub fn initial_state(&self) -> Result<Vec<f64>> {
        let mut u = vec![0.0; self.n_unknowns];
        for element in &self.elements {
            for (v, rows_v) in element.rows.iter().enumerate() {
                for (i, &row) in rows_v.iter().enumerate() {
                    u[row] = self.formulation.initial.eval(v, element.positions()[i], 0.0)?;
                }
            }
        }
        Ok(u)
    }

    fn element_of(&self, cell: usize) -> Result<&Element> {
        self.element_of_cell[cell]
            .map(|ei| &self.elements[ei])
            .ok_or_else(|| DgError::Topology(format!("cell {} has no element", cell)))
    }

    /// Numerical flux at every interface, [interface][point][var].
    ///
    /// At domain boundaries the missing trace is synthesized from the
    /// matching boundary condition at time `t`.
    fn interface_fluxes(&self, u: &[f64], t: f64) -> Result<Vec<Vec<Vec<f64>>>> {
        let mesh = &self.formulation.mesh;
        let mut fstar = Vec::with_capacity(mesh.interfaces.len());

        for iface in &mesh.interfaces {
            let e0 = self.element_of(iface.neighbors[0])?;
            let u0 = e0.face_values(iface.id, u)?;
            let n0 = e0.outward_normal(iface.id)?;

            let u1 = if iface.is_boundary() {
                let bi = self.bc_of_interface[iface.id].ok_or_else(|| {
                    DgError::Config(format!("boundary interface {} has no condition", iface.id))
                })?;
                let bc = &self.formulation.boundaries[bi];
                let x = e0.face_position(iface.id)?;
                u0.iter()
                    .map(|trace| bc.ghost_state(trace, x, t))
                    .collect::<Result<Vec<_>>>()?
            } else {
                self.element_of(iface.neighbors[1])?.face_values(iface.id, u)?
            };

            let flux = u0
                .iter()
                .zip(&u1)
                .map(|(s0, s1)| self.numerical_flux.eval(&self.formulation.flux, s0, s1, n0))
                .collect();
            fstar.push(flux);
        }
        Ok(fstar)
    }

    /// Evaluate the semi-discrete right-hand side du/dt at state `u` and
    /// time `t`.
    pub fn compute(&self, u: &[f64], t: f64) -> Result<Vec<f64>> {
        if u.len() != self.n_unknowns {
            return Err(DgError::Config(format!(
                "state has {} entries, the discretization has {} unknowns",
                u.len(),
                self.n_unknowns
            )));
        }

        let mesh = &self.formulation.mesh;
        let physical = &self.formulation.flux;
        let nv = self.formulation.n_vars;
        let fstar = self.interface_fluxes(u, t)?;

        let mut rhs = vec![0.0; self.n_unknowns];
        for (ei, element) in self.elements.iter().enumerate() {
            let nn = element.n_nodes();
            let mut b = vec![0.0; nv * nn];

            // Volume term: -S F(u), with F evaluated nodally.
            let mut f_nodal = vec![0.0; nv * nn];
            for i in 0..nn {
                let state: Vec<f64> = (0..nv).map(|v| u[element.rows[v][i]]).collect();
                let f = physical.eval(&state);
                for v in 0..nv {
                    f_nodal[v * nn + i] = f[v];
                }
            }
            let s = &self.stiffness[ei];
            for r in 0..nv * nn {
                let mut acc = 0.0;
                for c in 0..nv * nn {
                    acc += s[(r, c)] * f_nodal[c];
                }
                b[r] -= acc;
            }

            // Element flux: lift (F - F*) n over each bounding interface.
            for &fi in element.faces() {
                let shape = element.face_shape(fi)?;
                let weights = element.face_weights(fi)?;
                let n = element.outward_normal(fi)?;
                let traces = element.face_values(fi, u)?;
                let djac = &mesh.interfaces[fi].djac;

                for (k, trace) in traces.iter().enumerate() {
                    let f_face = physical.eval(trace);
                    let scale = weights[k] * djac[k] * n;
                    for v in 0..nv {
                        let diff = scale * (f_face[v] - fstar[fi][k][v]);
                        for i in 0..nn {
                            b[v * nn + i] += diff * shape.phi[(k, i)];
                        }
                    }
                }
            }

            // Source convention: dU/dt + dF/dx + s(x) = 0.
            for (r, sv) in self.source_contrib[ei].iter().enumerate() {
                b[r] -= sv;
            }

            let minv = &self.inv_mass[ei];
            for (v, rows_v) in element.rows.iter().enumerate() {
                for (i, &row) in rows_v.iter().enumerate() {
                    let r = v * nn + i;
                    let mut acc = 0.0;
                    for c in 0..nv * nn {
                        acc += minv[(r, c)] * b[c];
                    }
                    rhs[row] = acc;
                }
            }
        }
        Ok(rhs)
    }
}
