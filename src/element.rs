//! Per-cell local DG operator.
//!
//! An element owns, for one field cell:
//! - the global row indices of its degrees of freedom (per variable,
//!   contiguous per variable within the cell block),
//! - the evaluation-point set (Gauss-Legendre-Lobatto interpolation
//!   nodes) and the integration-point set (Gauss-Legendre),
//! - shape tables at the integration points and one-point shape tables on
//!   each bounding interface,
//! - resolved outward normals and physical positions.
//!
//! Building an element also triggers the cell's one-shot geometric update
//! at the element's integration points.

use crate::basis::LagrangeBasis;
use crate::error::{DgError, Result};
use crate::mesh::Mesh;
use crate::polynomial::{gauss_legendre, gauss_lobatto, QuadratureRule};

/// The local numerical operator attached to one field cell.
#[derive(Clone, Debug)]
pub struct Element {
    /// Index of the underlying mesh cell.
    pub cell: usize,
    /// Polynomial order.
    pub order: usize,
    /// Global rows: `rows[v][i]` is the unknown for variable v at
    /// evaluation point i.
    pub rows: Vec<Vec<usize>>,
    /// Evaluation (interpolation) points.
    pub epoints: QuadratureRule,
    /// Integration points.
    pub ipoints: QuadratureRule,
    /// Shape table at the integration points.
    pub eshape: LagrangeBasis,
    /// Bounding interface indices, in the cell's local order.
    faces: Vec<usize>,
    /// One-point shape table per bounding interface.
    fshapes: Vec<LagrangeBasis>,
    /// Integration weights per bounding interface (a single unit weight
    /// for a vertex in 1D).
    fweights: Vec<Vec<f64>>,
    /// Resolved outward normal (x-component) per bounding interface.
    normals: Vec<f64>,
    /// Physical positions of the evaluation points.
    xe: Vec<f64>,
    /// Physical position per bounding interface.
    xf: Vec<f64>,
}

impl Element {
    /// Build the element for `cell`, wiring `rows[v][i]` to the global
    /// unknown vector. Populates the cell's geometric cache.
    pub fn new(rows: Vec<Vec<usize>>, cell: usize, mesh: &mut Mesh, order: usize) -> Result<Self> {
        let epoints = gauss_lobatto(order)?;
        let ipoints = gauss_legendre(order);
        let eshape = LagrangeBasis::new(&ipoints.points, &epoints.points);

        mesh.update_cell_geometry(cell, &ipoints.points)?;

        let x = mesh.cell_x(cell);
        let to_physical = |r: f64| 0.5 * (1.0 - r) * x[0] + 0.5 * (1.0 + r) * x[1];
        let xe: Vec<f64> = epoints.points.iter().map(|&r| to_physical(r)).collect();

        let faces = mesh.cells[cell].boundaries.clone();
        let cell_nodes = mesh.cells[cell].nodes.clone();
        let cell_centroid = mesh.cell_centroid(cell);

        let mut fshapes = Vec::with_capacity(faces.len());
        let mut fweights = Vec::with_capacity(faces.len());
        let mut normals = Vec::with_capacity(faces.len());
        let mut xf = Vec::with_capacity(faces.len());

        for &fi in &faces {
            let iface = &mesh.interfaces[fi];

            // Reference coordinate of the interface in this cell's frame.
            let r = if iface.nodes == [cell_nodes[0]] {
                -1.0
            } else if iface.nodes == [cell_nodes[1]] {
                1.0
            } else {
                return Err(DgError::InterfaceNotFound {
                    interface: fi,
                    cell,
                });
            };

            fshapes.push(LagrangeBasis::new(&[r], &epoints.points));
            fweights.push(vec![1.0]);
            xf.push(to_physical(r));

            // Outward direction: the intrinsic normal must point from the
            // cell centroid towards the interface centroid.
            let ic = mesh.interface_centroid(fi);
            let dot: f64 = (0..3)
                .map(|d| iface.normal[d] * (ic[d] - cell_centroid[d]))
                .sum();
            if dot == 0.0 {
                return Err(DgError::Config(format!(
                    "cell {} centroid coincides with interface {}",
                    cell, fi
                )));
            }
            let sign = if dot < 0.0 { -1.0 } else { 1.0 };
            normals.push(sign * iface.normal[0]);
        }

        Ok(Self {
            cell,
            order,
            rows,
            epoints,
            ipoints,
            eshape,
            faces,
            fshapes,
            fweights,
            normals,
            xe,
            xf,
        })
    }

    /// Number of evaluation points (local degrees of freedom per variable).
    pub fn n_nodes(&self) -> usize {
        self.order + 1
    }

    /// Number of physical variables.
    pub fn n_vars(&self) -> usize {
        self.rows.len()
    }

    /// Bounding interface indices.
    pub fn faces(&self) -> &[usize] {
        &self.faces
    }

    /// Local index of `interface` among this element's boundaries.
    pub fn face_index(&self, interface: usize) -> Result<usize> {
        self.faces
            .iter()
            .position(|&f| f == interface)
            .ok_or(DgError::InterfaceNotFound {
                interface,
                cell: self.cell,
            })
    }

    /// Interpolate the global solution onto the integration points of one
    /// of this element's interfaces.
    ///
    /// Returns one state vector (all variables) per interface integration
    /// point. Fails if `interface` is not a boundary of the cell.
    pub fn face_values(&self, interface: usize, u: &[f64]) -> Result<Vec<Vec<f64>>> {
        let local = self.face_index(interface)?;
        let shape = &self.fshapes[local];

        let mut values = Vec::with_capacity(shape.n_samples());
        for k in 0..shape.n_samples() {
            let mut state = Vec::with_capacity(self.rows.len());
            for rows_v in &self.rows {
                let mut uv = 0.0;
                for (i, &row) in rows_v.iter().enumerate() {
                    uv += shape.phi[(k, i)] * u[row];
                }
                state.push(uv);
            }
            values.push(state);
        }
        Ok(values)
    }

    /// Shape-function table on one of this element's interfaces.
    pub fn face_shape(&self, interface: usize) -> Result<&LagrangeBasis> {
        Ok(&self.fshapes[self.face_index(interface)?])
    }

    /// Integration weights on one of this element's interfaces.
    pub fn face_weights(&self, interface: usize) -> Result<&[f64]> {
        Ok(&self.fweights[self.face_index(interface)?])
    }

    /// Physical positions of the evaluation points.
    pub fn positions(&self) -> &[f64] {
        &self.xe
    }

    /// Physical position of an interface's integration point.
    pub fn face_position(&self, interface: usize) -> Result<f64> {
        Ok(self.xf[self.face_index(interface)?])
    }

    /// Cached outward normal (x-component) towards an interface.
    pub fn outward_normal(&self, interface: usize) -> Result<f64> {
        Ok(self.normals[self.face_index(interface)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::line_mesh;

    fn build(order: usize, n_cells: usize, cell: usize) -> (Mesh, Element) {
        let mut mesh = line_mesh(1.0, n_cells).unwrap();
        let nn = order + 1;
        let rows = vec![(cell * nn..(cell + 1) * nn).collect()];
        let element = Element::new(rows, cell, &mut mesh, order).unwrap();
        (mesh, element)
    }

    #[test]
    fn test_positions_affine_round_trip() {
        // Mapping reference points to physical coordinates and evaluating
        // an affine function must match the function of the mapped points.
        let (_, element) = build(4, 4, 2);
        let f = |x: f64| 3.0 * x - 1.5;

        // Cell 2 of 4 on [0, 1] spans [0.5, 0.75].
        for (i, &r) in element.epoints.points.iter().enumerate() {
            let expected = 0.5 + 0.25 * (1.0 + r) / 2.0;
            assert!((element.positions()[i] - expected).abs() < 1e-14);
            assert!((f(element.positions()[i]) - f(expected)).abs() < 1e-14);
        }

        for &fi in element.faces() {
            let xf = element.face_position(fi).unwrap();
            assert!(xf == 0.5 || xf == 0.75, "face at {}", xf);
        }
    }

    #[test]
    fn test_face_values_interpolate_affine_exactly() {
        let (_, element) = build(3, 2, 0);
        let f = |x: f64| -2.0 * x + 7.0;

        let mut u = vec![0.0; 2 * element.n_nodes()];
        for (i, &row) in element.rows[0].iter().enumerate() {
            u[row] = f(element.positions()[i]);
        }

        for &fi in element.faces() {
            let values = element.face_values(fi, &u).unwrap();
            let xf = element.face_position(fi).unwrap();
            assert_eq!(values.len(), 1);
            assert!(
                (values[0][0] - f(xf)).abs() < 1e-12,
                "face {} at x={}: {} vs {}",
                fi,
                xf,
                values[0][0],
                f(xf)
            );
        }
    }

    #[test]
    fn test_outward_normals() {
        let (_, element) = build(2, 3, 1);

        // Left face points in -x, right face in +x.
        let left = element.faces()[0];
        let right = element.faces()[1];
        assert!((element.outward_normal(left).unwrap() + 1.0).abs() < 1e-14);
        assert!((element.outward_normal(right).unwrap() - 1.0).abs() < 1e-14);
    }

    #[test]
    fn test_unknown_interface_is_rejected() {
        let (mesh, element) = build(2, 3, 0);
        // An interface of cell 2 is not a boundary of cell 0.
        let foreign = mesh.cells[2].boundaries[1];
        let u = vec![0.0; 3 * element.n_nodes()];
        assert!(element.face_values(foreign, &u).is_err());
        assert!(element.outward_normal(foreign).is_err());
    }

    #[test]
    fn test_rejects_order_below_two() {
        // GLL evaluation points need at least 3 nodes.
        let mut mesh = line_mesh(1.0, 1).unwrap();
        let rows = vec![vec![0, 1]];
        assert!(Element::new(rows, 0, &mut mesh, 1).is_err());
    }
}
