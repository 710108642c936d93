//! Mesh cells.

use crate::error::{DgError, Result};

/// Cell type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    /// 2-node line segment (field cells in 1D).
    Line2,
    /// Single-node point (boundary-group cells in 1D).
    Point1,
}

impl CellKind {
    /// Topological dimension of the cell.
    pub fn dim(&self) -> usize {
        match self {
            CellKind::Line2 => 1,
            CellKind::Point1 => 0,
        }
    }
}

/// A mesh cell: node list, type tag, bounding interfaces and a geometric
/// cache at the active integration points.
///
/// The geometric cache (`jac`, `ijac`, `djac`) is populated exactly once by
/// [`Cell::update_geometry`] with a chosen set of reference integration
/// points; the mesh is static, so it is treated as immutable afterwards.
#[derive(Clone, Debug)]
pub struct Cell {
    /// Cell identifier (index into the mesh cell list).
    pub id: usize,
    /// Ordered bounding node indices.
    pub nodes: Vec<usize>,
    /// Type tag.
    pub kind: CellKind,
    /// Bounding interface indices, filled by `Mesh::topology`.
    pub boundaries: Vec<usize>,
    /// Jacobian dx/dr per integration point.
    pub jac: Vec<f64>,
    /// Inverse Jacobian dr/dx per integration point.
    pub ijac: Vec<f64>,
    /// Jacobian determinant |J| per integration point.
    pub djac: Vec<f64>,
}

impl Cell {
    /// Create a cell; topology and geometry are filled in later.
    pub fn new(id: usize, nodes: Vec<usize>, kind: CellKind) -> Self {
        Self {
            id,
            nodes,
            kind,
            boundaries: Vec::new(),
            jac: Vec::new(),
            ijac: Vec::new(),
            djac: Vec::new(),
        }
    }

    /// Populate the geometric cache at the given reference integration
    /// points, using the linear node→reference map.
    ///
    /// `positions` holds the physical x-coordinate of each cell node. The
    /// cache is one-shot: a second call is a configuration error.
    pub fn update_geometry(&mut self, positions: &[f64], points: &[f64]) -> Result<()> {
        if !self.jac.is_empty() {
            return Err(DgError::Config(format!(
                "geometric cache of cell {} is already populated",
                self.id
            )));
        }
        if self.kind != CellKind::Line2 || positions.len() != 2 {
            return Err(DgError::Config(format!(
                "geometric update only implemented for 2-node line cells (cell {})",
                self.id
            )));
        }

        // Linear shape derivatives on [-1, 1]: dN = [-1/2, 1/2], so
        // dx/dr = (x_1 - x_0) / 2 at every point.
        for _ in points {
            let j = 0.5 * (positions[1] - positions[0]);
            if j == 0.0 {
                return Err(DgError::Config(format!("cell {} is degenerate", self.id)));
            }
            self.jac.push(j);
            self.ijac.push(1.0 / j);
            self.djac.push(j.abs());
        }
        Ok(())
    }
}
