//! Mesh topology: nodes, cells, deduplicated interfaces and groups.
//!
//! A mesh is built once from nodes, cells and groups; `topology()` then
//! derives the interfaces (shared between adjacent cells) and resolves
//! which group each interface belongs to. All links are indices into the
//! mesh vectors, so entities stay plain data.

mod cell;
mod group;
mod interface;
mod line;
mod node;

pub use cell::{Cell, CellKind};
pub use group::Group;
pub use interface::Interface;
pub use line::line_mesh;
pub use node::Node;

use crate::error::{DgError, Result};
use std::collections::{HashMap, HashSet};

/// A 1D mesh with resolved topology.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Mesh name, for diagnostics.
    pub name: String,
    /// Mesh dimension (only 1 is supported).
    pub dim: usize,
    /// Nodes, with unique ids.
    pub nodes: Vec<Node>,
    /// Cells; field cells have the mesh dimension.
    pub cells: Vec<Cell>,
    /// Interfaces, derived by `topology()`.
    pub interfaces: Vec<Interface>,
    /// Groups: exactly one field group plus boundary groups.
    pub groups: Vec<Group>,
}

impl Mesh {
    /// Create a mesh from raw entities; call [`Mesh::topology`] before use.
    pub fn new(
        name: impl Into<String>,
        dim: usize,
        nodes: Vec<Node>,
        cells: Vec<Cell>,
        groups: Vec<Group>,
    ) -> Self {
        Self {
            name: name.into(),
            dim,
            nodes,
            cells,
            interfaces: Vec::new(),
            groups,
        }
    }

    /// Resolve the mesh topology: sanity checks, interface deduplication
    /// and group assignment. Must be called exactly once before any
    /// element is constructed.
    pub fn topology(&mut self) -> Result<()> {
        if !self.interfaces.is_empty() {
            return Err(DgError::Topology(format!(
                "topology of mesh '{}' is already resolved",
                self.name
            )));
        }
        if self.nodes.is_empty() || self.cells.is_empty() {
            return Err(DgError::Topology(
                "cannot resolve topology: no nodes or cells in the mesh".into(),
            ));
        }
        if self.dim != 1 {
            return Err(DgError::Topology(format!(
                "only 1D meshes are supported, got dimension {}",
                self.dim
            )));
        }

        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.id) {
                return Err(DgError::Topology(format!("duplicate node id {}", node.id)));
            }
        }

        let field_groups = self.groups.iter().filter(|g| g.dim == self.dim).count();
        if field_groups != 1 {
            return Err(DgError::Topology(format!(
                "the mesh must contain exactly one group of its own dimension, found {}",
                field_groups
            )));
        }
        if !self.groups.iter().any(|g| g.dim + 1 == self.dim) {
            return Err(DgError::Topology(
                "the mesh must contain at least one boundary group".into(),
            ));
        }

        let field = self.field_group()?;
        self.build_interfaces()?;
        self.assign_group_interfaces(field);
        Ok(())
    }

    /// Derive interfaces by iterating every field cell's boundary nodes,
    /// deduplicating on the canonical sorted-node-id key. The first
    /// sighting creates the interface (with the sighting side's intrinsic
    /// normal); later sightings link to it. Neighbor order is the
    /// deterministic encounter order.
    fn build_interfaces(&mut self) -> Result<()> {
        let mut by_key: HashMap<Vec<usize>, usize> = HashMap::new();

        // In 1D a line cell is bounded by its two end vertices, with
        // intrinsic normals -x and +x in reference orientation.
        let local_normals = [-1.0, 1.0];

        for ci in 0..self.cells.len() {
            if self.cells[ci].kind != CellKind::Line2 {
                continue;
            }
            for (local, &n) in self.cells[ci].nodes.clone().iter().enumerate() {
                let key = Interface::key(&[n]);
                let idx = match by_key.get(&key) {
                    Some(&idx) => idx,
                    None => {
                        let idx = self.interfaces.len();
                        self.interfaces.push(Interface::new(
                            idx,
                            vec![n],
                            [local_normals[local], 0.0, 0.0],
                        ));
                        by_key.insert(key, idx);
                        idx
                    }
                };
                self.interfaces[idx].neighbors.push(ci);
                self.cells[ci].boundaries.push(idx);
            }
        }

        for iface in &self.interfaces {
            if iface.neighbors.is_empty() || iface.neighbors.len() > 2 {
                return Err(DgError::Topology(format!(
                    "interface {} has {} neighbors",
                    iface.id,
                    iface.neighbors.len()
                )));
            }
        }
        Ok(())
    }

    /// An interface whose node set matches a boundary-group cell belongs
    /// to that group; every other interface belongs to the field group.
    fn assign_group_interfaces(&mut self, field: usize) {
        for ii in 0..self.interfaces.len() {
            let key = &self.interfaces[ii].nodes;
            let mut owner = field;
            'groups: for (gi, group) in self.groups.iter().enumerate() {
                if group.dim + 1 != self.dim {
                    continue;
                }
                for &ci in &group.cells {
                    if Interface::key(&self.cells[ci].nodes) == *key {
                        owner = gi;
                        break 'groups;
                    }
                }
            }
            self.groups[owner].interfaces.push(ii);
        }
    }

    /// Index of the field group (dimension equal to the mesh).
    pub fn field_group(&self) -> Result<usize> {
        self.groups
            .iter()
            .position(|g| g.dim == self.dim)
            .ok_or_else(|| DgError::Topology("mesh has no field group".into()))
    }

    /// Centroid of a cell: average of its node positions.
    pub fn cell_centroid(&self, cell: usize) -> [f64; 3] {
        centroid(self.cells[cell].nodes.iter().map(|&n| self.nodes[n].x))
    }

    /// Centroid of an interface.
    pub fn interface_centroid(&self, iface: usize) -> [f64; 3] {
        centroid(self.interfaces[iface].nodes.iter().map(|&n| self.nodes[n].x))
    }

    /// Physical x-coordinates of a cell's nodes.
    pub fn cell_x(&self, cell: usize) -> Vec<f64> {
        self.cells[cell].nodes.iter().map(|&n| self.nodes[n].x[0]).collect()
    }

    /// Populate a cell's geometric cache at the given reference
    /// integration points (one-shot, see [`Cell::update_geometry`]).
    pub fn update_cell_geometry(&mut self, cell: usize, points: &[f64]) -> Result<()> {
        let x = self.cell_x(cell);
        self.cells[cell].update_geometry(&x, points)
    }
}

fn centroid(points: impl Iterator<Item = [f64; 3]>) -> [f64; 3] {
    let mut c = [0.0; 3];
    let mut count = 0usize;
    for p in points {
        for d in 0..3 {
            c[d] += p[d];
        }
        count += 1;
    }
    for d in 0..3 {
        c[d] /= count as f64;
    }
    c
}
