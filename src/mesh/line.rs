//! Uniform 1D line mesh generator.

use super::{Cell, CellKind, Group, Mesh, Node};
use crate::error::{DgError, Result};

/// Build a uniform line mesh of the interval [0, length] with `n_cells`
/// cells, and resolve its topology.
///
/// Groups: "field" (the line cells), plus "inlet" and "outlet" point
/// groups marking the two domain boundaries.
pub fn line_mesh(length: f64, n_cells: usize) -> Result<Mesh> {
    if n_cells == 0 {
        return Err(DgError::Config("line mesh needs at least one cell".into()));
    }
    if length <= 0.0 {
        return Err(DgError::Config(format!(
            "line mesh length must be positive, got {}",
            length
        )));
    }

    let h = length / n_cells as f64;

    let nodes: Vec<Node> = (0..=n_cells)
        .map(|i| Node::new(i + 1, [i as f64 * h, 0.0, 0.0]))
        .collect();

    let mut cells: Vec<Cell> = (0..n_cells)
        .map(|i| Cell::new(i, vec![i, i + 1], CellKind::Line2))
        .collect();

    // Point cells marking the two ends, referenced by the boundary groups.
    let inlet_cell = cells.len();
    cells.push(Cell::new(inlet_cell, vec![0], CellKind::Point1));
    let outlet_cell = cells.len();
    cells.push(Cell::new(outlet_cell, vec![n_cells], CellKind::Point1));

    let groups = vec![
        Group::new("field", 1, (0..n_cells).collect()),
        Group::new("inlet", 0, vec![inlet_cell]),
        Group::new("outlet", 0, vec![outlet_cell]),
    ];

    let mut mesh = Mesh::new("line", 1, nodes, cells, groups);
    mesh.topology()?;
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_mesh_layout() {
        let mesh = line_mesh(10.0, 5).unwrap();

        assert_eq!(mesh.nodes.len(), 6);
        assert_eq!(mesh.groups.len(), 3);
        assert_eq!(mesh.groups[0].cells.len(), 5);
        for (i, node) in mesh.nodes.iter().enumerate() {
            assert!((node.x[0] - 2.0 * i as f64).abs() < 1e-14);
        }
    }

    #[test]
    fn test_line_mesh_groups() {
        let mesh = line_mesh(1.0, 3).unwrap();

        assert_eq!(mesh.groups[1].name, "inlet");
        assert_eq!(mesh.groups[1].interfaces.len(), 1);
        assert_eq!(mesh.groups[2].name, "outlet");
        assert_eq!(mesh.groups[2].interfaces.len(), 1);

        // The inlet interface sits at x = 0, the outlet at x = 1.
        let inlet = mesh.groups[1].interfaces[0];
        assert!((mesh.interface_centroid(inlet)[0]).abs() < 1e-14);
        let outlet = mesh.groups[2].interfaces[0];
        assert!((mesh.interface_centroid(outlet)[0] - 1.0).abs() < 1e-14);
    }

    #[test]
    fn test_line_mesh_rejects_bad_input() {
        assert!(line_mesh(1.0, 0).is_err());
        assert!(line_mesh(-1.0, 3).is_err());
    }
}
