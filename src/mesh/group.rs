//! Groups of cells and interfaces.

/// A named, dimension-tagged partition of the mesh.
///
/// The field region has the mesh dimension; boundary regions have
/// dimension one less. Interface membership is resolved by
/// `Mesh::topology`.
#[derive(Clone, Debug)]
pub struct Group {
    /// Group name (e.g. "field", "inlet", "outlet").
    pub name: String,
    /// Topological dimension of the member cells.
    pub dim: usize,
    /// Member cell indices.
    pub cells: Vec<usize>,
    /// Member interface indices, filled by `Mesh::topology`.
    pub interfaces: Vec<usize>,
}

impl Group {
    /// Create a group with the given member cells.
    pub fn new(name: impl Into<String>, dim: usize, cells: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            dim,
            cells,
            interfaces: Vec::new(),
        }
    }
}
