//! Mesh nodes.

/// A mesh node: identifier plus a 3-component position.
///
/// Nodes are immutable once created; positions always carry three
/// components even in 1D so centroid/normal arithmetic stays uniform.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Unique node identifier.
    pub id: usize,
    /// Position vector.
    pub x: [f64; 3],
}

impl Node {
    /// Create a node at the given position.
    pub fn new(id: usize, x: [f64; 3]) -> Self {
        Self { id, x }
    }
}
