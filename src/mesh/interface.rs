//! Interfaces between cells.

/// The coupling boundary shared by one or two cells.
///
/// Identity is defined purely by node-set membership: during topology
/// construction interfaces are deduplicated on a canonical sorted-node-id
/// key, so two adjacent cells that each declare "my boundary is here"
/// resolve to the same interface. One neighbor means domain boundary, two
/// means interior; the encounter order fixes which side is 0 and which is 1
/// for flux evaluation.
#[derive(Clone, Debug)]
pub struct Interface {
    /// Interface identifier (index into the mesh interface list).
    pub id: usize,
    /// Defining node indices (order-independent identity).
    pub nodes: Vec<usize>,
    /// Neighboring cell indices in encounter order (1 or 2 entries).
    pub neighbors: Vec<usize>,
    /// Intrinsic normal, set from the first sighting cell's local side.
    /// Elements resolve the true outward direction per neighbor.
    pub normal: [f64; 3],
    /// Jacobian determinant per integration point. A vertex interface in
    /// 1D is a zero-dimensional point, so this is unity by convention.
    pub djac: Vec<f64>,
}

impl Interface {
    /// Create an interface with the canonical (sorted) node key.
    pub fn new(id: usize, mut nodes: Vec<usize>, normal: [f64; 3]) -> Self {
        nodes.sort_unstable();
        Self {
            id,
            nodes,
            neighbors: Vec::new(),
            normal,
            djac: vec![1.0],
        }
    }

    /// Canonical identity key: the sorted node indices.
    pub fn key(nodes: &[usize]) -> Vec<usize> {
        let mut key = nodes.to_vec();
        key.sort_unstable();
        key
    }

    /// Whether this interface sits on the domain boundary.
    pub fn is_boundary(&self) -> bool {
        self.neighbors.len() == 1
    }
}
