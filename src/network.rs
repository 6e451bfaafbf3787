//! Random network generation
//!
//! Builds uniform G(n, m) random graphs on top of `petgraph` and derives the
//! dense adjacency matrix printed in the console report. Nodes are the
//! integers `0..n`; edges are undirected with no self-loops and no
//! parallel edges.

use std::fmt;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rand::Rng;

use crate::error::{NetworkError, NetworkResult};

/// Largest node count the default `u32` graph index can hold; its top value
/// is reserved by petgraph
pub const MAX_NODES: usize = u32::MAX as usize;

/// An undirected simple graph on the nodes `0..n`
#[derive(Debug, Clone, Default)]
pub struct Network {
    inner: UnGraph<usize, ()>,
}

impl Network {
    /// Create a network with `num_nodes` isolated nodes
    pub fn with_nodes(num_nodes: usize) -> Self {
        let mut inner = UnGraph::with_capacity(num_nodes, 0);
        for node in 0..num_nodes {
            inner.add_node(node);
        }
        Self { inner }
    }

    /// Create the complete graph on `num_nodes` nodes
    pub fn complete(num_nodes: usize) -> Self {
        let mut network = Self::with_nodes(num_nodes);
        for u in 0..num_nodes {
            for v in (u + 1)..num_nodes {
                network.insert_edge(u, v);
            }
        }
        network
    }

    /// Create a network from an explicit edge list
    ///
    /// Duplicate edges (in either orientation) collapse into one.
    pub fn from_edges(num_nodes: usize, edges: &[(usize, usize)]) -> NetworkResult<Self> {
        let mut network = Self::with_nodes(num_nodes);
        for &(u, v) in edges {
            network.add_edge(u, v)?;
        }
        Ok(network)
    }

    /// Maximum number of edges a simple undirected graph on `num_nodes` nodes can hold
    ///
    /// `None` when that count does not fit in a `usize`.
    pub fn max_edges(num_nodes: usize) -> Option<usize> {
        let (a, b) = (num_nodes, num_nodes.saturating_sub(1));
        // One of two consecutive integers is even; halve it before multiplying
        if a % 2 == 0 {
            (a / 2).checked_mul(b)
        } else {
            a.checked_mul(b / 2)
        }
    }

    /// Add an undirected edge, returning `false` if it was already present
    pub fn add_edge(&mut self, u: usize, v: usize) -> NetworkResult<bool> {
        let nodes = self.node_count();
        for node in [u, v] {
            if node >= nodes {
                return Err(NetworkError::NodeOutOfRange { node, nodes });
            }
        }
        if u == v {
            return Err(NetworkError::SelfLoop(u));
        }
        if self.has_edge(u, v) {
            return Ok(false);
        }
        self.insert_edge(u, v);
        Ok(true)
    }

    // Caller guarantees distinct, in-range, absent endpoints.
    fn insert_edge(&mut self, u: usize, v: usize) {
        self.inner
            .add_edge(NodeIndex::new(u), NodeIndex::new(v), ());
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.inner
            .find_edge(NodeIndex::new(u), NodeIndex::new(v))
            .is_some()
    }

    /// Number of edges incident to `node`
    pub fn degree(&self, node: usize) -> usize {
        self.inner.neighbors(NodeIndex::new(node)).count()
    }

    /// Nodes adjacent to `node`
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.inner
            .neighbors(NodeIndex::new(node))
            .map(|idx| idx.index())
    }

    /// All edges as `(low, high)` node pairs, in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.inner.edge_references().map(|edge| {
            let (a, b) = (edge.source().index(), edge.target().index());
            (a.min(b), a.max(b))
        })
    }

    /// Access the underlying petgraph graph (for library algorithms)
    pub fn inner(&self) -> &UnGraph<usize, ()> {
        &self.inner
    }

    /// Dense adjacency matrix of this network
    pub fn adjacency_matrix(&self) -> AdjacencyMatrix {
        let mut matrix = AdjacencyMatrix::zeros(self.node_count());
        for (u, v) in self.edges() {
            matrix.set(u, v);
            matrix.set(v, u);
        }
        matrix
    }
}

/// Generate a uniform random network with exactly `num_edges` edges
///
/// Repeatedly draws a random node pair and keeps it when it is a new,
/// non-loop edge. Requesting every possible edge yields the complete graph
/// directly; requesting more is an error.
pub fn generate_random_network<R: Rng + ?Sized>(
    num_nodes: usize,
    num_edges: usize,
    rng: &mut R,
) -> NetworkResult<(Network, AdjacencyMatrix)> {
    if num_nodes > MAX_NODES {
        return Err(NetworkError::TooManyNodes {
            requested: num_nodes,
            max: MAX_NODES,
        });
    }

    // An unrepresentable maximum exceeds every possible request
    let max = Network::max_edges(num_nodes);
    if let Some(max) = max.filter(|&max| num_edges > max) {
        return Err(NetworkError::TooManyEdges {
            requested: num_edges,
            nodes: num_nodes,
            max,
        });
    }

    let network = if max == Some(num_edges) {
        Network::complete(num_nodes)
    } else {
        // num_edges < max implies at least two nodes
        let mut network = Network::with_nodes(num_nodes);
        while network.edge_count() < num_edges {
            let u = rng.random_range(0..num_nodes);
            let v = rng.random_range(0..num_nodes);
            if u != v && !network.has_edge(u, v) {
                network.insert_edge(u, v);
            }
        }
        network
    };

    let adjacency = network.adjacency_matrix();
    Ok((network, adjacency))
}

/// Dense, row-major binary adjacency matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    size: usize,
    cells: Vec<u8>,
}

impl AdjacencyMatrix {
    fn zeros(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    fn set(&mut self, row: usize, col: usize) {
        self.cells[row * self.size + col] = 1;
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.size + col]
    }

    /// Iterate over rows as slices
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks(0) panics, and an empty matrix has no rows anyway
        self.cells.chunks(self.size.max(1))
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|r| (0..r).all(|c| self.get(r, c) == self.get(c, r)))
    }

    pub fn has_zero_diagonal(&self) -> bool {
        (0..self.size).all(|i| self.get(i, i) == 0)
    }
}

/// Renders in the bracketed NumPy matrix layout:
///
/// ```text
/// [[0 1]
///  [1 0]]
/// ```
impl fmt::Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.size == 0 {
            return write!(f, "[]");
        }
        write!(f, "[")?;
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                write!(f, "\n ")?;
            }
            write!(f, "[")?;
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{cell}")?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generates_exact_node_and_edge_counts() {
        let mut rng = StdRng::seed_from_u64(1);
        for (n, e) in [(0, 0), (1, 0), (2, 1), (10, 10), (10, 44), (10, 45), (100, 200)] {
            let (network, adjacency) = generate_random_network(n, e, &mut rng).unwrap();
            assert_eq!(network.node_count(), n);
            assert_eq!(network.edge_count(), e, "n={n}, e={e}");
            assert_eq!(adjacency.size(), n);
        }
    }

    #[test]
    fn adjacency_is_symmetric_with_zero_diagonal() {
        let mut rng = StdRng::seed_from_u64(42);
        let (network, adjacency) = generate_random_network(30, 120, &mut rng).unwrap();

        assert!(adjacency.is_symmetric());
        assert!(adjacency.has_zero_diagonal());

        let ones: usize = adjacency.rows().flatten().map(|&c| c as usize).sum();
        assert_eq!(ones, 2 * network.edge_count());
    }

    #[test]
    fn degree_sum_is_twice_edge_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let (network, _) = generate_random_network(25, 60, &mut rng).unwrap();

        let total: usize = (0..network.node_count()).map(|n| network.degree(n)).sum();
        assert_eq!(total, 2 * network.edge_count());
    }

    #[test]
    fn too_many_edges_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = generate_random_network(4, 7, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::TooManyEdges {
                requested: 7,
                nodes: 4,
                max: 6
            }
        ));
    }

    #[test]
    fn max_edges_does_not_overflow() {
        assert_eq!(Network::max_edges(0), Some(0));
        assert_eq!(Network::max_edges(1), Some(0));
        assert_eq!(Network::max_edges(10), Some(45));
        assert_eq!(Network::max_edges(11), Some(55));
        assert_eq!(Network::max_edges(usize::MAX), None);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn oversized_node_count_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = generate_random_network(usize::MAX, 1, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::TooManyNodes {
                requested: usize::MAX,
                max: MAX_NODES
            }
        ));
    }

    #[test]
    fn maximum_edge_count_gives_complete_graph() {
        let mut rng = StdRng::seed_from_u64(0);
        let (network, _) = generate_random_network(5, 10, &mut rng).unwrap();
        for u in 0..5 {
            assert_eq!(network.degree(u), 4);
        }
    }

    #[test]
    fn same_seed_same_network() {
        let (a, _) = generate_random_network(20, 40, &mut StdRng::seed_from_u64(99)).unwrap();
        let (b, _) = generate_random_network(20, 40, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a.edges().collect::<Vec<_>>(), b.edges().collect::<Vec<_>>());
    }

    #[test]
    fn add_edge_rejects_loops_and_out_of_range() {
        let mut network = Network::with_nodes(3);
        assert!(network.add_edge(0, 1).unwrap());
        assert!(!network.add_edge(1, 0).unwrap());
        assert!(matches!(network.add_edge(2, 2), Err(NetworkError::SelfLoop(2))));
        assert!(matches!(
            network.add_edge(0, 3),
            Err(NetworkError::NodeOutOfRange { node: 3, nodes: 3 })
        ));
        assert_eq!(network.edge_count(), 1);
    }

    #[test]
    fn edges_are_normalized_low_high() {
        let network = Network::from_edges(4, &[(3, 1), (2, 0)]).unwrap();
        assert_eq!(network.edges().collect::<Vec<_>>(), vec![(1, 3), (0, 2)]);
    }

    #[test]
    fn matrix_display_matches_numpy_layout() {
        let network = Network::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        assert_eq!(
            network.adjacency_matrix().to_string(),
            "[[0 1 0]\n [1 0 1]\n [0 1 0]]"
        );
        assert_eq!(Network::with_nodes(0).adjacency_matrix().to_string(), "[]");
    }
}
