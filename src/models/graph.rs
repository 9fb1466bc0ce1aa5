//! Mixed graph of vertices, undirected edges and directed arcs.

use serde::{Deserialize, Serialize};

/// External vertex label as it appears in the instance.
pub type VertexId = usize;

/// An undirected link traversable in either direction at the same cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// First endpoint.
    pub u: VertexId,
    /// Second endpoint.
    pub v: VertexId,
    /// Travel cost.
    pub cost: f64,
}

/// A directed link traversable only from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    /// Tail vertex.
    pub from: VertexId,
    /// Head vertex.
    pub to: VertexId,
    /// Travel cost.
    pub cost: f64,
}

/// The traversable network of an instance.
///
/// Holds every link a vehicle may drive over, required or not. Vertices are
/// kept sorted and deduplicated; links keep insertion order, which fixes
/// the order in which shortest-path relaxation sees them.
///
/// # Examples
///
/// ```
/// use u_arc_routing::models::Graph;
///
/// let mut g = Graph::new();
/// g.add_edge(1, 2, 3.0);
/// g.add_arc(3, 1, 5.0);
/// assert_eq!(g.vertices(), &[1, 2, 3]);
/// assert_eq!(g.num_edges(), 1);
/// assert_eq!(g.num_arcs(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    vertices: Vec<VertexId>,
    edges: Vec<Edge>,
    arcs: Vec<Arc>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an isolated vertex (no-op if already present).
    pub fn add_vertex(&mut self, v: VertexId) {
        if let Err(pos) = self.vertices.binary_search(&v) {
            self.vertices.insert(pos, v);
        }
    }

    /// Adds an undirected edge, registering both endpoints.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, cost: f64) {
        self.add_vertex(u);
        self.add_vertex(v);
        self.edges.push(Edge { u, v, cost });
    }

    /// Adds a directed arc, registering both endpoints.
    pub fn add_arc(&mut self, from: VertexId, to: VertexId, cost: f64) {
        self.add_vertex(from);
        self.add_vertex(to);
        self.arcs.push(Arc { from, to, cost });
    }

    /// Sorted vertex labels.
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Undirected edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Directed arcs in insertion order.
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// Returns `true` if `v` belongs to the graph.
    pub fn contains(&self, v: VertexId) -> bool {
        self.vertices.binary_search(&v).is_ok()
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of undirected edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of directed arcs.
    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }
}
