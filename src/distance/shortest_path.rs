//! All-pairs shortest paths over a mixed graph.
//!
//! # Algorithm
//!
//! Floyd-Warshall. Every undirected edge seeds two directed relaxations of
//! equal weight, every arc seeds one. Relaxation uses a strict `<`, so among
//! equal-cost alternatives the first one found is kept: links in insertion
//! order (edges before arcs), then intermediate vertices in ascending label
//! order.
//!
//! Paths are recovered from a predecessor table: `pred[i][j]` is the vertex
//! immediately before `j` on the shortest `i → j` path. Each step of the
//! backward walk is an O(1) lookup.
//!
//! # Complexity
//!
//! O(V³) time, O(V²) space.
//!
//! # Reference
//!
//! Floyd, R.W. (1962). "Algorithm 97: Shortest Path", *Communications of
//! the ACM* 5(6), 345.

use rustc_hash::FxHashMap;

use super::DistanceMatrix;
use crate::models::{Graph, VertexId};

/// Distance and predecessor tables for every vertex pair.
///
/// Built once per instance and read-only afterwards.
///
/// # Examples
///
/// ```
/// use u_arc_routing::models::Graph;
/// use u_arc_routing::distance::ShortestPaths;
///
/// let mut g = Graph::new();
/// g.add_edge(1, 2, 3.0);
/// g.add_edge(2, 3, 2.0);
/// g.add_arc(3, 1, 5.0);
///
/// let sp = ShortestPaths::compute(&g);
/// assert_eq!(sp.distance(1, 3), 5.0);
/// assert_eq!(sp.path(1, 3), Some(vec![1, 2, 3]));
/// assert_eq!(sp.path(3, 1), Some(vec![3, 1]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    labels: Vec<VertexId>,
    index: FxHashMap<VertexId, usize>,
    dist: DistanceMatrix,
    pred: Vec<Option<usize>>,
}

impl ShortestPaths {
    /// Runs Floyd-Warshall on the graph.
    pub fn compute(graph: &Graph) -> Self {
        let labels = graph.vertices().to_vec();
        let n = labels.len();
        let index: FxHashMap<VertexId, usize> =
            labels.iter().enumerate().map(|(i, &v)| (v, i)).collect();

        let mut sp = Self {
            labels,
            index,
            dist: DistanceMatrix::disconnected(n),
            pred: vec![None; n * n],
        };

        for e in graph.edges() {
            let (i, j) = (sp.index[&e.u], sp.index[&e.v]);
            sp.seed(i, j, e.cost);
            sp.seed(j, i, e.cost);
        }
        for a in graph.arcs() {
            let (i, j) = (sp.index[&a.from], sp.index[&a.to]);
            sp.seed(i, j, a.cost);
        }

        for k in 0..n {
            for i in 0..n {
                let d_ik = sp.dist.get(i, k);
                if d_ik.is_infinite() {
                    continue;
                }
                for j in 0..n {
                    let through = d_ik + sp.dist.get(k, j);
                    if through < sp.dist.get(i, j) {
                        sp.dist.set(i, j, through);
                        sp.pred[i * n + j] = sp.pred[k * n + j];
                    }
                }
            }
        }

        sp
    }

    /// Direct link relaxation. Self-loops never beat d(v, v) = 0.
    fn seed(&mut self, i: usize, j: usize, cost: f64) {
        if i != j && cost < self.dist.get(i, j) {
            self.dist.set(i, j, cost);
            self.pred[i * self.labels.len() + j] = Some(i);
        }
    }

    /// Shortest travel cost from `from` to `to`.
    ///
    /// `f64::INFINITY` if no path exists or either vertex is unknown.
    pub fn distance(&self, from: VertexId, to: VertexId) -> f64 {
        match (self.index.get(&from), self.index.get(&to)) {
            (Some(&i), Some(&j)) => self.dist.get(i, j),
            _ => f64::INFINITY,
        }
    }

    /// Returns `true` if `to` can be reached from `from`.
    pub fn is_reachable(&self, from: VertexId, to: VertexId) -> bool {
        self.distance(from, to).is_finite()
    }

    /// The vertex immediately before `to` on the shortest `from → to` path.
    ///
    /// `None` when `from == to`, when no path exists, or for unknown vertices.
    pub fn predecessor(&self, from: VertexId, to: VertexId) -> Option<VertexId> {
        let i = *self.index.get(&from)?;
        let j = *self.index.get(&to)?;
        self.pred[i * self.labels.len() + j].map(|p| self.labels[p])
    }

    /// Reconstructs the vertex sequence of the shortest `from → to` path,
    /// both ends included.
    ///
    /// Returns `None` if `to` is unreachable from `from`.
    pub fn path(&self, from: VertexId, to: VertexId) -> Option<Vec<VertexId>> {
        let i = *self.index.get(&from)?;
        let j = *self.index.get(&to)?;
        if i == j {
            return Some(vec![from]);
        }
        if self.dist.get(i, j).is_infinite() {
            return None;
        }

        let n = self.labels.len();
        let mut walk = vec![self.labels[j]];
        let mut cur = j;
        while cur != i {
            cur = self.pred[i * n + cur]?;
            walk.push(self.labels[cur]);
            if walk.len() > n {
                return None;
            }
        }
        walk.reverse();
        Some(walk)
    }

    /// Number of vertices covered by the tables.
    pub fn num_vertices(&self) -> usize {
        self.labels.len()
    }

    /// Vertex labels in dense-index order.
    pub fn vertices(&self) -> &[VertexId] {
        &self.labels
    }
}
