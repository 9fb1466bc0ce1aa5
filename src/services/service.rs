//! Uniform service records.

use serde::{Deserialize, Serialize};

use crate::distance::ShortestPaths;
use crate::models::VertexId;

/// Which kind of required element a service stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    /// A required vertex; `from == to`.
    Vertex,
    /// A required undirected edge; enterable from either endpoint.
    Edge,
    /// A required arc; entered at `from`, left at `to`.
    Arc,
}

/// A required element with its demand and service cost.
///
/// # Examples
///
/// ```
/// use u_arc_routing::services::{Service, ServiceKind};
///
/// let s = Service::new(1, ServiceKind::Edge, 4, 7, 3, 2.5);
/// assert_eq!(s.endpoints(), (4, 7));
/// assert_eq!(s.kind(), ServiceKind::Edge);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Service {
    id: usize,
    kind: ServiceKind,
    from: VertexId,
    to: VertexId,
    demand: u32,
    cost: f64,
}

/// How a vehicle standing at some vertex would perform a service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Approach {
    /// Vertex where service starts.
    pub entry: VertexId,
    /// Vertex where the vehicle stands afterwards.
    pub exit: VertexId,
    /// Shortest-path travel cost from the current position to `entry`.
    pub travel: f64,
}

impl Service {
    /// Creates a service record.
    pub fn new(
        id: usize,
        kind: ServiceKind,
        from: VertexId,
        to: VertexId,
        demand: u32,
        cost: f64,
    ) -> Self {
        Self {
            id,
            kind,
            from,
            to,
            demand,
            cost,
        }
    }

    /// Registry ID (1-based).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Element kind.
    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    /// `(from, to)` as recorded in the instance.
    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.from, self.to)
    }

    /// Demand collected.
    pub fn demand(&self) -> u32 {
        self.demand
    }

    /// Service cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Resolves entry and exit points from `position`.
    ///
    /// Edges are entered at whichever endpoint is nearer (ties go to `from`)
    /// and left at the opposite one. The choice is never cached: it depends
    /// on where the vehicle stands. Returns `None` if the entry cannot be
    /// reached.
    pub fn approach(&self, position: VertexId, paths: &ShortestPaths) -> Option<Approach> {
        let approach = match self.kind {
            ServiceKind::Vertex | ServiceKind::Arc => Approach {
                entry: self.from,
                exit: self.to,
                travel: paths.distance(position, self.from),
            },
            ServiceKind::Edge => {
                let via_from = paths.distance(position, self.from);
                let via_to = paths.distance(position, self.to);
                if via_to < via_from {
                    Approach {
                        entry: self.to,
                        exit: self.from,
                        travel: via_to,
                    }
                } else {
                    Approach {
                        entry: self.from,
                        exit: self.to,
                        travel: via_from,
                    }
                }
            }
        };
        approach.travel.is_finite().then_some(approach)
    }

    /// Possible `(entry, exit)` orientations.
    pub fn orientations(&self) -> impl Iterator<Item = (VertexId, VertexId)> {
        let reverse = (self.kind == ServiceKind::Edge && self.from != self.to)
            .then_some((self.to, self.from));
        std::iter::once((self.from, self.to)).chain(reverse)
    }
}
