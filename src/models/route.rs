//! Route and visit types.

use serde::{Deserialize, Serialize};

use super::graph::VertexId;

/// A resolved stop within a route: which service, and which way round it
/// was traversed.
///
/// Produced by [`RouteEvaluator::visits`](crate::evaluation::RouteEvaluator::visits)
/// for output formatting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    /// Service ID being visited.
    pub service_id: usize,
    /// Vertex where service starts.
    pub entry: VertexId,
    /// Vertex where service ends.
    pub exit: VertexId,
    /// Cumulative demand after this visit.
    pub load_after: u64,
}

/// An ordered sequence of services assigned to a single vehicle.
///
/// A route starts and ends at the depot (not stored in `services`). The
/// cached `demand` and `cost` are kept current by whoever mutates the
/// sequence (construction, local-search moves).
///
/// # Examples
///
/// ```
/// use u_arc_routing::models::Route;
///
/// let route = Route::new(1);
/// assert!(route.is_empty());
/// assert_eq!(route.id(), 1);
/// assert_eq!(route.cost(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    id: usize,
    services: Vec<usize>,
    demand: u64,
    cost: f64,
}

impl Route {
    /// Creates an empty route.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            services: Vec::new(),
            demand: 0,
            cost: 0.0,
        }
    }

    pub(crate) fn from_parts(id: usize, services: Vec<usize>, demand: u64, cost: f64) -> Self {
        Self {
            id,
            services,
            demand,
            cost,
        }
    }

    /// Route ID (1-based within a finalized solution).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Service IDs in visit order.
    pub fn services(&self) -> &[usize] {
        &self.services
    }

    /// Number of services on this route.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns `true` if this route serves nothing.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Cumulative demand served. Wider than a single demand so sums never wrap.
    pub fn demand(&self) -> u64 {
        self.demand
    }

    /// Total travel plus service cost, depot to depot.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub(crate) fn set_id(&mut self, id: usize) {
        self.id = id;
    }

    pub(crate) fn services_mut(&mut self) -> &mut Vec<usize> {
        &mut self.services
    }

    pub(crate) fn set_totals(&mut self, demand: u64, cost: f64) {
        self.demand = demand;
        self.cost = cost;
    }
}
