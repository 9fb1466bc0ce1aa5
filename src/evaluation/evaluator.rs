//! Route evaluator that replays stop sequences through shortest paths.

use crate::distance::ShortestPaths;
use crate::models::{Route, Solution, VertexId, Violation, ViolationType, Visit};
use crate::services::ServiceRegistry;

/// Tolerance used when comparing replayed and cached costs.
const COST_TOLERANCE: f64 = 1e-6;

/// Evaluates service sequences: cumulative demand, depot-to-depot cost, and
/// feasibility of whole solutions.
///
/// Bundles the read-only state every construction and improvement step
/// needs. Costs are always replayed through shortest-path distances, since
/// the best way between two stops may cross non-required links.
///
/// # Examples
///
/// ```
/// use u_arc_routing::models::InstanceBuilder;
/// use u_arc_routing::distance::ShortestPaths;
/// use u_arc_routing::services::{ServiceRegistry, VertexServicePolicy};
/// use u_arc_routing::evaluation::RouteEvaluator;
///
/// let inst = InstanceBuilder::new(1, 10)
///     .with_required_edge(1, 2, 3.0, 4, 3.0)
///     .with_required_edge(2, 3, 2.0, 4, 2.0)
///     .with_required_arc(3, 1, 5.0, 2, 5.0)
///     .build()
///     .unwrap();
/// let paths = ShortestPaths::compute(inst.graph());
/// let registry = ServiceRegistry::build(&inst, VertexServicePolicy::FromInstance);
///
/// let eval = RouteEvaluator::new(&registry, &paths, inst.depot(), inst.capacity());
/// let route = eval.build_route(1, vec![1, 2, 3]);
/// assert_eq!(route.demand(), 10);
/// assert!((route.cost() - 10.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RouteEvaluator<'a> {
    registry: &'a ServiceRegistry,
    paths: &'a ShortestPaths,
    depot: VertexId,
    capacity: u32,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given problem data.
    pub fn new(
        registry: &'a ServiceRegistry,
        paths: &'a ShortestPaths,
        depot: VertexId,
        capacity: u32,
    ) -> Self {
        Self {
            registry,
            paths,
            depot,
            capacity,
        }
    }

    /// The service registry.
    pub fn registry(&self) -> &'a ServiceRegistry {
        self.registry
    }

    /// The shortest-path tables.
    pub fn paths(&self) -> &'a ShortestPaths {
        self.paths
    }

    /// Depot vertex.
    pub fn depot(&self) -> VertexId {
        self.depot
    }

    /// Vehicle capacity.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns `true` if a route carrying `demand` respects capacity.
    pub fn fits(&self, demand: u64) -> bool {
        demand <= u64::from(self.capacity)
    }

    /// Depot-to-depot cost of serving `ids` in order.
    ///
    /// Each leg is the shortest-path distance from the current position to
    /// the service's best entry point, plus the service cost; the position
    /// then moves to the exit point. `f64::INFINITY` if any leg is
    /// unreachable.
    pub fn sequence_cost<I>(&self, ids: I) -> f64
    where
        I: IntoIterator<Item = usize>,
    {
        let mut position = self.depot;
        let mut cost = 0.0;
        for id in ids {
            let service = self.registry.service(id);
            match service.approach(position, self.paths) {
                Some(a) => {
                    cost += a.travel + service.cost();
                    position = a.exit;
                }
                None => return f64::INFINITY,
            }
        }
        cost + self.paths.distance(position, self.depot)
    }

    /// Cumulative demand of `ids`.
    pub fn sequence_demand<I>(&self, ids: I) -> u64
    where
        I: IntoIterator<Item = usize>,
    {
        ids.into_iter()
            .map(|id| u64::from(self.registry.service(id).demand()))
            .sum()
    }

    /// Builds a route from a sequence of service IDs, computing demand and cost.
    pub fn build_route(&self, id: usize, services: Vec<usize>) -> Route {
        let demand = self.sequence_demand(services.iter().copied());
        let cost = self.sequence_cost(services.iter().copied());
        Route::from_parts(id, services, demand, cost)
    }

    /// Recomputes the cached demand and cost of a route after its sequence changed.
    pub fn refresh(&self, route: &mut Route) {
        let demand = self.sequence_demand(route.services().iter().copied());
        let cost = self.sequence_cost(route.services().iter().copied());
        route.set_totals(demand, cost);
    }

    /// Resolves the entry/exit orientation of every stop.
    ///
    /// Returns `None` if some stop is unreachable from its predecessor.
    pub fn visits(&self, route: &Route) -> Option<Vec<Visit>> {
        let mut position = self.depot;
        let mut load = 0u64;
        let mut visits = Vec::with_capacity(route.len());
        for &id in route.services() {
            let service = self.registry.get(id)?;
            let a = service.approach(position, self.paths)?;
            load += u64::from(service.demand());
            visits.push(Visit {
                service_id: id,
                entry: a.entry,
                exit: a.exit,
                load_after: load,
            });
            position = a.exit;
        }
        Some(visits)
    }

    /// Expands a route into the full vertex walk, depot to depot.
    ///
    /// Deadheading legs follow shortest paths; a serviced edge or arc
    /// contributes its exit vertex.
    pub fn walk(&self, route: &Route) -> Option<Vec<VertexId>> {
        let mut walk = vec![self.depot];
        let mut position = self.depot;
        for visit in self.visits(route)? {
            let leg = self.paths.path(position, visit.entry)?;
            walk.extend(leg.into_iter().skip(1));
            if visit.exit != visit.entry {
                walk.push(visit.exit);
            }
            position = visit.exit;
        }
        let back = self.paths.path(position, self.depot)?;
        walk.extend(back.into_iter().skip(1));
        Some(walk)
    }

    /// Checks a solution: every service exactly once, capacity respected on
    /// every route, and cached route costs matching a fresh replay.
    pub fn validate(&self, solution: &Solution) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut seen = vec![0usize; self.registry.len()];

        for (idx, route) in solution.routes().iter().enumerate() {
            for &id in route.services() {
                match id.checked_sub(1).and_then(|i| seen.get_mut(i)) {
                    Some(count) => *count += 1,
                    None => violations.push(Violation::new(ViolationType::UnknownService {
                        route_index: idx,
                        service_id: id,
                    })),
                }
            }
            if route.services().iter().any(|&id| self.registry.get(id).is_none()) {
                continue;
            }

            let load = self.sequence_demand(route.services().iter().copied());
            if !self.fits(load) {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    route_index: idx,
                    load,
                    capacity: self.capacity,
                }));
            }

            let actual = self.sequence_cost(route.services().iter().copied());
            let consistent = if actual.is_finite() {
                (actual - route.cost()).abs() <= COST_TOLERANCE
            } else {
                false
            };
            if !consistent {
                violations.push(Violation::new(ViolationType::CostMismatch {
                    route_index: idx,
                    cached: route.cost(),
                    actual,
                }));
            }
        }

        for (i, &count) in seen.iter().enumerate() {
            match count {
                0 => violations.push(Violation::new(ViolationType::ServiceMissing {
                    service_id: i + 1,
                })),
                1 => {}
                n => violations.push(Violation::new(ViolationType::ServiceDuplicated {
                    service_id: i + 1,
                    count: n,
                })),
            }
        }

        violations
    }
}
