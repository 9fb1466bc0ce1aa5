//! Nearest-feasible-service constructive heuristic.
//!
//! Builds routes greedily: starting from the depot, always serve the
//! unserved service with the cheapest `travel + service cost` that still
//! fits the remaining capacity. Edges are entered at whichever endpoint is
//! nearer to the current position. When nothing fits (or the vehicle is
//! full), return to the depot and start a new route.
//!
//! # Complexity
//!
//! O(n²) where n = number of services.

use tracing::debug;

use crate::error::{CarpError, CarpResult};
use crate::evaluation::RouteEvaluator;
use crate::models::Solution;

/// Constructs a CARP solution using the nearest-feasible heuristic.
///
/// Runs [`ServiceRegistry::check_feasibility`](crate::services::ServiceRegistry::check_feasibility)
/// first, so a service that could never be placed aborts the construction
/// instead of looping. Ties between equal candidates go to the lower
/// service ID.
///
/// # Errors
///
/// [`CarpError::InfeasibleDemand`] or [`CarpError::UnreachableService`]
/// from the up-front guards.
///
/// # Examples
///
/// ```
/// use u_arc_routing::models::InstanceBuilder;
/// use u_arc_routing::distance::ShortestPaths;
/// use u_arc_routing::services::{ServiceRegistry, VertexServicePolicy};
/// use u_arc_routing::evaluation::RouteEvaluator;
/// use u_arc_routing::constructive::nearest_neighbor;
///
/// let inst = InstanceBuilder::new(1, 10)
///     .with_required_edge(1, 2, 3.0, 4, 3.0)
///     .with_required_edge(2, 3, 2.0, 4, 2.0)
///     .with_required_arc(3, 1, 5.0, 2, 5.0)
///     .build()
///     .unwrap();
/// let paths = ShortestPaths::compute(inst.graph());
/// let registry = ServiceRegistry::build(&inst, VertexServicePolicy::FromInstance);
/// let eval = RouteEvaluator::new(&registry, &paths, inst.depot(), inst.capacity());
///
/// let solution = nearest_neighbor(&eval).unwrap();
/// assert_eq!(solution.num_routes(), 1);
/// assert_eq!(solution.routes()[0].services(), &[1, 2, 3]);
/// ```
pub fn nearest_neighbor(eval: &RouteEvaluator<'_>) -> CarpResult<Solution> {
    let registry = eval.registry();
    let paths = eval.paths();
    let depot = eval.depot();
    registry.check_feasibility(eval.capacity(), depot, paths)?;

    let mut unserved = vec![true; registry.len()];
    let mut remaining = registry.len();
    let mut routes = Vec::new();

    while remaining > 0 {
        let mut position = depot;
        let mut spare = eval.capacity();
        let mut sequence = Vec::new();

        loop {
            // (id, value, demand, exit)
            let mut best: Option<(usize, f64, u32, usize)> = None;
            for service in registry.iter() {
                if !unserved[service.id() - 1] || service.demand() > spare {
                    continue;
                }
                let Some(a) = service.approach(position, paths) else {
                    continue;
                };
                let value = a.travel + service.cost();
                if best.is_none_or(|b| value < b.1) {
                    best = Some((service.id(), value, service.demand(), a.exit));
                }
            }

            match best {
                Some((id, _, demand, exit)) => {
                    unserved[id - 1] = false;
                    remaining -= 1;
                    sequence.push(id);
                    spare -= demand;
                    position = exit;
                    if spare == 0 || remaining == 0 {
                        break;
                    }
                }
                None => break,
            }
        }

        if sequence.is_empty() {
            // unreachable after check_feasibility; never spin on an empty route
            let service_id = unserved.iter().position(|&u| u).map_or(0, |i| i + 1);
            return Err(CarpError::UnreachableService { service_id });
        }

        let route = eval.build_route(routes.len() + 1, sequence);
        debug!(
            route = route.id(),
            services = route.len(),
            demand = route.demand(),
            cost = route.cost(),
            "constructed route"
        );
        routes.push(route);
    }

    Ok(Solution::from_routes(routes))
}
