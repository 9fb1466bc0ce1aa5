//! Solution and violation types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Route;

/// A type of constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Vehicle capacity exceeded.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load that exceeded capacity.
        load: u64,
        /// Vehicle capacity.
        capacity: u32,
    },
    /// A registered service is served by no route.
    ServiceMissing {
        /// Service ID.
        service_id: usize,
    },
    /// A service is served more than once.
    ServiceDuplicated {
        /// Service ID.
        service_id: usize,
        /// How many times it appears.
        count: usize,
    },
    /// A route references an ID that is not in the registry.
    UnknownService {
        /// Route index in the solution.
        route_index: usize,
        /// Offending ID.
        service_id: usize,
    },
    /// Cached route cost disagrees with a fresh replay.
    CostMismatch {
        /// Route index in the solution.
        route_index: usize,
        /// Cached cost.
        cached: f64,
        /// Replayed cost.
        actual: f64,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A complete solution: every route plus the grand total.
///
/// # Examples
///
/// ```
/// use u_arc_routing::models::{Solution, Route};
///
/// let sol = Solution::from_routes(vec![Route::new(1)]);
/// assert_eq!(sol.num_routes(), 1);
/// assert_eq!(sol.total_cost(), 0.0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<Route>,
    total_cost: f64,
    #[serde(default)]
    elapsed: Duration,
}

impl Solution {
    /// Wraps routes, summing their costs.
    pub fn from_routes(routes: Vec<Route>) -> Self {
        let total_cost = routes.iter().map(|r| r.cost()).sum();
        Self {
            routes,
            total_cost,
            elapsed: Duration::ZERO,
        }
    }

    pub(crate) fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// Drops empty routes and renumbers the rest `1..=k`.
    pub fn finalize(mut self) -> Self {
        self.routes.retain(|r| !r.is_empty());
        for (i, route) in self.routes.iter_mut().enumerate() {
            route.set_id(i + 1);
        }
        self.total_cost = self.routes.iter().map(|r| r.cost()).sum();
        self
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Consumes the solution, returning its routes.
    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }

    /// Number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total cost over all routes.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Total demand served over all routes.
    pub fn total_demand(&self) -> u64 {
        self.routes.iter().map(|r| r.demand()).sum()
    }

    /// Wall-clock time spent constructing and improving the routes.
    ///
    /// Zero unless the solution came out of
    /// [`Solver::solve`](crate::solver::Solver::solve).
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of services served.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_empty() {
        let sol = Solution::default();
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(sol.total_cost(), 0.0);
        assert_eq!(sol.num_served(), 0);
        assert_eq!(sol.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_solution_totals() {
        let sol = Solution::from_routes(vec![
            Route::from_parts(1, vec![1], 4, 10.0),
            Route::from_parts(2, vec![2, 3], 6, 20.0),
        ]);
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.num_served(), 3);
        assert_eq!(sol.total_demand(), 10);
        assert!((sol.total_cost() - 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_finalize_drops_empty_and_renumbers() {
        let sol = Solution::from_routes(vec![
            Route::from_parts(1, vec![], 0, 0.0),
            Route::from_parts(2, vec![2], 3, 7.0),
            Route::from_parts(5, vec![1], 3, 5.0),
        ])
        .with_elapsed(Duration::from_millis(3))
        .finalize();
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.elapsed(), Duration::from_millis(3));
        let ids: Vec<_> = sol.routes().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!((sol.total_cost() - 12.0).abs() < 1e-10);
    }

    #[test]
    fn test_violation_types() {
        let v = Violation::new(ViolationType::CapacityExceeded {
            route_index: 0,
            load: 250,
            capacity: 200,
        });
        assert_eq!(
            v.kind,
            ViolationType::CapacityExceeded {
                route_index: 0,
                load: 250,
                capacity: 200,
            }
        );
    }
}
