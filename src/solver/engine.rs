//! Solve pipeline: shortest paths, services, construction, improvement.

use std::time::Instant;

use tracing::info;

use super::config::{Improvement, SolverConfig};
use crate::constructive::nearest_neighbor;
use crate::distance::ShortestPaths;
use crate::error::CarpResult;
use crate::evaluation::RouteEvaluator;
use crate::local_search::local_search;
use crate::metaheuristic::AnnealingRunner;
use crate::models::{Instance, Route, Solution, VertexId};
use crate::services::ServiceRegistry;

/// Solves one CARP instance.
///
/// Shortest paths and the service registry are computed once in
/// [`Solver::new`] and shared read-only by every later phase.
///
/// # Examples
///
/// ```
/// use u_arc_routing::models::InstanceBuilder;
/// use u_arc_routing::solver::{Solver, SolverConfig};
/// use u_arc_routing::metaheuristic::AnnealingConfig;
///
/// let inst = InstanceBuilder::new(1, 10)
///     .with_required_edge(1, 2, 3.0, 4, 3.0)
///     .with_required_edge(2, 3, 2.0, 4, 2.0)
///     .with_required_arc(3, 1, 5.0, 2, 5.0)
///     .build()
///     .unwrap();
///
/// let config = SolverConfig::default().with_annealing(AnnealingConfig::default().with_seed(42));
/// let solution = Solver::new(&inst, config).unwrap().solve().unwrap();
/// assert_eq!(solution.num_routes(), 1);
/// assert_eq!(solution.total_demand(), 10);
/// assert!((solution.total_cost() - 10.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    name: String,
    depot: VertexId,
    capacity: u32,
    config: SolverConfig,
    paths: ShortestPaths,
    registry: ServiceRegistry,
}

impl Solver {
    /// Prepares a solver for `instance`.
    ///
    /// # Errors
    ///
    /// [`CarpError::InvalidConfig`](crate::error::CarpError::InvalidConfig)
    /// if a phase that will run has out-of-range parameters.
    pub fn new(instance: &Instance, config: SolverConfig) -> CarpResult<Self> {
        config.validate()?;
        let paths = ShortestPaths::compute(instance.graph());
        let registry = ServiceRegistry::build(instance, config.vertex_services);
        Ok(Self {
            name: instance.name().to_string(),
            depot: instance.depot(),
            capacity: instance.capacity(),
            config,
            paths,
            registry,
        })
    }

    /// All-pairs shortest paths of the instance graph.
    pub fn paths(&self) -> &ShortestPaths {
        &self.paths
    }

    /// Services to be routed.
    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Evaluator over this solver's shared state.
    pub fn evaluator(&self) -> RouteEvaluator<'_> {
        RouteEvaluator::new(&self.registry, &self.paths, self.depot, self.capacity)
    }

    /// Runs only the greedy construction.
    ///
    /// # Errors
    ///
    /// See [`nearest_neighbor`].
    pub fn construct(&self) -> CarpResult<Solution> {
        nearest_neighbor(&self.evaluator())
    }

    /// Runs the full pipeline and returns the finalized solution.
    ///
    /// Feasibility guards run before any route is built, so an error never
    /// comes with a partial solution. Empty routes are dropped and route IDs
    /// renumbered `1..=k`. [`Solution::elapsed`] covers construction and
    /// improvement.
    ///
    /// # Errors
    ///
    /// - [`CarpError::InfeasibleDemand`](crate::error::CarpError::InfeasibleDemand)
    ///   if one service exceeds the vehicle capacity.
    /// - [`CarpError::UnreachableService`](crate::error::CarpError::UnreachableService)
    ///   if a service cannot be served on a depot round trip.
    pub fn solve(&self) -> CarpResult<Solution> {
        info!(
            instance = %self.name,
            services = self.registry.len(),
            vertices = self.paths.num_vertices(),
            capacity = self.capacity,
            improvement = ?self.config.improvement,
            "solving"
        );

        let start = Instant::now();
        let eval = self.evaluator();
        let initial = nearest_neighbor(&eval)?;
        let initial_cost = initial.total_cost();
        let routes = self.improve(initial.into_routes(), &eval)?;
        let solution = Solution::from_routes(routes)
            .with_elapsed(start.elapsed())
            .finalize();

        info!(
            routes = solution.num_routes(),
            initial_cost,
            cost = solution.total_cost(),
            elapsed = ?solution.elapsed(),
            "solved"
        );
        Ok(solution)
    }

    fn improve(
        &self,
        mut routes: Vec<Route>,
        eval: &RouteEvaluator<'_>,
    ) -> CarpResult<Vec<Route>> {
        match self.config.improvement {
            Improvement::None => {}
            Improvement::LocalSearch => {
                local_search(&mut routes, eval, &self.config.local_search);
            }
            Improvement::Annealing => {
                routes = AnnealingRunner::run(routes, eval, &self.config.annealing)?.best;
            }
            Improvement::Both => {
                routes = AnnealingRunner::run(routes, eval, &self.config.annealing)?.best;
                local_search(&mut routes, eval, &self.config.local_search);
            }
        }
        Ok(routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CarpError;
    use crate::metaheuristic::{AnnealingConfig, MoveSelection};
    use crate::models::InstanceBuilder;

    fn seeded(improvement: Improvement) -> SolverConfig {
        SolverConfig::default().with_improvement(improvement).with_annealing(
            AnnealingConfig::default()
                .with_initial_temperature(10.0)
                .with_cooling_rate(0.8)
                .with_iterations_per_temperature(30)
                .with_seed(17),
        )
    }

    fn example_a() -> Instance {
        InstanceBuilder::new(1, 10)
            .with_name("example-a")
            .with_required_edge(1, 2, 3.0, 4, 3.0)
            .with_required_edge(2, 3, 2.0, 4, 2.0)
            .with_required_arc(3, 1, 5.0, 2, 5.0)
            .build()
            .expect("valid")
    }

    /// Services on both sides of depot 3; the arc 6 -> 3 is only entered
    /// through the non-required edge 5-6.
    fn two_sides() -> Instance {
        InstanceBuilder::new(3, 3)
            .with_edge(1, 2, 1.0)
            .with_edge(2, 3, 1.0)
            .with_edge(3, 4, 1.0)
            .with_edge(4, 5, 1.0)
            .with_edge(5, 6, 2.0)
            .with_required_vertex(1, 1, 0.5)
            .with_required_vertex(5, 1, 0.5)
            .with_required_edge(1, 2, 1.0, 1, 1.0)
            .with_required_edge(4, 5, 1.0, 1, 1.0)
            .with_required_arc(6, 3, 4.0, 2, 4.0)
            .build()
            .expect("valid")
    }

    #[test]
    fn test_example_a_single_route() {
        for improvement in [
            Improvement::None,
            Improvement::LocalSearch,
            Improvement::Annealing,
            Improvement::Both,
        ] {
            let solver = Solver::new(&example_a(), seeded(improvement)).expect("valid config");
            let sol = solver.solve().expect("feasible");
            assert_eq!(sol.num_routes(), 1, "{improvement:?}");
            let route = &sol.routes()[0];
            assert_eq!(route.id(), 1);
            assert_eq!(route.services(), &[1, 2, 3]);
            assert_eq!(route.demand(), 10);
            // 3 + 2 + 5 of service, no deadheading, arc ends at the depot
            assert!((sol.total_cost() - 10.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_example_b_disconnected_vertex() {
        let inst = InstanceBuilder::new(1, 10)
            .with_required_edge(1, 2, 1.0, 2, 1.0)
            .with_vertex(8)
            .with_required_vertex(8, 1, 1.0)
            .build()
            .expect("valid");
        let solver = Solver::new(&inst, SolverConfig::default()).expect("valid config");
        let err = solver.solve().unwrap_err();
        assert_eq!(err, CarpError::UnreachableService { service_id: 1 });
    }

    #[test]
    fn test_example_c_oversized_demand() {
        let inst = InstanceBuilder::new(1, 5)
            .with_edge(1, 2, 1.0)
            .with_required_vertex(2, 9, 1.0)
            .build()
            .expect("valid");
        let solver = Solver::new(&inst, SolverConfig::default()).expect("valid config");
        assert_eq!(
            solver.solve().unwrap_err(),
            CarpError::InfeasibleDemand {
                service_id: 1,
                demand: 9,
                capacity: 5,
            }
        );
        assert!(solver.construct().is_err());
    }

    #[test]
    fn test_invalid_config_rejected_up_front() {
        let config = SolverConfig::default()
            .with_annealing(AnnealingConfig::default().with_min_temperature(500.0));
        let err = Solver::new(&example_a(), config).unwrap_err();
        assert!(matches!(err, CarpError::InvalidConfig(_)));
    }

    #[test]
    fn test_every_mode_is_valid_and_no_worse() {
        let inst = two_sides();
        let base = Solver::new(&inst, seeded(Improvement::None))
            .expect("valid config")
            .solve()
            .expect("feasible");
        assert_eq!(base.num_served(), 5);

        for improvement in [
            Improvement::LocalSearch,
            Improvement::Annealing,
            Improvement::Both,
        ] {
            let solver = Solver::new(&inst, seeded(improvement)).expect("valid config");
            let sol = solver.solve().expect("feasible");
            assert!(solver.evaluator().validate(&sol).is_empty(), "{improvement:?}");
            assert!(sol.total_cost() <= base.total_cost() + 1e-10, "{improvement:?}");
            for (i, route) in sol.routes().iter().enumerate() {
                assert_eq!(route.id(), i + 1);
                assert!(!route.is_empty());
            }
        }
    }

    #[test]
    fn test_random_neighbor_mode() {
        let mut config = seeded(Improvement::Annealing);
        config.annealing.move_selection = MoveSelection::RandomNeighbor;
        let inst = two_sides();
        let solver = Solver::new(&inst, config).expect("valid config");
        let a = solver.solve().expect("feasible");
        let b = solver.solve().expect("feasible");
        assert!(solver.evaluator().validate(&a).is_empty());
        assert_eq!(a.routes(), b.routes());
    }

    #[test]
    fn test_unit_vertex_policy() {
        let inst = two_sides();
        let config = seeded(Improvement::None)
            .with_vertex_services(crate::services::VertexServicePolicy::Unit);
        let solver = Solver::new(&inst, config).expect("valid config");
        assert_eq!(solver.registry().total_demand(), 1 + 1 + 1 + 1 + 2);
        let sol = solver.solve().expect("feasible");
        assert_eq!(sol.total_demand(), 6);
    }

    #[test]
    fn test_solution_serializes() {
        let solver = Solver::new(&example_a(), seeded(Improvement::None)).expect("valid config");
        let sol = solver.solve().expect("feasible");
        let json = serde_json::to_value(&sol).expect("serialize");
        assert_eq!(json["routes"].as_array().map(Vec::len), Some(1));
        assert_eq!(json["routes"][0]["services"], serde_json::json!([1, 2, 3]));
        assert!(json.get("elapsed").is_some());
        let back: Solution = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back.routes(), sol.routes());
        assert_eq!(back.elapsed(), sol.elapsed());
    }

    #[test]
    fn test_solve_records_elapsed() {
        let solver = Solver::new(&two_sides(), seeded(Improvement::Both)).expect("valid config");
        let sol = solver.solve().expect("feasible");
        assert!(sol.elapsed() > std::time::Duration::ZERO);
        assert_eq!(solver.construct().expect("feasible").elapsed(), std::time::Duration::ZERO);
    }

    #[test]
    fn test_capacity_near_u32_max() {
        let inst = InstanceBuilder::new(1, u32::MAX)
            .with_edge(1, 2, 1.0)
            .with_edge(2, 3, 1.0)
            .with_required_vertex(2, 3_000_000_000, 0.0)
            .with_required_vertex(3, 3_000_000_000, 0.0)
            .build()
            .expect("valid");
        for improvement in [Improvement::LocalSearch, Improvement::Both] {
            let solver = Solver::new(&inst, seeded(improvement)).expect("valid config");
            let sol = solver.solve().expect("each demand fits alone");
            assert_eq!(sol.num_routes(), 2, "{improvement:?}");
            assert!(solver.evaluator().validate(&sol).is_empty(), "{improvement:?}");
            assert!(sol.routes().iter().all(|r| r.demand() == 3_000_000_000));
            assert_eq!(sol.total_demand(), 6_000_000_000);
        }
    }

    #[test]
    fn test_empty_instance() {
        let inst = InstanceBuilder::new(1, 10).build().expect("valid");
        let sol = Solver::new(&inst, SolverConfig::default())
            .expect("valid config")
            .solve()
            .expect("feasible");
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(sol.total_cost(), 0.0);
    }
}
