//! Annealing execution loop.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::config::{AnnealingConfig, MoveSelection};
use crate::error::CarpResult;
use crate::evaluation::RouteEvaluator;
use crate::local_search::{
    best_inter_relocate, best_intra_relocate, best_swap, best_two_opt, sample_inter_relocate,
    sample_intra_relocate, sample_swap, sample_two_opt, Candidate, Operator,
};
use crate::models::Route;

/// Result of an annealing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnealingResult {
    /// Best routes found. May contain empty routes.
    pub best: Vec<Route>,

    /// Total cost of `best`.
    pub best_cost: f64,

    /// Total cost of the starting routes.
    pub initial_cost: f64,

    /// Trials executed.
    pub iterations: usize,

    /// Trials whose move was committed.
    pub accepted_moves: usize,

    /// Committed trials that lowered the cost.
    pub improving_moves: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,
}

/// Executes the simulated annealing controller.
///
/// Each trial picks one of the four operators uniformly, then one route
/// (intra-route operators) or an ordered pair of distinct routes
/// (inter-route operators) uniformly, and asks the operator for a
/// candidate according to [`MoveSelection`]. Improving candidates are always
/// committed; others pass with probability `exp(-delta / T)`. The best total
/// seen after any trial is snapshotted and returned, so the result never
/// costs more than the input.
///
/// # Examples
///
/// ```
/// use u_arc_routing::models::InstanceBuilder;
/// use u_arc_routing::distance::ShortestPaths;
/// use u_arc_routing::services::{ServiceRegistry, VertexServicePolicy};
/// use u_arc_routing::evaluation::RouteEvaluator;
/// use u_arc_routing::metaheuristic::{AnnealingConfig, AnnealingRunner};
///
/// let inst = InstanceBuilder::new(1, 10)
///     .with_edge(1, 2, 1.0)
///     .with_edge(2, 3, 1.0)
///     .with_required_vertex(2, 1, 0.0)
///     .with_required_vertex(3, 1, 0.0)
///     .build()
///     .unwrap();
/// let paths = ShortestPaths::compute(inst.graph());
/// let registry = ServiceRegistry::build(&inst, VertexServicePolicy::FromInstance);
/// let eval = RouteEvaluator::new(&registry, &paths, inst.depot(), inst.capacity());
///
/// let routes = vec![eval.build_route(1, vec![1]), eval.build_route(2, vec![2])];
/// let config = AnnealingConfig::default().with_seed(7);
/// let result = AnnealingRunner::run(routes, &eval, &config).unwrap();
/// assert!(result.best_cost <= result.initial_cost);
/// ```
pub struct AnnealingRunner;

impl AnnealingRunner {
    /// Runs the annealing schedule starting from `routes`.
    ///
    /// # Errors
    ///
    /// [`CarpError::InvalidConfig`](crate::error::CarpError::InvalidConfig)
    /// if `config` does not validate.
    pub fn run(
        routes: Vec<Route>,
        eval: &RouteEvaluator<'_>,
        config: &AnnealingConfig,
    ) -> CarpResult<AnnealingResult> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        debug!(
            steps = config.temperature_steps(),
            per_step = config.iterations_per_temperature,
            selection = ?config.move_selection,
            "annealing"
        );

        let mut current = routes;
        let mut current_cost = total_cost(&current);
        let initial_cost = current_cost;
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;

        while temperature > config.min_temperature {
            for _ in 0..config.iterations_per_temperature {
                iterations += 1;
                let operator = Operator::ALL[rng.random_range(0..Operator::ALL.len())];

                let candidate =
                    propose(operator, &current, eval, config.move_selection, &mut rng);
                if let Some(c) = candidate {
                    // Metropolis acceptance criterion
                    let accept = if c.is_improving() {
                        improving_moves += 1;
                        true
                    } else if c.delta.is_finite() {
                        rng.random::<f64>() < (-c.delta / temperature).exp()
                    } else {
                        false
                    };

                    if accept {
                        c.mv.apply(&mut current, eval);
                        current_cost = total_cost(&current);
                        accepted_moves += 1;
                        trace!(?operator, delta = c.delta, cost = current_cost, "accepted move");
                    }
                }

                if current_cost < best_cost {
                    best.clone_from(&current);
                    best_cost = current_cost;
                }
            }

            debug!(temperature, current_cost, best_cost, "temperature step");
            temperature *= config.cooling_rate;
        }

        Ok(AnnealingResult {
            best,
            best_cost,
            initial_cost,
            iterations,
            accepted_moves,
            improving_moves,
            final_temperature: temperature,
        })
    }
}

fn total_cost(routes: &[Route]) -> f64 {
    routes.iter().map(|r| r.cost()).sum()
}

/// Asks `operator` for a candidate on randomly chosen routes.
fn propose<R: Rng + ?Sized>(
    operator: Operator,
    routes: &[Route],
    eval: &RouteEvaluator<'_>,
    selection: MoveSelection,
    rng: &mut R,
) -> Option<Candidate> {
    let n = routes.len();

    if operator.is_inter_route() {
        if n < 2 {
            return None;
        }
        let a = rng.random_range(0..n);
        let mut b = rng.random_range(0..n - 1);
        if b >= a {
            b += 1;
        }
        return match (operator, selection) {
            (Operator::Swap, MoveSelection::BestImproving) => best_swap(routes, a, b, eval),
            (Operator::Swap, MoveSelection::RandomNeighbor) => sample_swap(routes, a, b, eval, rng),
            (_, MoveSelection::BestImproving) => {
                // relocation is directional; scan both ways
                let forward = best_inter_relocate(routes, a, b, eval);
                let backward = best_inter_relocate(routes, b, a, eval);
                match (forward, backward) {
                    (Some(f), Some(r)) => Some(if r.delta < f.delta { r } else { f }),
                    (f, r) => f.or(r),
                }
            }
            (_, MoveSelection::RandomNeighbor) => sample_inter_relocate(routes, a, b, eval, rng),
        };
    }

    if n == 0 {
        return None;
    }
    let r = rng.random_range(0..n);
    match (operator, selection) {
        (Operator::TwoOpt, MoveSelection::BestImproving) => best_two_opt(routes, r, eval),
        (Operator::TwoOpt, MoveSelection::RandomNeighbor) => sample_two_opt(routes, r, eval, rng),
        (_, MoveSelection::BestImproving) => best_intra_relocate(routes, r, eval),
        (_, MoveSelection::RandomNeighbor) => sample_intra_relocate(routes, r, eval, rng),
    }
}
