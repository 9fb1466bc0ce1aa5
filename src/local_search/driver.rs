//! Greedy local-search driver.
//!
//! One pass applies the intra-route operators (2-opt, relocation) to every
//! route, then the inter-route operators (swap, relocation in both
//! directions) to every unordered route pair. Passes repeat until one
//! finds nothing to improve or the pass cap is hit.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::relocate::{inter_relocate_improve, intra_relocate_improve};
use super::swap::swap_improve;
use super::two_opt::two_opt_improve;
use crate::error::{CarpError, CarpResult};
use crate::evaluation::RouteEvaluator;
use crate::models::Route;

/// Configuration for [`local_search`].
///
/// # Examples
///
/// ```
/// use u_arc_routing::local_search::LocalSearchConfig;
///
/// let config = LocalSearchConfig::default().with_max_passes(20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalSearchConfig {
    /// Upper bound on full passes.
    pub max_passes: usize,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self { max_passes: 100 }
    }
}

impl LocalSearchConfig {
    pub fn with_max_passes(mut self, n: usize) -> Self {
        self.max_passes = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CarpResult<()> {
        if self.max_passes == 0 {
            return Err(CarpError::InvalidConfig(
                "max_passes must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Outcome of a [`local_search`] run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalSearchResult {
    /// Passes executed, including the final one that found nothing.
    pub passes: usize,
    /// Moves committed.
    pub improvements: usize,
    /// Total cost before the first pass.
    pub initial_cost: f64,
    /// Total cost after the last pass.
    pub final_cost: f64,
}

fn total_cost(routes: &[Route]) -> f64 {
    routes.iter().map(|r| r.cost()).sum()
}

/// Runs one full pass. Returns the number of committed moves.
fn run_pass(routes: &mut [Route], eval: &RouteEvaluator<'_>) -> usize {
    let mut improvements = 0;

    for r in 0..routes.len() {
        improvements += usize::from(two_opt_improve(routes, r, eval));
        improvements += usize::from(intra_relocate_improve(routes, r, eval));
    }

    for i in 0..routes.len() {
        for j in i + 1..routes.len() {
            improvements += usize::from(swap_improve(routes, i, j, eval));
            improvements += usize::from(inter_relocate_improve(routes, i, j, eval));
            improvements += usize::from(inter_relocate_improve(routes, j, i, eval));
        }
    }

    improvements
}

/// Improves `routes` in place with best-improvement operators.
///
/// Every committed move strictly lowers the total cost and keeps every
/// route within capacity, so the result never costs more than the input.
/// Routes emptied by relocation stay in the slice with zero cost.
///
/// # Examples
///
/// ```
/// use u_arc_routing::models::InstanceBuilder;
/// use u_arc_routing::distance::ShortestPaths;
/// use u_arc_routing::services::{ServiceRegistry, VertexServicePolicy};
/// use u_arc_routing::evaluation::RouteEvaluator;
/// use u_arc_routing::local_search::{local_search, LocalSearchConfig};
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
/// // two round trips merge into one
/// let mut routes = vec![eval.build_route(1, vec![1]), eval.build_route(2, vec![2])];
/// let result = local_search(&mut routes, &eval, &LocalSearchConfig::default());
/// assert!((result.initial_cost - 6.0).abs() < 1e-10);
/// assert!((result.final_cost - 4.0).abs() < 1e-10);
/// ```
pub fn local_search(
    routes: &mut [Route],
    eval: &RouteEvaluator<'_>,
    config: &LocalSearchConfig,
) -> LocalSearchResult {
    let initial_cost = total_cost(routes);
    let mut passes = 0;
    let mut improvements = 0;

    while passes < config.max_passes {
        passes += 1;
        let found = run_pass(routes, eval);
        improvements += found;
        debug!(pass = passes, moves = found, cost = total_cost(routes), "local search pass");
        if found == 0 {
            break;
        }
    }

    LocalSearchResult {
        passes,
        improvements,
        initial_cost,
        final_cost: total_cost(routes),
    }
}
