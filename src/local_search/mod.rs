//! Local search operators for improving CARP solutions.
//!
//! - [`two_opt`] — Intra-route block reversal
//! - [`relocate`] — Intra- and inter-route service relocation
//! - [`swap`] — Inter-route service exchange
//! - [`driver`] — Pass loop applying every operator until no improvement
//!
//! Operators come in two flavors: `best_*` scans the whole neighborhood for
//! the best improving move, `sample_*` draws one random feasible move. Both
//! return a [`Candidate`] that is committed with [`Move::apply`].

mod driver;
mod moves;
mod relocate;
mod swap;
mod two_opt;

pub use driver::{local_search, LocalSearchConfig, LocalSearchResult};
pub use moves::{Candidate, Move, Operator, IMPROVEMENT_EPSILON};
pub use relocate::{
    best_inter_relocate, best_intra_relocate, inter_relocate_improve, intra_relocate_improve,
    sample_inter_relocate, sample_intra_relocate,
};
pub use swap::{best_swap, sample_swap, swap_improve};
pub use two_opt::{best_two_opt, sample_two_opt, two_opt_improve};

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::distance::ShortestPaths;
    use crate::evaluation::RouteEvaluator;
    use crate::models::{InstanceBuilder, VertexId};
    use crate::services::{ServiceRegistry, VertexServicePolicy};

    pub(crate) struct Fixture {
        paths: ShortestPaths,
        registry: ServiceRegistry,
        depot: VertexId,
        capacity: u32,
    }

    impl Fixture {
        pub(crate) fn eval(&self) -> RouteEvaluator<'_> {
            RouteEvaluator::new(&self.registry, &self.paths, self.depot, self.capacity)
        }
    }

    /// Path 1-2-3-4-5 with unit edges; `required` lists `(vertex, demand)`
    /// pairs served at no cost.
    pub(crate) fn line_with(
        depot: VertexId,
        capacity: u32,
        required: &[(VertexId, u32)],
    ) -> Fixture {
        let mut builder = InstanceBuilder::new(depot, capacity)
            .with_edge(1, 2, 1.0)
            .with_edge(2, 3, 1.0)
            .with_edge(3, 4, 1.0)
            .with_edge(4, 5, 1.0);
        for &(v, demand) in required {
            builder = builder.with_required_vertex(v, demand, 0.0);
        }
        let inst = builder.build().expect("valid fixture");
        Fixture {
            paths: ShortestPaths::compute(inst.graph()),
            registry: ServiceRegistry::build(&inst, VertexServicePolicy::FromInstance),
            depot,
            capacity,
        }
    }

    /// [`line_with`] with unit demands.
    pub(crate) fn line(depot: VertexId, capacity: u32, required: &[VertexId]) -> Fixture {
        let pairs: Vec<_> = required.iter().map(|&v| (v, 1)).collect();
        line_with(depot, capacity, &pairs)
    }
}
