//! # u-arc-routing
//!
//! Capacitated arc routing (CARP) on mixed graphs: required vertices,
//! undirected edges and directed arcs are served by capacity-limited
//! vehicles starting and ending at a depot, minimizing travel plus service
//! cost.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Graph, Instance, Route, Solution)
//! - [`distance`] — Dense matrices and Floyd-Warshall shortest paths
//! - [`services`] — Uniform service records and the service registry
//! - [`evaluation`] — Route cost replay and solution validation
//! - [`constructive`] — Nearest-feasible greedy construction
//! - [`local_search`] — Local search operators (2-opt, Relocate, Swap)
//! - [`metaheuristic`] — Simulated annealing controller
//! - [`solver`] — End-to-end pipeline
//! - [`error`] — Crate error type
//!
//! ## Quick start
//!
//! ```
//! use u_arc_routing::models::InstanceBuilder;
//! use u_arc_routing::solver::{Improvement, Solver, SolverConfig};
//!
//! let inst = InstanceBuilder::new(1, 10)
//!     .with_edge(2, 4, 4.0)
//!     .with_required_edge(1, 2, 3.0, 4, 3.0)
//!     .with_required_arc(3, 1, 5.0, 2, 5.0)
//!     .with_required_edge(2, 3, 2.0, 4, 2.0)
//!     .build()
//!     .unwrap();
//!
//! let config = SolverConfig::default().with_improvement(Improvement::LocalSearch);
//! let solution = Solver::new(&inst, config).unwrap().solve().unwrap();
//! assert_eq!(solution.num_served(), 3);
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod metaheuristic;
pub mod models;
pub mod services;
pub mod solver;

pub use error::{CarpError, CarpResult};
pub use models::{Instance, InstanceBuilder, Solution};
pub use solver::{Improvement, Solver, SolverConfig};
