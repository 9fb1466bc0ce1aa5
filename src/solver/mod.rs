//! End-to-end solver facade.
//!
//! - [`SolverConfig`] — Vertex-service policy, improvement phase and per-phase parameters
//! - [`Solver`] — Builds shared tables once, then constructs, improves and finalizes

mod config;
mod engine;

pub use config::{Improvement, SolverConfig};
pub use engine::Solver;
