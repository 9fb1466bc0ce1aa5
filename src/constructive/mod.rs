//! Constructive heuristics for building initial CARP solutions.
//!
//! - [`nearest_neighbor`] — Greedy nearest-feasible-service construction, O(n²)

mod nearest_neighbor;

pub use nearest_neighbor::nearest_neighbor;
