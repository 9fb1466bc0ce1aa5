//! Domain model types for capacitated arc routing.
//!
//! Provides the mixed graph (vertices, undirected edges, directed arcs), the
//! loaded instance with its required elements, and the route and solution
//! types produced by the solver.

mod graph;
mod instance;
mod route;
mod solution;

pub use graph::{Arc, Edge, Graph, VertexId};
pub use instance::{Instance, InstanceBuilder, RequiredArc, RequiredEdge, RequiredVertex};
pub use route::{Route, Visit};
pub use solution::{Solution, Violation, ViolationType};
