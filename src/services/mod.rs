//! Required services.
//!
//! - [`Service`] — Tagged record unifying required vertices, edges and arcs
//! - [`ServiceRegistry`] — Stable, ID-ordered list built from an instance

mod registry;
mod service;

pub use registry::{ServiceRegistry, VertexServicePolicy};
pub use service::{Approach, Service, ServiceKind};
