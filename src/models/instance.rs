//! Loaded problem instance and its builder.

use serde::{Deserialize, Serialize};

use super::graph::{Graph, VertexId};
use crate::error::{CarpError, CarpResult};

/// A vertex that must be serviced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequiredVertex {
    /// Vertex label.
    pub vertex: VertexId,
    /// Demand collected when serviced.
    pub demand: u32,
    /// Cost of servicing the vertex.
    pub service_cost: f64,
}

/// An undirected edge that must be serviced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequiredEdge {
    /// First endpoint.
    pub u: VertexId,
    /// Second endpoint.
    pub v: VertexId,
    /// Cost of driving over the edge without servicing it.
    pub travel_cost: f64,
    /// Demand collected when serviced.
    pub demand: u32,
    /// Cost of servicing the edge.
    pub service_cost: f64,
}

/// A directed arc that must be serviced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequiredArc {
    /// Tail vertex.
    pub from: VertexId,
    /// Head vertex.
    pub to: VertexId,
    /// Cost of driving over the arc without servicing it.
    pub travel_cost: f64,
    /// Demand collected when serviced.
    pub demand: u32,
    /// Cost of servicing the arc.
    pub service_cost: f64,
}

/// An immutable CARP instance.
///
/// Required edges and arcs are part of [`Instance::graph`] as well, since a
/// vehicle may also drive over them without servicing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    name: String,
    depot: VertexId,
    capacity: u32,
    graph: Graph,
    required_vertices: Vec<RequiredVertex>,
    required_edges: Vec<RequiredEdge>,
    required_arcs: Vec<RequiredArc>,
}

impl Instance {
    /// Instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Depot vertex.
    pub fn depot(&self) -> VertexId {
        self.depot
    }

    /// Vehicle capacity (homogeneous fleet).
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// The traversable network.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Required vertices, sorted by label.
    pub fn required_vertices(&self) -> &[RequiredVertex] {
        &self.required_vertices
    }

    /// Required edges in insertion order.
    pub fn required_edges(&self) -> &[RequiredEdge] {
        &self.required_edges
    }

    /// Required arcs in insertion order.
    pub fn required_arcs(&self) -> &[RequiredArc] {
        &self.required_arcs
    }

    /// Total number of required elements.
    pub fn num_required(&self) -> usize {
        self.required_vertices.len() + self.required_edges.len() + self.required_arcs.len()
    }
}

/// Incrementally assembles an [`Instance`], validating it on [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use u_arc_routing::models::InstanceBuilder;
///
/// let instance = InstanceBuilder::new(1, 10)
///     .with_required_edge(1, 2, 3.0, 4, 3.0)
///     .with_required_edge(2, 3, 2.0, 4, 2.0)
///     .with_required_arc(3, 1, 5.0, 2, 5.0)
///     .build()
///     .unwrap();
/// assert_eq!(instance.num_required(), 3);
/// assert_eq!(instance.graph().num_vertices(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct InstanceBuilder {
    name: String,
    depot: VertexId,
    capacity: u32,
    graph: Graph,
    required_vertices: Vec<RequiredVertex>,
    required_edges: Vec<RequiredEdge>,
    required_arcs: Vec<RequiredArc>,
}

impl InstanceBuilder {
    /// Starts an instance with the given depot and vehicle capacity.
    pub fn new(depot: VertexId, capacity: u32) -> Self {
        Self {
            name: String::new(),
            depot,
            capacity,
            graph: Graph::new(),
            required_vertices: Vec::new(),
            required_edges: Vec::new(),
            required_arcs: Vec::new(),
        }
    }

    /// Sets the instance name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds an isolated vertex.
    pub fn with_vertex(mut self, v: VertexId) -> Self {
        self.graph.add_vertex(v);
        self
    }

    /// Adds a non-required undirected edge.
    pub fn with_edge(mut self, u: VertexId, v: VertexId, cost: f64) -> Self {
        self.graph.add_edge(u, v, cost);
        self
    }

    /// Adds a non-required directed arc.
    pub fn with_arc(mut self, from: VertexId, to: VertexId, cost: f64) -> Self {
        self.graph.add_arc(from, to, cost);
        self
    }

    /// Adds a required vertex.
    pub fn with_required_vertex(mut self, vertex: VertexId, demand: u32, service_cost: f64) -> Self {
        self.graph.add_vertex(vertex);
        self.required_vertices.push(RequiredVertex {
            vertex,
            demand,
            service_cost,
        });
        self
    }

    /// Adds a required undirected edge (also traversable).
    pub fn with_required_edge(
        mut self,
        u: VertexId,
        v: VertexId,
        travel_cost: f64,
        demand: u32,
        service_cost: f64,
    ) -> Self {
        self.graph.add_edge(u, v, travel_cost);
        self.required_edges.push(RequiredEdge {
            u,
            v,
            travel_cost,
            demand,
            service_cost,
        });
        self
    }

    /// Adds a required directed arc (also traversable).
    pub fn with_required_arc(
        mut self,
        from: VertexId,
        to: VertexId,
        travel_cost: f64,
        demand: u32,
        service_cost: f64,
    ) -> Self {
        self.graph.add_arc(from, to, travel_cost);
        self.required_arcs.push(RequiredArc {
            from,
            to,
            travel_cost,
            demand,
            service_cost,
        });
        self
    }

    /// Validates and freezes the instance.
    ///
    /// The depot always becomes a graph vertex. Required vertices are sorted
    /// by label. Required edges and arcs keep insertion order, and parallel
    /// required links between the same endpoints are distinct services.
    ///
    /// # Errors
    ///
    /// [`CarpError::InvalidInstance`] if the capacity is zero, any travel
    /// or service cost is negative or non-finite, or a vertex is required
    /// more than once.
    pub fn build(mut self) -> CarpResult<Instance> {
        if self.capacity == 0 {
            return Err(CarpError::InvalidInstance(
                "vehicle capacity must be positive".into(),
            ));
        }

        for e in self.graph.edges() {
            check_cost(e.cost, || format!("edge ({}, {})", e.u, e.v))?;
        }
        for a in self.graph.arcs() {
            check_cost(a.cost, || format!("arc ({}, {})", a.from, a.to))?;
        }
        for rv in &self.required_vertices {
            check_cost(rv.service_cost, || format!("required vertex {}", rv.vertex))?;
        }
        for re in &self.required_edges {
            check_cost(re.service_cost, || format!("required edge ({}, {})", re.u, re.v))?;
        }
        for ra in &self.required_arcs {
            check_cost(ra.service_cost, || {
                format!("required arc ({}, {})", ra.from, ra.to)
            })?;
        }

        self.graph.add_vertex(self.depot);

        self.required_vertices.sort_by_key(|rv| rv.vertex);
        if let Some(pair) = self
            .required_vertices
            .windows(2)
            .find(|pair| pair[0].vertex == pair[1].vertex)
        {
            return Err(CarpError::InvalidInstance(format!(
                "vertex {} is required more than once",
                pair[0].vertex
            )));
        }

        Ok(Instance {
            name: self.name,
            depot: self.depot,
            capacity: self.capacity,
            graph: self.graph,
            required_vertices: self.required_vertices,
            required_edges: self.required_edges,
            required_arcs: self.required_arcs,
        })
    }
}

fn check_cost(cost: f64, what: impl FnOnce() -> String) -> CarpResult<()> {
    if !cost.is_finite() || cost < 0.0 {
        return Err(CarpError::InvalidInstance(format!(
            "{} has invalid cost {cost}",
            what()
        )));
    }
    Ok(())
}
