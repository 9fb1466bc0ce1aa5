//! Flattens required vertices, edges and arcs into one service list.

use serde::{Deserialize, Serialize};

use super::service::{Service, ServiceKind};
use crate::distance::ShortestPaths;
use crate::error::{CarpError, CarpResult};
use crate::models::{Instance, VertexId};

/// Where required-vertex demand and service cost come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VertexServicePolicy {
    /// Every required vertex has demand 1 and service cost 1.
    Unit,
    /// Use the demand and cost recorded on each required vertex.
    #[default]
    FromInstance,
}

/// Read-only list of every service of an instance.
///
/// IDs are 1-based and assigned in the order required vertices (ascending
/// label), required edges, required arcs.
///
/// # Examples
///
/// ```
/// use u_arc_routing::models::InstanceBuilder;
/// use u_arc_routing::services::{ServiceKind, ServiceRegistry, VertexServicePolicy};
///
/// let inst = InstanceBuilder::new(1, 10)
///     .with_required_arc(3, 1, 5.0, 2, 5.0)
///     .with_required_edge(1, 2, 3.0, 4, 3.0)
///     .with_required_vertex(3, 6, 2.0)
///     .build()
///     .unwrap();
///
/// let reg = ServiceRegistry::build(&inst, VertexServicePolicy::FromInstance);
/// let kinds: Vec<_> = reg.iter().map(|s| s.kind()).collect();
/// assert_eq!(kinds, vec![ServiceKind::Vertex, ServiceKind::Edge, ServiceKind::Arc]);
/// assert_eq!(reg.get(2).map(|s| s.demand()), Some(4));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRegistry {
    services: Vec<Service>,
}

impl ServiceRegistry {
    /// Builds the registry from an instance.
    pub fn build(instance: &Instance, policy: VertexServicePolicy) -> Self {
        let mut services = Vec::with_capacity(instance.num_required());

        for rv in instance.required_vertices() {
            let (demand, cost) = match policy {
                VertexServicePolicy::Unit => (1, 1.0),
                VertexServicePolicy::FromInstance => (rv.demand, rv.service_cost),
            };
            let id = services.len() + 1;
            services.push(Service::new(id, ServiceKind::Vertex, rv.vertex, rv.vertex, demand, cost));
        }
        for re in instance.required_edges() {
            let id = services.len() + 1;
            services.push(Service::new(
                id,
                ServiceKind::Edge,
                re.u,
                re.v,
                re.demand,
                re.service_cost,
            ));
        }
        for ra in instance.required_arcs() {
            let id = services.len() + 1;
            services.push(Service::new(
                id,
                ServiceKind::Arc,
                ra.from,
                ra.to,
                ra.demand,
                ra.service_cost,
            ));
        }

        Self { services }
    }

    /// Looks up a service by ID.
    pub fn get(&self, id: usize) -> Option<&Service> {
        id.checked_sub(1).and_then(|i| self.services.get(i))
    }

    /// Looks up a service by an ID known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in `1..=len`.
    pub(crate) fn service(&self, id: usize) -> &Service {
        &self.services[id - 1]
    }

    /// Services in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &Service> {
        self.services.iter()
    }

    /// Number of services.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns `true` if nothing needs servicing.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Sum of all demands.
    pub fn total_demand(&self) -> u64 {
        self.services.iter().map(|s| u64::from(s.demand())).sum()
    }

    /// Up-front guards run before any route is built.
    ///
    /// # Errors
    ///
    /// - [`CarpError::InfeasibleDemand`] for the first service whose demand
    ///   exceeds `capacity`.
    /// - [`CarpError::UnreachableService`] for the first service with no
    ///   orientation that can be entered from `depot` and left back to it.
    pub fn check_feasibility(
        &self,
        capacity: u32,
        depot: VertexId,
        paths: &ShortestPaths,
    ) -> CarpResult<()> {
        if let Some(s) = self.services.iter().find(|s| s.demand() > capacity) {
            return Err(CarpError::InfeasibleDemand {
                service_id: s.id(),
                demand: s.demand(),
                capacity,
            });
        }

        for s in &self.services {
            let servable = s.orientations().any(|(entry, exit)| {
                paths.is_reachable(depot, entry) && paths.is_reachable(exit, depot)
            });
            if !servable {
                return Err(CarpError::UnreachableService { service_id: s.id() });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InstanceBuilder;

    fn sample() -> Instance {
        InstanceBuilder::new(1, 10)
            .with_required_vertex(4, 3, 2.0)
            .with_required_vertex(2, 5, 7.0)
            .with_required_edge(1, 2, 3.0, 4, 3.0)
            .with_required_arc(2, 4, 1.0, 2, 1.5)
            .with_edge(4, 1, 2.0)
            .build()
            .expect("valid")
    }

    #[test]
    fn test_ids_follow_kind_order() {
        let reg = ServiceRegistry::build(&sample(), VertexServicePolicy::FromInstance);
        assert_eq!(reg.len(), 4);
        let summary: Vec<_> = reg.iter().map(|s| (s.id(), s.kind(), s.endpoints())).collect();
        assert_eq!(
            summary,
            vec![
                (1, ServiceKind::Vertex, (2, 2)),
                (2, ServiceKind::Vertex, (4, 4)),
                (3, ServiceKind::Edge, (1, 2)),
                (4, ServiceKind::Arc, (2, 4)),
            ]
        );
    }

    #[test]
    fn test_vertex_policy_from_instance() {
        let reg = ServiceRegistry::build(&sample(), VertexServicePolicy::FromInstance);
        let s = reg.get(1).expect("exists");
        assert_eq!(s.demand(), 5);
        assert_eq!(s.cost(), 7.0);
        assert_eq!(reg.total_demand(), 5 + 3 + 4 + 2);
    }

    #[test]
    fn test_vertex_policy_unit() {
        let reg = ServiceRegistry::build(&sample(), VertexServicePolicy::Unit);
        for s in reg.iter().filter(|s| s.kind() == ServiceKind::Vertex) {
            assert_eq!(s.demand(), 1);
            assert_eq!(s.cost(), 1.0);
        }
        assert_eq!(reg.get(3).map(|s| s.demand()), Some(4));
    }

    #[test]
    fn test_get_out_of_range() {
        let reg = ServiceRegistry::build(&sample(), VertexServicePolicy::Unit);
        assert!(reg.get(0).is_none());
        assert!(reg.get(5).is_none());
    }

    #[test]
    fn test_feasibility_ok() {
        let inst = sample();
        let reg = ServiceRegistry::build(&inst, VertexServicePolicy::FromInstance);
        let sp = ShortestPaths::compute(inst.graph());
        assert!(reg.check_feasibility(inst.capacity(), inst.depot(), &sp).is_ok());
    }

    #[test]
    fn test_feasibility_demand_over_capacity() {
        let inst = sample();
        let reg = ServiceRegistry::build(&inst, VertexServicePolicy::FromInstance);
        let sp = ShortestPaths::compute(inst.graph());
        let err = reg.check_feasibility(4, inst.depot(), &sp).unwrap_err();
        assert_eq!(
            err,
            CarpError::InfeasibleDemand {
                service_id: 1,
                demand: 5,
                capacity: 4,
            }
        );
    }

    #[test]
    fn test_feasibility_disconnected_vertex() {
        let inst = InstanceBuilder::new(1, 10)
            .with_required_edge(1, 2, 1.0, 1, 1.0)
            .with_required_vertex(9, 1, 1.0)
            .build()
            .expect("valid");
        let reg = ServiceRegistry::build(&inst, VertexServicePolicy::FromInstance);
        let sp = ShortestPaths::compute(inst.graph());
        let err = reg.check_feasibility(10, 1, &sp).unwrap_err();
        assert_eq!(err, CarpError::UnreachableService { service_id: 1 });
    }

    #[test]
    fn test_feasibility_no_way_back() {
        let inst = InstanceBuilder::new(1, 10)
            .with_required_arc(1, 2, 1.0, 1, 1.0)
            .build()
            .expect("valid");
        let reg = ServiceRegistry::build(&inst, VertexServicePolicy::FromInstance);
        let sp = ShortestPaths::compute(inst.graph());
        let err = reg.check_feasibility(10, 1, &sp).unwrap_err();
        assert_eq!(err, CarpError::UnreachableService { service_id: 1 });
    }
}
