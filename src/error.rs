//! Error type shared by every stage of the solver.

use std::fmt;

/// A type alias for results produced by this crate.
pub type CarpResult<T> = Result<T, CarpError>;

/// Errors raised before or during a solve.
///
/// Every variant is detected before a route is built, so a failing solve
/// never yields a partial solution.
#[derive(Debug, Clone, PartialEq)]
pub enum CarpError {
    /// The instance handed to the core is malformed.
    InvalidInstance(String),
    /// A single service demands more than one vehicle can carry.
    InfeasibleDemand {
        /// Service ID.
        service_id: usize,
        /// Demand of the service.
        demand: u32,
        /// Vehicle capacity.
        capacity: u32,
    },
    /// A service cannot be reached from the depot, or the depot cannot be
    /// reached again after serving it.
    UnreachableService {
        /// Service ID.
        service_id: usize,
    },
    /// Solver parameters are out of range.
    InvalidConfig(String),
}

impl fmt::Display for CarpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarpError::InvalidInstance(msg) => write!(f, "invalid instance: {msg}"),
            CarpError::InfeasibleDemand {
                service_id,
                demand,
                capacity,
            } => write!(
                f,
                "infeasible instance: service {service_id} demands {demand}, vehicle capacity is {capacity}"
            ),
            CarpError::UnreachableService { service_id } => {
                write!(f, "infeasible instance: service {service_id} is unreachable from the depot")
            }
            CarpError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for CarpError {}
