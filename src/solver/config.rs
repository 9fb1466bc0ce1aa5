//! Top-level solver configuration.

use serde::{Deserialize, Serialize};

use crate::error::CarpResult;
use crate::local_search::LocalSearchConfig;
use crate::metaheuristic::AnnealingConfig;
use crate::services::VertexServicePolicy;

/// Which improvement phase runs after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Improvement {
    /// Return the constructed routes as they are.
    None,
    /// Greedy best-improvement passes.
    LocalSearch,
    /// Simulated annealing.
    Annealing,
    /// Simulated annealing followed by a local-search polish.
    #[default]
    Both,
}

/// Configuration for [`Solver`](super::Solver).
///
/// # Examples
///
/// ```
/// use u_arc_routing::solver::{Improvement, SolverConfig};
/// use u_arc_routing::metaheuristic::AnnealingConfig;
///
/// let config = SolverConfig::default()
///     .with_improvement(Improvement::Annealing)
///     .with_annealing(AnnealingConfig::default().with_seed(1));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Demand and cost source for required vertices.
    pub vertex_services: VertexServicePolicy,

    /// Improvement phase.
    pub improvement: Improvement,

    /// Local-search parameters.
    pub local_search: LocalSearchConfig,

    /// Annealing parameters.
    pub annealing: AnnealingConfig,
}

impl SolverConfig {
    pub fn with_vertex_services(mut self, policy: VertexServicePolicy) -> Self {
        self.vertex_services = policy;
        self
    }

    pub fn with_improvement(mut self, improvement: Improvement) -> Self {
        self.improvement = improvement;
        self
    }

    pub fn with_local_search(mut self, config: LocalSearchConfig) -> Self {
        self.local_search = config;
        self
    }

    pub fn with_annealing(mut self, config: AnnealingConfig) -> Self {
        self.annealing = config;
        self
    }

    /// Validates the parameters of every phase that will run.
    pub fn validate(&self) -> CarpResult<()> {
        match self.improvement {
            Improvement::None => Ok(()),
            Improvement::LocalSearch => self.local_search.validate(),
            Improvement::Annealing => self.annealing.validate(),
            Improvement::Both => {
                self.annealing.validate()?;
                self.local_search.validate()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CarpError;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.improvement, Improvement::Both);
        assert_eq!(config.vertex_services, VertexServicePolicy::FromInstance);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_only_checks_active_phases() {
        let bad_sa = AnnealingConfig::default().with_cooling_rate(1.5);
        let config = SolverConfig::default()
            .with_improvement(Improvement::LocalSearch)
            .with_annealing(bad_sa.clone());
        assert!(config.validate().is_ok());

        let config = config.with_improvement(Improvement::Both);
        assert!(matches!(config.validate(), Err(CarpError::InvalidConfig(_))));

        let config = SolverConfig::default()
            .with_improvement(Improvement::None)
            .with_annealing(bad_sa)
            .with_local_search(LocalSearchConfig::default().with_max_passes(0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = SolverConfig::default()
            .with_vertex_services(VertexServicePolicy::Unit)
            .with_annealing(AnnealingConfig::default().with_seed(5));
        let json = serde_json::to_string(&config).expect("serialize");
        let back: SolverConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, config);
    }
}
