//! Simulated annealing configuration.

use serde::{Deserialize, Serialize};

use crate::error::{CarpError, CarpResult};

/// How each annealing trial proposes a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoveSelection {
    /// Run the chosen operator's full best-improving scan. Only improving
    /// moves are ever proposed, so worsening moves are never accepted.
    #[default]
    BestImproving,
    /// Draw one random feasible neighbor of the chosen operator and score
    /// only that move. Worsening moves pass the Metropolis test with
    /// probability `exp(-delta / T)`.
    RandomNeighbor,
}

/// Configuration for the annealing controller.
///
/// The schedule is geometric: after `iterations_per_temperature` trials,
/// `T <- cooling_rate * T`, until `T <= min_temperature`.
///
/// # Examples
///
/// ```
/// use u_arc_routing::metaheuristic::{AnnealingConfig, MoveSelection};
///
/// let config = AnnealingConfig::default()
///     .with_initial_temperature(50.0)
///     .with_cooling_rate(0.9)
///     .with_seed(42)
///     .with_move_selection(MoveSelection::RandomNeighbor);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnealingConfig {
    /// Starting temperature.
    pub initial_temperature: f64,

    /// Geometric cooling factor in (0, 1).
    pub cooling_rate: f64,

    /// Trials at each temperature level.
    pub iterations_per_temperature: usize,

    /// The run stops once the temperature is at or below this.
    pub min_temperature: f64,

    /// Random seed for reproducibility. `None` draws one from the OS.
    pub seed: Option<u64>,

    /// Proposal strategy.
    pub move_selection: MoveSelection,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            cooling_rate: 0.95,
            iterations_per_temperature: 100,
            min_temperature: 0.1,
            seed: None,
            move_selection: MoveSelection::default(),
        }
    }
}

impl AnnealingConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, alpha: f64) -> Self {
        self.cooling_rate = alpha;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_move_selection(mut self, selection: MoveSelection) -> Self {
        self.move_selection = selection;
        self
    }

    /// Number of temperature levels the schedule will visit.
    pub fn temperature_steps(&self) -> usize {
        let mut t = self.initial_temperature;
        let mut steps = 0;
        while t > self.min_temperature {
            steps += 1;
            t *= self.cooling_rate;
        }
        steps
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CarpResult<()> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(CarpError::InvalidConfig(
                "initial_temperature must be positive and finite".into(),
            ));
        }
        if self.min_temperature.is_nan() || self.min_temperature <= 0.0 {
            return Err(CarpError::InvalidConfig(
                "min_temperature must be positive".into(),
            ));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(CarpError::InvalidConfig(
                "min_temperature must be less than initial_temperature".into(),
            ));
        }
        if self.cooling_rate.is_nan() || self.cooling_rate <= 0.0 || self.cooling_rate >= 1.0 {
            return Err(CarpError::InvalidConfig(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if self.iterations_per_temperature == 0 {
            return Err(CarpError::InvalidConfig(
                "iterations_per_temperature must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnnealingConfig::default();
        assert!((config.initial_temperature - 100.0).abs() < 1e-10);
        assert!((config.cooling_rate - 0.95).abs() < 1e-10);
        assert!((config.min_temperature - 0.1).abs() < 1e-10);
        assert_eq!(config.iterations_per_temperature, 100);
        assert_eq!(config.move_selection, MoveSelection::BestImproving);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(AnnealingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = AnnealingConfig::default().with_initial_temperature(-1.0);
        assert!(config.validate().is_err());
        let config = AnnealingConfig::default().with_initial_temperature(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_min_ge_initial() {
        let config = AnnealingConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(20.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_cooling() {
        assert!(AnnealingConfig::default().with_cooling_rate(1.0).validate().is_err());
        assert!(AnnealingConfig::default().with_cooling_rate(0.0).validate().is_err());
    }

    #[test]
    fn test_validate_zero_iterations() {
        let config = AnnealingConfig::default().with_iterations_per_temperature(0);
        assert!(matches!(config.validate(), Err(CarpError::InvalidConfig(_))));
    }

    #[test]
    fn test_temperature_steps() {
        let config = AnnealingConfig::default()
            .with_initial_temperature(1.0)
            .with_cooling_rate(0.5)
            .with_min_temperature(0.1);
        // 1, 0.5, 0.25, 0.125
        assert_eq!(config.temperature_steps(), 4);
        // 100 * 0.95^k > 0.1 for k = 0..=134
        assert_eq!(AnnealingConfig::default().temperature_steps(), 135);
    }
}
