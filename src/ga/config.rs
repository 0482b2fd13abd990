//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the generational loop.
//! Operator behavior (mutation rate, selection, crossover) belongs to the
//! [`EvolutionaryProblemSpace`](crate::space::EvolutionaryProblemSpace).

use crate::error::{Result, SearchError};

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_localsearch::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.max_generations, 10_000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_localsearch::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_max_generations(2_000)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Requested number of individuals.
    ///
    /// The problem may return fewer from
    /// [`initial_population`](crate::space::EvolutionaryProblemSpace::initial_population);
    /// whatever it returns is then kept constant.
    pub population_size: usize,

    /// Maximum number of generations before giving up.
    pub max_generations: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked at the start of each generation, so the run may exceed it by
    /// one generation's worth of work.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            max_generations: 10_000,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Preset for quick experiments: population 10, 1 000 generations, 5s.
    pub fn fast() -> Self {
        Self {
            max_generations: 1_000,
            time_limit_ms: Some(5_000),
            ..Self::default()
        }
    }

    /// Preset for harder boards: population 100, 50 000 generations, 60s.
    pub fn thorough() -> Self {
        Self {
            population_size: 100,
            max_generations: 50_000,
            time_limit_ms: Some(60_000),
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`SearchError::Config`] describing the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(SearchError::Config(
                "population_size must be at least 1".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(SearchError::Config(
                "max_generations must be at least 1".into(),
            ));
        }
        if self.time_limit_ms == Some(0) {
            return Err(SearchError::Config(
                "time_limit_ms must be positive or None".into(),
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
        let config = GaConfig::default();
        assert_eq!(config.population_size, 10);
        assert_eq!(config.max_generations, 10_000);
        assert!(config.seed.is_none());
        assert!(config.time_limit_ms.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(200)
            .with_max_generations(1000)
            .with_time_limit_ms(250)
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.max_generations, 1000);
        assert_eq!(config.time_limit_ms, Some(250));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
        assert!(GaConfig::fast().validate().is_ok());
        assert!(GaConfig::thorough().validate().is_ok());
    }

    #[test]
    fn test_single_member_population_is_valid() {
        assert!(GaConfig::default().with_population_size(1).validate().is_ok());
    }

    #[test]
    fn test_validate_empty_population() {
        let config = GaConfig::default().with_population_size(0);
        assert!(matches!(config.validate(), Err(SearchError::Config(_))));
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = GaConfig::default().with_max_generations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_time_limit() {
        let config = GaConfig::default().with_time_limit_ms(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_presets() {
        let fast = GaConfig::fast();
        assert_eq!(fast.population_size, 10);
        assert_eq!(fast.max_generations, 1_000);
        assert_eq!(fast.time_limit_ms, Some(5_000));

        let thorough = GaConfig::thorough();
        assert_eq!(thorough.population_size, 100);
        assert_eq!(thorough.time_limit_ms, Some(60_000));
    }
}
