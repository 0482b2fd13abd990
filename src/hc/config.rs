//! Hill-climbing configuration.

/// Configuration for random-restart hill climbing.
///
/// # Examples
///
/// ```
/// use u_localsearch::hc::HcConfig;
///
/// let config = HcConfig::default()
///     .with_max_restarts(25)
///     .with_seed(7);
/// assert_eq!(config.max_restarts, 25);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HcConfig {
    /// Restarts allowed after the first climb.
    ///
    /// The runner performs at most `max_restarts + 1` climbs; `0` means a
    /// single climb.
    pub max_restarts: usize,

    /// Cap on accepted moves per climb. 0 = no limit.
    pub max_climb_steps: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for HcConfig {
    fn default() -> Self {
        Self {
            max_restarts: 10,
            max_climb_steps: 0,
            seed: None,
        }
    }
}

impl HcConfig {
    /// Sets the restart budget.
    pub fn with_max_restarts(mut self, n: usize) -> Self {
        self.max_restarts = n;
        self
    }

    /// Sets the per-climb step cap (0 to disable).
    pub fn with_max_climb_steps(mut self, n: usize) -> Self {
        self.max_climb_steps = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HcConfig::default();
        assert_eq!(config.max_restarts, 10);
        assert_eq!(config.max_climb_steps, 0);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = HcConfig::default()
            .with_max_restarts(0)
            .with_max_climb_steps(50)
            .with_seed(42);
        assert_eq!(config.max_restarts, 0);
        assert_eq!(config.max_climb_steps, 50);
        assert_eq!(config.seed, Some(42));
    }
}
