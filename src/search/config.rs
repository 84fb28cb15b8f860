//! Restart search configuration.

use crate::sa::SaConfig;

/// Configuration for the best-of-N restart search.
///
/// # Examples
///
/// ```
/// use u_affinity::sa::SaConfig;
/// use u_affinity::search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_restarts(8)
///     .with_anneal(SaConfig::default().with_cooling_factor(0.95))
///     .with_seed(7);
/// assert_eq!(config.restarts, 8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Number of independent anneals from fresh random partitions.
    pub restarts: usize,

    /// Schedule used by every restart. Its `seed` is ignored; per-restart
    /// seeds are derived from [`SearchConfig::seed`].
    pub anneal: SaConfig,

    /// Whether to run restarts concurrently using rayon.
    ///
    /// Only takes effect with the `parallel` feature. Results are identical
    /// either way.
    pub parallel: bool,

    /// Base random seed. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            restarts: 3,
            anneal: SaConfig::default(),
            parallel: false,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Sets the number of restarts.
    pub fn with_restarts(mut self, n: usize) -> Self {
        self.restarts = n;
        self
    }

    /// Sets the annealing schedule.
    pub fn with_anneal(mut self, anneal: SaConfig) -> Self {
        self.anneal = anneal;
        self
    }

    /// Enables or disables parallel restarts.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the base random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.restarts == 0 {
            return Err("restarts must be positive".into());
        }
        self.anneal.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.restarts, 3);
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_restarts() {
        assert!(SearchConfig::default().with_restarts(0).validate().is_err());
    }

    #[test]
    fn test_validate_propagates_anneal() {
        let config =
            SearchConfig::default().with_anneal(SaConfig::default().with_min_temperature(5.0));
        assert!(config.validate().is_err());
    }
}
