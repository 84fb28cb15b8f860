//! SA configuration and cooling schedule.

/// Configuration for the Simulated Annealing loop.
///
/// The loop runs temperature bands while `T > min_temperature`, performs
/// `iterations_per_temperature` trial moves per band, and cools
/// geometrically: `T_{k+1} = cooling_factor * T_k`.
///
/// The defaults (1.0 → 1e-5, factor 0.90, 100 trials) give 110 bands and
/// 11 000 candidate evaluations per run.
///
/// # Examples
///
/// ```
/// use u_affinity::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(2.0)
///     .with_min_temperature(1e-4)
///     .with_cooling_factor(0.95)
///     .with_iterations_per_temperature(200);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Starting temperature.
    pub initial_temperature: f64,

    /// Temperature floor. The loop stops once T is no longer above it.
    pub min_temperature: f64,

    /// Geometric cooling factor in (0, 1). Higher = slower cooling.
    pub cooling_factor: f64,

    /// Number of trial moves at each temperature.
    pub iterations_per_temperature: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1.0,
            min_temperature: 1e-5,
            cooling_factor: 0.90,
            iterations_per_temperature: 100,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling_factor(mut self, alpha: f64) -> Self {
        self.cooling_factor = alpha;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("initial_temperature", self.initial_temperature),
            ("min_temperature", self.min_temperature),
            ("cooling_factor", self.cooling_factor),
        ] {
            if !value.is_finite() {
                return Err(format!("{name} must be finite, got {value}"));
            }
        }
        if self.initial_temperature <= 0.0 {
            return Err("initial_temperature must be positive".into());
        }
        if self.min_temperature <= 0.0 {
            return Err("min_temperature must be positive".into());
        }
        if self.min_temperature >= self.initial_temperature {
            return Err("min_temperature must be less than initial_temperature".into());
        }
        if self.cooling_factor <= 0.0 || self.cooling_factor >= 1.0 {
            return Err(format!(
                "cooling_factor must be in (0, 1), got {}",
                self.cooling_factor
            ));
        }
        if self.iterations_per_temperature == 0 {
            return Err("iterations_per_temperature must be positive".into());
        }
        Ok(())
    }

    /// Number of temperature bands the schedule runs, or 0 when the
    /// configuration does not validate.
    pub fn schedule_len(&self) -> usize {
        if self.validate().is_err() {
            return 0;
        }
        let mut bands = 0;
        let mut t = self.initial_temperature;
        while t > self.min_temperature {
            bands += 1;
            t *= self.cooling_factor;
        }
        bands
    }

    /// Total trial moves over the whole schedule.
    pub fn total_iterations(&self) -> usize {
        self.schedule_len() * self.iterations_per_temperature
    }
}
