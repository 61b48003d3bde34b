//! GA configuration.
//!
//! [`GaConfig`] holds every parameter that controls a run. It is passed by
//! reference into the runner; nothing in the crate reads process-wide state.

use crate::error::{GaError, Result};

/// Configuration for the knapsack GA.
///
/// # Defaults
///
/// ```
/// use knapsack_ga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 1000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use knapsack_ga::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_capacity(50)
///     .with_population_size(40)
///     .with_mutation_rate(0.05)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Maximum total weight of a feasible candidate.
    pub capacity: u64,

    /// Number of random candidates drawn for the initial population, and the
    /// size of every later generation.
    ///
    /// The initial population may come out smaller, since infeasible draws
    /// are discarded rather than replaced.
    pub population_size: usize,

    /// Probability that a child has exactly one bit flipped (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of generations to run. There is no early stopping.
    pub max_generations: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to evaluate offspring in parallel using rayon.
    ///
    /// Only has an effect with the `parallel` feature. All random draws are
    /// made before evaluation, so a seeded run gives the same result either
    /// way.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            capacity: 0,
            population_size: 100,
            mutation_rate: 0.1,
            max_generations: 1000,
            seed: None,
            parallel: false,
        }
    }
}

impl GaConfig {
    /// Creates a configuration for the given capacity with default settings.
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Sets the knapsack capacity.
    pub fn with_capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    ///
    /// Zero generations is allowed and returns the initial population.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(GaError::InvalidConfig(
                "capacity must be positive".into(),
            ));
        }
        if self.population_size == 0 {
            return Err(GaError::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GaError::InvalidConfig(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}
