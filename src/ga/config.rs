//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.
//!
//! # Defaults
//!
//! ```
//! use u_grouping::ga::GaConfig;
//!
//! let config = GaConfig::default();
//! assert_eq!(config.population_size, 50);
//! assert_eq!(config.max_generations, 40);
//! assert_eq!(config.tournament_size, 3);
//! ```
//!
//! # Builder Pattern
//!
//! ```
//! use u_grouping::ga::GaConfig;
//!
//! let config = GaConfig::default()
//!     .with_population_size(80)
//!     .with_crossover_rate(0.7)
//!     .with_seed(42);
//! ```

use serde::{Deserialize, Serialize};

use super::operators::CrossoverMode;
use crate::error::{GroupingError, Result};

/// Configuration for the grouping GA.
///
/// Unset fields take their defaults when deserialized, so a service can
/// accept partial JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Number of generations to run.
    #[serde(alias = "ngen")]
    pub max_generations: usize,

    /// Probability of crossing an adjacent offspring pair (0.0–1.0).
    #[serde(alias = "cxpb")]
    pub crossover_rate: f64,

    /// Probability of mutating an offspring (0.0–1.0).
    #[serde(alias = "mutpb")]
    pub mutation_rate: f64,

    /// Individuals drawn per tournament.
    pub tournament_size: usize,

    /// How crossover handles repeated students.
    ///
    /// Applied by [`crate::optimize_partition`]; a hand-built problem
    /// carries its own operators.
    pub crossover_mode: CrossoverMode,

    /// Return the best individual seen in any generation instead of the
    /// best of the final population.
    pub track_global_best: bool,

    /// Fail with `DegeneratePartition` when the returned partition does
    /// not cover the roster exactly once.
    pub strict_coverage: bool,

    /// Run [`crate::validation::validate_roster`] before optimizing and
    /// fail with `InvalidRoster` on any issue.
    pub validate_roster: bool,

    /// Whether to evaluate individuals in parallel using rayon.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` seeds from the operating system.
    #[serde(alias = "random_seed")]
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 40,
            crossover_rate: 0.5,
            mutation_rate: 0.15,
            tournament_size: 3,
            crossover_mode: CrossoverMode::Pooled,
            track_global_best: false,
            strict_coverage: false,
            validate_roster: false,
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the crossover mode.
    pub fn with_crossover_mode(mut self, mode: CrossoverMode) -> Self {
        self.crossover_mode = mode;
        self
    }

    /// Enables or disables global-best tracking.
    pub fn with_track_global_best(mut self, enabled: bool) -> Self {
        self.track_global_best = enabled;
        self
    }

    /// Enables or disables strict coverage of the result.
    pub fn with_strict_coverage(mut self, enabled: bool) -> Self {
        self.strict_coverage = enabled;
        self
    }

    /// Enables or disables the up-front roster check.
    pub fn with_validate_roster(mut self, enabled: bool) -> Self {
        self.validate_roster = enabled;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Zero generations is allowed and returns the best of the initial
    /// population. A population of one never forms a crossover pair.
    ///
    /// # Errors
    /// `Configuration` describing the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GroupingError::Configuration(
                "population_size must be at least 1".into(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(GroupingError::Configuration(
                "tournament_size must be at least 1".into(),
            ));
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(GroupingError::Configuration(format!(
                    "{name} must be within [0, 1], got {rate}"
                )));
            }
        }
        Ok(())
    }
}
