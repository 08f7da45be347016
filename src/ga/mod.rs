//! GA-based group partitioning.
//!
//! A generational genetic algorithm over partitions of a roster.
//!
//! # Encoding
//!
//! - **Partition**: `G` groups of roster indices, sized by the rule
//!   `N / G` plus one extra member for the first `N % G` groups.
//! - **Fitness**: social-compatibility score summed over groups
//!   (higher is better).
//!
//! # Submodules
//!
//! - [`operators`]: Pooled/repaired crossover and shuffle mutation
//!
//! # Reference
//! - Falkenauer (1998), "Genetic Algorithms and Grouping Problems"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

mod config;
mod fitness;
pub mod operators;
mod partition;
mod problem;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use fitness::{FitnessBreakdown, score_group, score_groups};
pub use operators::{
    CrossoverMode, GeneticOperators, pooled_crossover, repaired_crossover, shuffle_mutation,
};
pub use partition::{GroupSizing, Partition, random_partition};
pub use problem::GroupingProblem;
pub use runner::{GaResult, GaRunner, GenerationStats};
pub use selection::{best_index, select_offspring, tournament_select};
pub use types::{FitnessValue, GaProblem, Individual};
