//! Partition-rebuilding genetic operators.
//!
//! Both operators pool group members, shuffle the pool, and cut it again
//! with the sizing rule. Mutation pools one individual and therefore keeps
//! the exactly-once invariant. Crossover pools both parents (every student
//! twice) and, in [`CrossoverMode::Pooled`], may emit a child that holds a
//! student twice and misses another.
//!
//! # Usage
//!
//! ```
//! use u_grouping::ga::operators::{CrossoverMode, GeneticOperators};
//!
//! let ops = GeneticOperators::default();
//! assert_eq!(ops.crossover_mode, CrossoverMode::Pooled);
//! ```

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::partition::{GroupSizing, Partition};

/// How crossover treats duplicated and missing students.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverMode {
    /// Slice the shuffled 2N pool as is. Children may be degenerate.
    #[default]
    Pooled,
    /// Drop repeated students from the shuffled pool before slicing,
    /// so every child covers the roster exactly once.
    Repaired,
}

/// Pooled crossover: one child from the shuffled union of both parents.
///
/// The child has the group sizes of `sizing` but may repeat or omit
/// students.
pub fn pooled_crossover<R: Rng>(
    p1: &Partition,
    p2: &Partition,
    sizing: &GroupSizing,
    rng: &mut R,
) -> Partition {
    let mut pool = p1.flatten();
    pool.extend(p2.flatten());
    pool.shuffle(rng);
    Partition::new(sizing.slice(&pool))
}

/// Repaired crossover: like [`pooled_crossover`] but keeps only the first
/// occurrence of each student in the shuffled pool.
///
/// Students absent from both parents are appended in shuffled order, so
/// the child covers `0..sizing.roster_len` exactly once.
pub fn repaired_crossover<R: Rng>(
    p1: &Partition,
    p2: &Partition,
    sizing: &GroupSizing,
    rng: &mut R,
) -> Partition {
    let mut pool = p1.flatten();
    pool.extend(p2.flatten());
    pool.shuffle(rng);

    let mut seen = HashSet::with_capacity(sizing.roster_len);
    let mut unique: Vec<usize> = pool
        .into_iter()
        .filter(|&i| i < sizing.roster_len && seen.insert(i))
        .collect();

    let mut missing: Vec<usize> = (0..sizing.roster_len).filter(|i| !seen.contains(i)).collect();
    missing.shuffle(rng);
    unique.extend(missing);

    Partition::new(sizing.slice(&unique))
}

/// Shuffle mutation: re-randomizes group membership in place.
///
/// Operates on the individual's own entries, so coverage is unchanged.
pub fn shuffle_mutation<R: Rng>(partition: &mut Partition, sizing: &GroupSizing, rng: &mut R) {
    let mut pool = partition.flatten();
    pool.shuffle(rng);
    partition.replace_groups(sizing.slice(&pool));
}

/// Runtime-selectable operators for the grouping GA.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneticOperators {
    /// Crossover strategy.
    pub crossover_mode: CrossoverMode,
}

impl GeneticOperators {
    /// Operators with the given crossover mode.
    pub fn new(crossover_mode: CrossoverMode) -> Self {
        Self { crossover_mode }
    }

    /// Performs crossover using the configured mode.
    pub fn crossover<R: Rng>(
        &self,
        p1: &Partition,
        p2: &Partition,
        sizing: &GroupSizing,
        rng: &mut R,
    ) -> Partition {
        match self.crossover_mode {
            CrossoverMode::Pooled => pooled_crossover(p1, p2, sizing, rng),
            CrossoverMode::Repaired => repaired_crossover(p1, p2, sizing, rng),
        }
    }

    /// Performs mutation.
    pub fn mutate<R: Rng>(&self, partition: &mut Partition, sizing: &GroupSizing, rng: &mut R) {
        shuffle_mutation(partition, sizing, rng);
    }
}
