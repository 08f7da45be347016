//! Personality-type compatibility matrix.
//!
//! Scores pairwise affinity between enneatypes 1–9. A score of 1 means the
//! two types work well together, 0 means no affinity. Unclassified
//! students (type 0) have no row and never score.

use serde::{Deserialize, Serialize};

use super::student::MAX_PERSONALITY_TYPE;

const TYPES: usize = MAX_PERSONALITY_TYPE as usize;

/// Enneatype affinity table used for every grouping run.
pub const ENNEAGRAM_COMPATIBILITY: [[i64; TYPES]; TYPES] = [
    [0, 1, 0, 1, 1, 1, 1, 0, 0],
    [1, 1, 1, 1, 1, 0, 1, 1, 0],
    [0, 1, 1, 0, 1, 0, 1, 0, 1],
    [1, 1, 0, 1, 0, 0, 0, 1, 0],
    [1, 1, 1, 0, 1, 1, 1, 0, 0],
    [1, 0, 0, 0, 1, 0, 1, 0, 1],
    [1, 1, 1, 0, 1, 1, 1, 1, 0],
    [0, 1, 0, 1, 0, 0, 1, 0, 1],
    [0, 0, 1, 0, 0, 1, 0, 1, 1],
];

/// Pairwise compatibility lookup between personality types.
///
/// Rows and columns are indexed by `type - 1`. Lookups are made in the
/// order the pair is visited, so an asymmetric table is honored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityMatrix {
    scores: [[i64; TYPES]; TYPES],
}

impl CompatibilityMatrix {
    /// Creates a matrix from explicit scores.
    pub fn new(scores: [[i64; TYPES]; TYPES]) -> Self {
        Self { scores }
    }

    /// The fixed enneagram table.
    pub fn enneagram() -> Self {
        Self::new(ENNEAGRAM_COMPATIBILITY)
    }

    /// Score between two personality types.
    ///
    /// Returns 0 when either type is unclassified (0) or out of range.
    pub fn score(&self, a: u8, b: u8) -> i64 {
        match (Self::index(a), Self::index(b)) {
            (Some(i), Some(j)) => self.scores[i][j],
            _ => 0,
        }
    }

    fn index(personality_type: u8) -> Option<usize> {
        if (1..=MAX_PERSONALITY_TYPE).contains(&personality_type) {
            Some(personality_type as usize - 1)
        } else {
            None
        }
    }
}

impl Default for CompatibilityMatrix {
    fn default() -> Self {
        Self::enneagram()
    }
}
