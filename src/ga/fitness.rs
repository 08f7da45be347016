//! Social-compatibility fitness.
//!
//! Each group is scored on its own and the group scores are summed:
//!
//! | Term | Sign | Counted over |
//! |------|------|--------------|
//! | compatibility | + | unordered member pairs, both classified |
//! | preferences | + ×2 | each member's favorites present in the group |
//! | non-favorite penalty | − | each member's non-favorites present in the group |
//! | favorited-by | + | ordered pairs (s, c), `c == s` included |
//! | non-favorited-by | − | ordered pairs (s, c), `c == s` included |
//!
//! The favorited-by term adds one more point per hit when `s` lists
//! itself as a favorite.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{CompatibilityMatrix, Student};

/// Per-term accumulators of a fitness evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessBreakdown {
    /// Sum of matrix scores over classified pairs.
    pub compatibility: i64,
    /// Favorites found in the same group.
    pub preferences: i64,
    /// Non-favorites found in the same group.
    pub non_favorite_penalty: i64,
    /// Times a member is listed as favorite by a groupmate.
    pub favorited_by: i64,
    /// Times a member is listed as non-favorite by a groupmate.
    pub non_favorited_by: i64,
}

impl FitnessBreakdown {
    /// Combined score (higher is better).
    pub fn total(&self) -> i64 {
        2 * self.preferences + self.compatibility + self.favorited_by
            - self.non_favorite_penalty
            - self.non_favorited_by
    }
}

impl std::ops::Add for FitnessBreakdown {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            compatibility: self.compatibility + rhs.compatibility,
            preferences: self.preferences + rhs.preferences,
            non_favorite_penalty: self.non_favorite_penalty + rhs.non_favorite_penalty,
            favorited_by: self.favorited_by + rhs.favorited_by,
            non_favorited_by: self.non_favorited_by + rhs.non_favorited_by,
        }
    }
}

impl std::iter::Sum for FitnessBreakdown {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, b| acc + b)
    }
}

/// Scores one group of roster indices.
///
/// Indices outside `roster` are ignored.
pub fn score_group(
    group: &[usize],
    roster: &[Student],
    matrix: &CompatibilityMatrix,
) -> FitnessBreakdown {
    let members: Vec<&Student> = group.iter().filter_map(|&i| roster.get(i)).collect();
    let ids: HashSet<&str> = members.iter().map(|s| s.id.as_str()).collect();
    let mut b = FitnessBreakdown::default();

    for (i, a) in members.iter().enumerate() {
        for c in &members[i + 1..] {
            b.compatibility += matrix.score(a.personality_type, c.personality_type);
        }
    }

    for s in &members {
        b.preferences += s.favorites.iter().filter(|f| ids.contains(f.as_str())).count() as i64;
        b.non_favorite_penalty += s
            .non_favorites
            .iter()
            .filter(|f| ids.contains(f.as_str()))
            .count() as i64;

        let self_favorite = s.likes(&s.id);
        for c in &members {
            if c.likes(&s.id) {
                b.favorited_by += 1;
                if self_favorite {
                    b.favorited_by += 1;
                }
            }
            if c.dislikes(&s.id) {
                b.non_favorited_by += 1;
            }
        }
    }

    b
}

/// Scores every group and sums the accumulators.
pub fn score_groups(
    groups: &[Vec<usize>],
    roster: &[Student],
    matrix: &CompatibilityMatrix,
) -> FitnessBreakdown {
    groups
        .iter()
        .map(|g| score_group(g, roster, matrix))
        .sum()
}
