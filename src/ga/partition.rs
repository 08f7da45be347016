//! Partition encoding for the grouping GA.
//!
//! # Encoding
//!
//! A partition is a list of groups; each group is a list of roster
//! indices (positions in the caller's student slice). Indices instead of
//! ids keep cloning cheap and let a degenerate partition hold the same
//! student twice without aliasing problems.
//!
//! # Sizing rule
//!
//! `base = N / G`, `remainder = N % G`. The first `remainder` groups hold
//! `base + 1` members, the rest hold `base`.


use rand::Rng;
use rand::seq::SliceRandom;

use super::types::Individual;
use crate::error::{GroupingError, Result};
use crate::models::{GroupAssignment, Student};

/// Group sizes for `N` students split into `G` groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSizing {
    /// Number of students (`N`).
    pub roster_len: usize,
    /// Number of groups (`G`).
    pub num_groups: usize,
    /// `N / G`.
    pub base_size: usize,
    /// `N % G`: how many leading groups get one extra member.
    pub remainder: usize,
}

impl GroupSizing {
    /// Computes the sizing rule.
    ///
    /// # Errors
    /// `InvalidGroupCount` when `num_groups == 0`, `EmptyRoster` when
    /// `roster_len == 0`.
    pub fn new(roster_len: usize, num_groups: usize) -> Result<Self> {
        if num_groups == 0 {
            return Err(GroupingError::InvalidGroupCount(num_groups));
        }
        if roster_len == 0 {
            return Err(GroupingError::EmptyRoster);
        }
        Ok(Self {
            roster_len,
            num_groups,
            base_size: roster_len / num_groups,
            remainder: roster_len % num_groups,
        })
    }

    /// Size of the `index`-th group.
    pub fn size_of(&self, index: usize) -> usize {
        if index < self.remainder {
            self.base_size + 1
        } else {
            self.base_size
        }
    }

    /// All group sizes in order.
    pub fn sizes(&self) -> Vec<usize> {
        (0..self.num_groups).map(|i| self.size_of(i)).collect()
    }

    /// Cuts groups from the front of `pool` following the sizing rule.
    ///
    /// Takes exactly `roster_len` entries; anything past that is ignored.
    /// A short pool yields short trailing groups.
    pub fn slice(&self, pool: &[usize]) -> Vec<Vec<usize>> {
        let mut groups = Vec::with_capacity(self.num_groups);
        let mut start = 0;
        for i in 0..self.num_groups {
            let end = (start + self.size_of(i)).min(pool.len());
            groups.push(pool[start..end].to_vec());
            start = end;
        }
        groups
    }
}

/// One candidate assignment of the roster into groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    groups: Vec<Vec<usize>>,
    fitness: Option<i64>,
}

impl Individual for Partition {
    type Fitness = i64;

    fn fitness(&self) -> Option<i64> {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: i64) {
        self.fitness = Some(fitness);
    }

    fn invalidate_fitness(&mut self) {
        self.fitness = None;
    }
}

impl Partition {
    /// Wraps explicit groups of roster indices. Fitness starts invalid.
    pub fn new(groups: Vec<Vec<usize>>) -> Self {
        Self {
            groups,
            fitness: None,
        }
    }

    /// Shuffles `0..sizing.roster_len` and slices it into groups.
    pub fn random<R: Rng>(sizing: &GroupSizing, rng: &mut R) -> Self {
        let mut pool: Vec<usize> = (0..sizing.roster_len).collect();
        pool.shuffle(rng);
        Self::new(sizing.slice(&pool))
    }

    /// The groups, each a list of roster indices.
    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of entries across all groups.
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Size of each group in order.
    pub fn group_sizes(&self) -> Vec<usize> {
        self.groups.iter().map(Vec::len).collect()
    }

    /// All entries, group by group.
    pub fn flatten(&self) -> Vec<usize> {
        self.groups.iter().flatten().copied().collect()
    }

    /// Replaces the groups and invalidates the cached fitness.
    pub fn replace_groups(&mut self, groups: Vec<Vec<usize>>) {
        self.groups = groups;
        self.fitness = None;
    }

    /// Whether every roster index in `0..roster_len` appears exactly once.
    pub fn covers_roster(&self, roster_len: usize) -> bool {
        self.check_coverage(roster_len).is_ok()
    }

    /// Checks the exactly-once coverage invariant.
    ///
    /// # Errors
    /// `DegeneratePartition` listing the missing and duplicated indices,
    /// both sorted ascending. Indices outside the roster count as
    /// duplicated.
    pub fn check_coverage(&self, roster_len: usize) -> Result<()> {
        let mut counts = vec![0usize; roster_len];
        let mut duplicated = Vec::new();
        for &idx in self.groups.iter().flatten() {
            match counts.get_mut(idx) {
                Some(count) => {
                    *count += 1;
                    if *count == 2 {
                        duplicated.push(idx);
                    }
                }
                None => duplicated.push(idx),
            }
        }
        let missing: Vec<usize> = counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == 0)
            .map(|(i, _)| i)
            .collect();

        if missing.is_empty() && duplicated.is_empty() {
            Ok(())
        } else {
            duplicated.sort_unstable();
            duplicated.dedup();
            Err(GroupingError::DegeneratePartition {
                missing,
                duplicated,
            })
        }
    }

    /// Student ids per group.
    ///
    /// Indices outside the roster are skipped.
    pub fn student_ids(&self, roster: &[Student]) -> Vec<Vec<String>> {
        self.groups
            .iter()
            .map(|g| {
                g.iter()
                    .filter_map(|&i| roster.get(i))
                    .map(|s| s.id.clone())
                    .collect()
            })
            .collect()
    }

    /// Numbered group assignments for the caller.
    pub fn to_assignments(&self, roster: &[Student]) -> Vec<GroupAssignment> {
        self.student_ids(roster)
            .into_iter()
            .enumerate()
            .map(|(i, ids)| GroupAssignment::new(i + 1, ids))
            .collect()
    }
}

/// Builds one random valid partition of `roster_len` students.
///
/// # Errors
/// `InvalidGroupCount` when `num_groups == 0`, `EmptyRoster` when
/// `roster_len == 0`.
pub fn random_partition<R: Rng>(
    roster_len: usize,
    num_groups: usize,
    rng: &mut R,
) -> Result<Partition> {
    let sizing = GroupSizing::new(roster_len, num_groups)?;
    Ok(Partition::random(&sizing, rng))
}
