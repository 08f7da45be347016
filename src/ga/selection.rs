//! Tournament selection.

use rand::Rng;

use super::types::Individual;

/// Picks the index of the best of `tournament_size` individuals drawn
/// uniformly with replacement.
///
/// Ties go to the earliest draw. Individuals without a valid fitness
/// lose to any evaluated one.
///
/// # Panics
/// Panics if `population` is empty or `tournament_size` is 0.
pub fn tournament_select<I: Individual, R: Rng>(
    population: &[I],
    tournament_size: usize,
    rng: &mut R,
) -> usize {
    assert!(!population.is_empty(), "population cannot be empty");
    assert!(tournament_size >= 1, "tournament size must be at least 1");

    let mut best = rng.random_range(0..population.len());
    for _ in 1..tournament_size {
        let challenger = rng.random_range(0..population.len());
        if beats(&population[challenger], &population[best]) {
            best = challenger;
        }
    }
    best
}

/// Fills an offspring list of `count` clones chosen by independent
/// tournaments.
pub fn select_offspring<I: Individual, R: Rng>(
    population: &[I],
    count: usize,
    tournament_size: usize,
    rng: &mut R,
) -> Vec<I> {
    (0..count)
        .map(|_| population[tournament_select(population, tournament_size, rng)].clone())
        .collect()
}

/// Index of the highest-fitness individual, first one on ties.
pub fn best_index<I: Individual>(population: &[I]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, ind) in population.iter().enumerate() {
        match best {
            Some(b) if !beats(ind, &population[b]) => {}
            _ => best = Some(i),
        }
    }
    best
}

fn beats<I: Individual>(a: &I, b: &I) -> bool {
    match (a.fitness(), b.fitness()) {
        (Some(fa), Some(fb)) => fa > fb,
        (Some(_), None) => true,
        _ => false,
    }
}
