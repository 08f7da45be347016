//! Generational GA loop.
//!
//! # Algorithm
//!
//! 1. Create and evaluate `population_size` random individuals.
//! 2. Per generation:
//!    - tournament-select `population_size` offspring (clones);
//!    - for each adjacent pair (0,1), (2,3), … with probability
//!      `crossover_rate` replace both with crossover children;
//!    - for each offspring with probability `mutation_rate` mutate it;
//!    - evaluate every offspring whose fitness was invalidated;
//!    - replace the population with the offspring (no elitism).
//! 3. Return the best individual of the final population, or of the
//!    whole run when `track_global_best` is set.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info, instrument};

use super::config::GaConfig;
use super::selection::{best_index, select_offspring};
use super::types::{FitnessValue, GaProblem, Individual};
use crate::error::{GroupingError, Result};

/// Fitness summary of one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats<F> {
    /// Generation number, starting at 0 for the first offspring set.
    pub generation: usize,
    /// Highest fitness in the population.
    pub best: F,
    /// Mean fitness of the population.
    pub mean: f64,
    /// Lowest fitness in the population.
    pub worst: F,
    /// Individuals evaluated this generation.
    pub evaluations: usize,
}

/// Outcome of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// Best individual returned by the run.
    pub best: I,
    /// Fitness of `best`.
    pub best_fitness: I::Fitness,
    /// Generations executed.
    pub generations: usize,
    /// Total fitness evaluations, initial population included.
    pub evaluations: usize,
    /// Per-generation statistics.
    pub history: Vec<GenerationStats<I::Fitness>>,
}

/// Drives the generational loop for any [`GaProblem`].
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with a generator seeded from `config.seed`.
    ///
    /// # Errors
    /// `Configuration` when `config` fails validation.
    pub fn run<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
    ) -> Result<GaResult<P::Individual>> {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self::run_with_rng(problem, config, &mut rng)
    }

    /// Runs the GA drawing all randomness from `rng`.
    ///
    /// `config.seed` is ignored.
    ///
    /// # Errors
    /// `Configuration` when `config` fails validation.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            population_size = config.population_size,
            max_generations = config.max_generations,
        )
    )]
    pub fn run_with_rng<P: GaProblem, R: Rng>(
        problem: &P,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult<P::Individual>> {
        config.validate()?;

        let mut population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(rng))
            .collect();
        let mut evaluations = evaluate_invalid(problem, &mut population, config.parallel);

        let mut global_best = if config.track_global_best {
            best_of(&population)
        } else {
            None
        };
        let mut history = Vec::with_capacity(config.max_generations);

        for generation in 0..config.max_generations {
            let mut offspring = select_offspring(
                &population,
                config.population_size,
                config.tournament_size,
                rng,
            );

            for pair in offspring.chunks_exact_mut(2) {
                if rng.random::<f64>() < config.crossover_rate {
                    let mut child1 = problem.crossover(&pair[0], &pair[1], rng);
                    let mut child2 = problem.crossover(&pair[0], &pair[1], rng);
                    child1.invalidate_fitness();
                    child2.invalidate_fitness();
                    pair[0] = child1;
                    pair[1] = child2;
                }
            }

            for mutant in offspring.iter_mut() {
                if rng.random::<f64>() < config.mutation_rate {
                    problem.mutate(mutant, rng);
                    mutant.invalidate_fitness();
                }
            }

            let evaluated = evaluate_invalid(problem, &mut offspring, config.parallel);
            evaluations += evaluated;
            population = offspring;

            if let Some(stats) = generation_stats(generation, &population, evaluated) {
                debug!(
                    generation,
                    best = ?stats.best,
                    mean = stats.mean,
                    worst = ?stats.worst,
                    evaluated,
                    "generation complete"
                );
                history.push(stats);
            }

            if config.track_global_best {
                if let Some(candidate) = best_of(&population) {
                    let improved = match global_best.as_ref().and_then(Individual::fitness) {
                        Some(current) => candidate.fitness().is_some_and(|f| f > current),
                        None => true,
                    };
                    if improved {
                        global_best = Some(candidate);
                    }
                }
            }
        }

        let best = match global_best {
            Some(best) => best,
            None => best_of(&population).ok_or(GroupingError::Configuration(
                "population is empty".into(),
            ))?,
        };
        let best_fitness = best.fitness().unwrap_or_else(|| problem.evaluate(&best));

        info!(
            best_fitness = ?best_fitness,
            generations = config.max_generations,
            evaluations,
            "GA run finished"
        );

        Ok(GaResult {
            best,
            best_fitness,
            generations: config.max_generations,
            evaluations,
            history,
        })
    }
}

/// Evaluates individuals without a valid fitness. Returns how many were
/// evaluated.
fn evaluate_invalid<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    parallel: bool,
) -> usize {
    if parallel {
        population
            .par_iter_mut()
            .filter(|ind| !ind.has_valid_fitness())
            .map(|ind| {
                let fitness = problem.evaluate(ind);
                ind.set_fitness(fitness);
            })
            .count()
    } else {
        let mut count = 0;
        for ind in population.iter_mut().filter(|ind| !ind.has_valid_fitness()) {
            let fitness = problem.evaluate(ind);
            ind.set_fitness(fitness);
            count += 1;
        }
        count
    }
}

fn best_of<I: Individual>(population: &[I]) -> Option<I> {
    best_index(population).map(|i| population[i].clone())
}

fn generation_stats<I: Individual>(
    generation: usize,
    population: &[I],
    evaluations: usize,
) -> Option<GenerationStats<I::Fitness>> {
    let fitnesses: Vec<I::Fitness> = population.iter().filter_map(Individual::fitness).collect();
    let first = *fitnesses.first()?;
    let (mut best, mut worst) = (first, first);
    let mut sum = 0.0;
    for &f in &fitnesses {
        if f > best {
            best = f;
        }
        if f < worst {
            worst = f;
        }
        sum += f.to_f64();
    }
    Some(GenerationStats {
        generation,
        best,
        mean: sum / fitnesses.len() as f64,
        worst,
        evaluations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::operators::CrossoverMode;
    use crate::ga::partition::Partition;
    use crate::ga::problem::GroupingProblem;
    use crate::models::Student;

    fn make_roster() -> Vec<Student> {
        let mut roster = Vec::new();
        for i in 0..12 {
            let mut s = Student::new(format!("s{i}")).with_personality_type((i % 9 + 1) as u8);
            // Pair up neighbours as mutual favorites, dislike the opposite end.
            let mate = if i % 2 == 0 { i + 1 } else { i - 1 };
            s = s.with_favorite(format!("s{mate}"));
            s = s.with_non_favorite(format!("s{}", 11 - i));
            roster.push(s);
        }
        roster
    }

    fn make_problem() -> GroupingProblem {
        GroupingProblem::new(&make_roster(), 3).unwrap()
    }

    #[test]
    fn test_run_basic() {
        let problem = make_problem();
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(10)
            .with_seed(42);

        let result = GaRunner::run(&problem, &config).unwrap();
        assert_eq!(result.generations, 10);
        assert_eq!(result.history.len(), 10);
        assert_eq!(result.best.group_count(), 3);
        assert_eq!(result.best.group_sizes(), vec![4, 4, 4]);
        assert_eq!(result.best_fitness, problem.evaluate(&result.best));
        assert!(result.evaluations >= 20);
    }

    #[test]
    fn test_run_deterministic_with_seed() {
        let problem = make_problem();
        let config = GaConfig::default().with_seed(123);

        let a = GaRunner::run(&problem, &config).unwrap();
        let b = GaRunner::run(&problem, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.best_fitness, b.best_fitness);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let problem = make_problem();
        let config = GaConfig::default().with_seed(9).with_max_generations(15);

        let seq = GaRunner::run(&problem, &config.clone().with_parallel(false)).unwrap();
        let par = GaRunner::run(&problem, &config.with_parallel(true)).unwrap();
        assert_eq!(seq.best, par.best);
        assert_eq!(seq.history, par.history);
    }

    #[test]
    fn test_best_is_final_population_max() {
        let problem = make_problem();
        let config = GaConfig::default().with_seed(5).with_max_generations(8);
        let result = GaRunner::run(&problem, &config).unwrap();

        let last = result.history.last().unwrap();
        assert_eq!(result.best_fitness, last.best);
        assert!(last.mean <= last.best as f64);
        assert!(last.worst <= last.best);
    }

    #[test]
    fn test_global_best_not_worse_than_any_generation() {
        let problem = make_problem();
        let config = GaConfig::default()
            .with_seed(77)
            .with_max_generations(20)
            .with_track_global_best(true);
        let result = GaRunner::run(&problem, &config).unwrap();

        let peak = result.history.iter().map(|s| s.best).max().unwrap();
        assert!(result.best_fitness >= peak);
    }

    #[test]
    fn test_no_variation_keeps_fitness_cached() {
        let problem = make_problem();
        let config = GaConfig::default()
            .with_population_size(10)
            .with_max_generations(5)
            .with_crossover_rate(0.0)
            .with_mutation_rate(0.0)
            .with_seed(42);
        let result = GaRunner::run(&problem, &config).unwrap();

        assert_eq!(result.evaluations, 10);
        assert!(result.history.iter().all(|s| s.evaluations == 0));
    }

    #[test]
    fn test_mutation_only_preserves_coverage() {
        let problem = make_problem();
        let config = GaConfig::default()
            .with_crossover_rate(0.0)
            .with_mutation_rate(1.0)
            .with_seed(1);
        let result = GaRunner::run(&problem, &config).unwrap();
        assert!(result.best.covers_roster(12));
    }

    #[test]
    fn test_repaired_crossover_preserves_coverage() {
        let problem = make_problem().with_operators(
            crate::ga::operators::GeneticOperators::new(CrossoverMode::Repaired),
        );
        let config = GaConfig::default().with_crossover_rate(1.0).with_seed(3);
        let result = GaRunner::run(&problem, &config).unwrap();
        assert!(result.best.covers_roster(12));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let problem = make_problem();
        let config = GaConfig::default().with_population_size(0);
        assert!(matches!(
            GaRunner::run(&problem, &config),
            Err(GroupingError::Configuration(_))
        ));
    }

    #[test]
    fn test_zero_generations_returns_initial_best() {
        let problem = make_problem();
        let config = GaConfig::default()
            .with_population_size(15)
            .with_max_generations(0)
            .with_seed(42);
        let result = GaRunner::run(&problem, &config).unwrap();

        assert_eq!(result.generations, 0);
        assert!(result.history.is_empty());
        assert_eq!(result.evaluations, 15);

        // Same seed, same initial population.
        let mut rng = SmallRng::seed_from_u64(42);
        let initial_best = (0..15)
            .map(|_| {
                let p = problem.create_individual(&mut rng);
                problem.evaluate(&p)
            })
            .max()
            .unwrap();
        assert_eq!(result.best_fitness, initial_best);
        assert!(result.best.covers_roster(12));
    }

    #[test]
    fn test_single_individual_population() {
        let problem = make_problem();
        let config = GaConfig::default()
            .with_population_size(1)
            .with_max_generations(6)
            .with_crossover_rate(1.0)
            .with_seed(4);
        let result = GaRunner::run(&problem, &config).unwrap();

        assert_eq!(result.history.len(), 6);
        // No pair forms, so only mutation varies the lone individual.
        assert!(result.best.covers_roster(12));
    }

    #[test]
    fn test_generation_stats() {
        let pop: Vec<Partition> = [4, -2, 7]
            .iter()
            .map(|&f| {
                let mut p = Partition::new(vec![vec![0]]);
                p.set_fitness(f);
                p
            })
            .collect();
        let stats = generation_stats(3, &pop, 2).unwrap();
        assert_eq!(stats.generation, 3);
        assert_eq!(stats.best, 7);
        assert_eq!(stats.worst, -2);
        assert!((stats.mean - 3.0).abs() < 1e-10);
        assert_eq!(stats.evaluations, 2);
    }
}
