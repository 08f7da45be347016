//! Core GA traits.
//!
//! A problem implements [`GaProblem`]; [`super::GaRunner`] drives the
//! generational loop over its individuals. Higher fitness is better
//! (maximization).

use rand::Rng;

/// Scalar fitness value.
pub trait FitnessValue: Copy + PartialOrd + Send + Sync + std::fmt::Debug {
    /// Lossy conversion used for population statistics.
    fn to_f64(self) -> f64;
}

impl FitnessValue for i64 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// A candidate solution carrying a cached fitness.
pub trait Individual: Clone + Send + Sync {
    /// Fitness type. Larger compares as better.
    type Fitness: FitnessValue;

    /// Cached fitness, `None` when invalidated or never evaluated.
    fn fitness(&self) -> Option<Self::Fitness>;

    /// Stores a freshly computed fitness.
    fn set_fitness(&mut self, fitness: Self::Fitness);

    /// Drops the cached fitness after a structural change.
    fn invalidate_fitness(&mut self);

    /// Whether the cached fitness is current.
    fn has_valid_fitness(&self) -> bool {
        self.fitness().is_some()
    }
}

/// Problem definition for the generational GA.
///
/// Every source of randomness is passed in explicitly; `evaluate` must be
/// pure so it can run in parallel.
pub trait GaProblem: Send + Sync {
    /// Individual type.
    type Individual: Individual;

    /// Creates a fresh random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Computes the fitness of an individual.
    fn evaluate(
        &self,
        individual: &Self::Individual,
    ) -> <Self::Individual as Individual>::Fitness;

    /// Produces one child from two parents.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        rng: &mut R,
    ) -> Self::Individual;

    /// Mutates an individual in place.
    fn mutate<R: Rng>(&self, individual: &mut Self::Individual, rng: &mut R);
}
