//! Grouping GA problem definition.
//!
//! Implements [`GaProblem`] for partitioning a roster into groups.
//! Bridges the domain models (Student, CompatibilityMatrix) to the
//! generic GA runner.

use rand::Rng;

use super::fitness::{FitnessBreakdown, score_groups};
use super::operators::GeneticOperators;
use super::partition::{GroupSizing, Partition};
use super::types::GaProblem;
use crate::error::{GroupingError, Result};
use crate::models::{CompatibilityMatrix, MAX_PERSONALITY_TYPE, Student};

/// GA problem definition for group partitioning.
///
/// # Example
/// ```
/// use u_grouping::ga::{GaConfig, GaRunner, GroupingProblem};
/// use u_grouping::models::Student;
///
/// let students: Vec<Student> = (1..=6).map(|i| Student::new(format!("s{i}"))).collect();
/// let problem = GroupingProblem::new(&students, 2).unwrap();
/// let config = GaConfig::default().with_seed(42).with_max_generations(5);
/// let result = GaRunner::run(&problem, &config).unwrap();
/// assert_eq!(result.best.group_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct GroupingProblem {
    /// Roster; partitions refer to students by index into it.
    pub students: Vec<Student>,
    /// Group sizes derived from roster length and group count.
    pub sizing: GroupSizing,
    /// Personality-type affinity table.
    pub matrix: CompatibilityMatrix,
    /// Variation operators.
    pub operators: GeneticOperators,
}

impl GroupingProblem {
    /// Creates a problem over `students` split into `num_groups` groups.
    ///
    /// # Errors
    /// `InvalidGroupCount`, `EmptyRoster`, or `InvalidPersonalityType`
    /// for a type above 9.
    pub fn new(students: &[Student], num_groups: usize) -> Result<Self> {
        let sizing = GroupSizing::new(students.len(), num_groups)?;
        if let Some(s) = students
            .iter()
            .find(|s| s.personality_type > MAX_PERSONALITY_TYPE)
        {
            return Err(GroupingError::InvalidPersonalityType {
                student_id: s.id.clone(),
                personality_type: s.personality_type,
            });
        }
        Ok(Self {
            students: students.to_vec(),
            sizing,
            matrix: CompatibilityMatrix::enneagram(),
            operators: GeneticOperators::default(),
        })
    }

    /// Replaces the compatibility matrix.
    pub fn with_matrix(mut self, matrix: CompatibilityMatrix) -> Self {
        self.matrix = matrix;
        self
    }

    /// Replaces the variation operators.
    pub fn with_operators(mut self, operators: GeneticOperators) -> Self {
        self.operators = operators;
        self
    }

    /// Number of groups.
    pub fn num_groups(&self) -> usize {
        self.sizing.num_groups
    }

    /// Per-term fitness of a partition.
    pub fn breakdown(&self, partition: &Partition) -> FitnessBreakdown {
        score_groups(partition.groups(), &self.students, &self.matrix)
    }
}

impl GaProblem for GroupingProblem {
    type Individual = Partition;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Partition {
        Partition::random(&self.sizing, rng)
    }

    fn evaluate(&self, individual: &Partition) -> i64 {
        self.breakdown(individual).total()
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &Partition,
        parent2: &Partition,
        rng: &mut R,
    ) -> Partition {
        self.operators.crossover(parent1, parent2, &self.sizing, rng)
    }

    fn mutate<R: Rng>(&self, individual: &mut Partition, rng: &mut R) {
        self.operators.mutate(individual, &self.sizing, rng);
    }
}
