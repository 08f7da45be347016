//! Grouping entry points.
//!
//! # Algorithm
//!
//! 1. Optionally run [`validate_roster`] (`GaConfig::validate_roster`).
//! 2. Build a [`GroupingProblem`] (rejects zero groups, an empty roster
//!    and out-of-range personality types).
//! 3. Run the generational GA with the given configuration.
//! 4. Check the winner's coverage: degenerate winners fail under
//!    `strict_coverage`, otherwise they are returned and logged.

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::error::{GroupingError, Result};
use crate::ga::{
    FitnessBreakdown, GaConfig, GaRunner, GenerationStats, GeneticOperators, GroupingProblem,
    Partition,
};
use crate::models::{GroupAssignment, Student};
use crate::validation::validate_roster;

/// Input container for a grouping run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingRequest {
    /// Course the groups are formed for, copied onto every assignment.
    #[serde(default)]
    pub course_id: Option<String>,
    /// Students to group.
    pub students: Vec<Student>,
    /// Number of groups to form.
    #[serde(alias = "number_of_groups")]
    pub num_groups: usize,
    /// GA parameters.
    #[serde(default)]
    pub config: GaConfig,
}

impl GroupingRequest {
    /// Creates a request with default GA parameters.
    pub fn new(students: Vec<Student>, num_groups: usize) -> Self {
        Self {
            course_id: None,
            students,
            num_groups,
            config: GaConfig::default(),
        }
    }

    /// Sets the course the groups belong to.
    pub fn with_course_id(mut self, course_id: impl Into<String>) -> Self {
        self.course_id = Some(course_id.into());
        self
    }

    /// Sets the GA parameters.
    pub fn with_config(mut self, config: GaConfig) -> Self {
        self.config = config;
        self
    }
}

/// Result of a grouping run.
#[derive(Debug, Clone)]
pub struct GroupingOutcome {
    /// Winning partition (roster indices).
    pub partition: Partition,
    /// Winning partition as numbered groups of student ids.
    pub assignments: Vec<GroupAssignment>,
    /// Fitness of the winning partition.
    pub fitness: i64,
    /// Per-term fitness of the winning partition.
    pub breakdown: FitnessBreakdown,
    /// Whether the winner covers every student exactly once.
    pub covers_roster: bool,
    /// Per-generation statistics.
    pub history: Vec<GenerationStats<i64>>,
}

/// Partitions `students` into `num_groups` groups maximizing the
/// social-compatibility fitness.
///
/// # Errors
/// - `InvalidGroupCount` when `num_groups == 0`
/// - `EmptyRoster` when `students` is empty
/// - `InvalidPersonalityType` when a type is above 9
/// - `Configuration` when `config` is invalid
/// - `InvalidRoster` when `config.validate_roster` is set and the roster
///   has duplicate ids, dangling references or similar issues
/// - `DegeneratePartition` when `config.strict_coverage` is set and the
///   winner does not cover the roster exactly once
pub fn optimize_partition(
    students: &[Student],
    num_groups: usize,
    config: &GaConfig,
) -> Result<Partition> {
    run(students, num_groups, config).map(|outcome| outcome.partition)
}

/// Runs a grouping request and returns the winner with its statistics.
///
/// # Errors
/// Same as [`optimize_partition`].
pub fn optimize(request: &GroupingRequest) -> Result<GroupingOutcome> {
    let mut outcome = run(&request.students, request.num_groups, &request.config)?;
    if let Some(course_id) = &request.course_id {
        for assignment in &mut outcome.assignments {
            assignment.course_id = Some(course_id.clone());
        }
    }
    Ok(outcome)
}

#[instrument(
    level = "info",
    skip_all,
    fields(students = students.len(), num_groups = num_groups, seed = ?config.seed)
)]
fn run(students: &[Student], num_groups: usize, config: &GaConfig) -> Result<GroupingOutcome> {
    if config.validate_roster {
        validate_roster(students, num_groups).map_err(GroupingError::InvalidRoster)?;
    }
    let problem = GroupingProblem::new(students, num_groups)?
        .with_operators(GeneticOperators::new(config.crossover_mode));
    let result = GaRunner::run(&problem, config)?;

    let coverage = result.best.check_coverage(students.len());
    if let Err(err) = &coverage {
        if config.strict_coverage {
            return Err(err.clone());
        }
        warn!(
            error = %err,
            crossover_mode = ?config.crossover_mode,
            "returning partition that does not cover the roster exactly once"
        );
    }

    Ok(GroupingOutcome {
        assignments: result.best.to_assignments(students),
        breakdown: problem.breakdown(&result.best),
        fitness: result.best_fitness,
        covers_roster: coverage.is_ok(),
        history: result.history,
        partition: result.best,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::CrossoverMode;
    use crate::validation::ValidationErrorKind;

    fn classroom() -> Vec<Student> {
        vec![
            Student::new("s1").with_personality_type(2).with_favorite("s2"),
            Student::new("s2").with_personality_type(7).with_favorite("s1"),
            Student::new("s3").with_personality_type(5).with_non_favorite("s4"),
            Student::new("s4").with_personality_type(5).with_favorite("s3"),
            Student::new("s5").with_personality_type(9).with_favorite("s6"),
            Student::new("s6").with_personality_type(3).with_favorite("s5"),
            Student::new("s7").with_non_favorite("s1"),
        ]
    }

    #[test]
    fn test_optimize_partition_shape() {
        let config = GaConfig::default().with_seed(42);
        let p = optimize_partition(&classroom(), 3, &config).unwrap();
        assert_eq!(p.group_count(), 3);
        assert_eq!(p.group_sizes(), vec![3, 2, 2]);
    }

    #[test]
    fn test_optimize_deterministic() {
        let config = GaConfig::default().with_seed(2024);
        let a = optimize_partition(&classroom(), 2, &config).unwrap();
        let b = optimize_partition(&classroom(), 2, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_optimize_errors() {
        let config = GaConfig::default().with_seed(1);
        assert_eq!(
            optimize_partition(&classroom(), 0, &config).unwrap_err(),
            GroupingError::InvalidGroupCount(0)
        );
        assert_eq!(
            optimize_partition(&[], 2, &config).unwrap_err(),
            GroupingError::EmptyRoster
        );
        assert!(matches!(
            optimize_partition(&classroom(), 2, &config.clone().with_population_size(0)),
            Err(GroupingError::Configuration(_))
        ));
    }

    #[test]
    fn test_outcome_consistency() {
        let request = GroupingRequest::new(classroom(), 3).with_config(
            GaConfig::default()
                .with_seed(8)
                .with_crossover_mode(CrossoverMode::Repaired),
        );
        let outcome = optimize(&request).unwrap();

        assert!(outcome.covers_roster);
        assert_eq!(outcome.fitness, outcome.breakdown.total());
        assert_eq!(outcome.assignments.len(), 3);
        assert_eq!(outcome.assignments[0].group_number, 1);

        let mut ids: Vec<String> = outcome
            .assignments
            .iter()
            .flat_map(|a| a.student_ids.clone())
            .collect();
        ids.sort();
        let mut expected: Vec<String> = classroom().into_iter().map(|s| s.id).collect();
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_strict_coverage_rejects_degenerate() {
        // Always crossing with pooled crossover on a larger roster makes a
        // covering winner practically impossible.
        let students: Vec<Student> = (0..30).map(|i| Student::new(format!("s{i}"))).collect();
        let config = GaConfig::default()
            .with_seed(42)
            .with_crossover_rate(1.0)
            .with_mutation_rate(0.0)
            .with_max_generations(5)
            .with_strict_coverage(true);

        assert!(matches!(
            optimize_partition(&students, 5, &config),
            Err(GroupingError::DegeneratePartition { .. })
        ));
    }

    #[test]
    fn test_lenient_coverage_returns_degenerate() {
        let students: Vec<Student> = (0..30).map(|i| Student::new(format!("s{i}"))).collect();
        let config = GaConfig::default()
            .with_seed(42)
            .with_crossover_rate(1.0)
            .with_mutation_rate(0.0)
            .with_max_generations(5);
        let outcome = optimize(&GroupingRequest::new(students, 5).with_config(config)).unwrap();
        assert!(!outcome.covers_roster);
        assert_eq!(outcome.partition.entry_count(), 30);
    }

    #[test]
    fn test_roster_check_rejects_duplicate_id() {
        let mut students = classroom();
        students.push(Student::new("s3").with_personality_type(4));
        let config = GaConfig::default().with_seed(42).with_validate_roster(true);

        match optimize_partition(&students, 2, &config) {
            Err(GroupingError::InvalidRoster(issues)) => {
                assert!(issues
                    .iter()
                    .any(|e| e.kind == ValidationErrorKind::DuplicateId));
            }
            other => panic!("expected InvalidRoster, got {other:?}"),
        }

        // Without the check the duplicate is grouped as-is.
        let config = config.with_validate_roster(false);
        let p = optimize_partition(&students, 2, &config).unwrap();
        assert_eq!(p.entry_count(), 8);
    }

    #[test]
    fn test_roster_check_passes_clean_roster() {
        let config = GaConfig::default().with_seed(3).with_validate_roster(true);
        assert!(optimize_partition(&classroom(), 3, &config).is_ok());
    }

    #[test]
    fn test_zero_generations_allowed() {
        let config = GaConfig::default().with_seed(1).with_max_generations(0);
        let outcome =
            optimize(&GroupingRequest::new(classroom(), 3).with_config(config)).unwrap();
        assert!(outcome.covers_roster);
        assert!(outcome.history.is_empty());
    }

    #[test]
    fn test_course_id_copied_to_assignments() {
        let request = GroupingRequest::new(classroom(), 2)
            .with_course_id("math-101")
            .with_config(GaConfig::default().with_seed(6));
        let outcome = optimize(&request).unwrap();
        assert!(outcome
            .assignments
            .iter()
            .all(|a| a.course_id.as_deref() == Some("math-101")));
    }

    #[test]
    fn test_request_deserialize() {
        let json = r#"{
            "course_id": "c-7",
            "students": [
                {"id": "a", "eneatipo": 1, "favoritos": ["b"], "no_favoritos": []},
                {"id": "b", "eneatipo": 2, "favoritos": [], "no_favoritos": []}
            ],
            "number_of_groups": 1,
            "config": {"ngen": 3, "random_seed": 5}
        }"#;
        let request: GroupingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.num_groups, 1);
        assert_eq!(request.config.max_generations, 3);
        assert_eq!(request.course_id.as_deref(), Some("c-7"));

        let outcome = optimize(&request).unwrap();
        // a likes b: preferences 1, favorited_by 1; types (1,2) score 1.
        assert_eq!(outcome.fitness, 4);
    }
}
