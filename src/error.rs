//! Error types for group partitioning.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors reported by the partitioning core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GroupingError {
    /// The requested number of groups is zero.
    #[error("Invalid group count: {0} (must be at least 1)")]
    InvalidGroupCount(usize),

    /// No students were supplied.
    #[error("Empty roster: no students supplied")]
    EmptyRoster,

    /// A student's personality type falls outside 0..=9.
    #[error("Invalid personality type {personality_type} for student '{student_id}'")]
    InvalidPersonalityType {
        student_id: String,
        personality_type: u8,
    },

    /// A partition does not cover the roster exactly once.
    #[error("Degenerate partition: {} missing, {} duplicated", .missing.len(), .duplicated.len())]
    DegeneratePartition {
        /// Roster indices absent from every group.
        missing: Vec<usize>,
        /// Roster indices that appear more than once.
        duplicated: Vec<usize>,
    },

    /// GA parameters are out of range.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The roster failed structural validation.
    #[error("Invalid roster: {} issue(s)", .0.len())]
    InvalidRoster(Vec<ValidationError>),
}

/// Result alias for partitioning operations.
pub type Result<T> = std::result::Result<T, GroupingError>;
