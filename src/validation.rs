//! Input validation for grouping problems.
//!
//! Checks structural integrity of a roster before grouping. Detects:
//! - Duplicate student IDs
//! - Personality types outside 0–9
//! - More groups than students (some groups would be empty)
//! - Students listing themselves as favorite or non-favorite
//! - Preferences naming students that are not on the roster
//!
//! The optimizer itself only rejects what would make it fail (no groups,
//! no students, out-of-range types). The remaining checks are for callers
//! that want to refuse questionable input up front.

use crate::models::{MAX_PERSONALITY_TYPE, Student};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two students share the same ID.
    DuplicateId,
    /// A personality type is above 9.
    InvalidPersonalityType,
    /// Zero groups were requested.
    InvalidGroupCount,
    /// More groups than students were requested.
    TooManyGroups,
    /// The roster is empty.
    EmptyRoster,
    /// A student lists itself in a preference set.
    SelfReference,
    /// A preference names an ID that is not on the roster.
    UnknownStudentReference,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster and group count.
///
/// Checks:
/// 1. The roster is not empty and at least one group is requested
/// 2. No more groups than students
/// 3. No duplicate student IDs
/// 4. Personality types are within 0–9
/// 5. No student references itself in a preference set
/// 6. All preference references point to roster students
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(students: &[Student], num_groups: usize) -> ValidationResult {
    let mut errors = Vec::new();

    if students.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyRoster,
            "Roster has no students",
        ));
    }
    if num_groups == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidGroupCount,
            "At least one group is required",
        ));
    } else if num_groups > students.len() && !students.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooManyGroups,
            format!(
                "{num_groups} groups requested for {} students",
                students.len()
            ),
        ));
    }

    let mut ids = HashSet::new();
    for s in students {
        if !ids.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate student ID: {}", s.id),
            ));
        }
        if s.personality_type > MAX_PERSONALITY_TYPE {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPersonalityType,
                format!(
                    "Student '{}' has personality type {} (expected 0-{MAX_PERSONALITY_TYPE})",
                    s.id, s.personality_type
                ),
            ));
        }
    }

    for s in students {
        if s.likes(&s.id) || s.dislikes(&s.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::SelfReference,
                format!("Student '{}' lists itself as a preference", s.id),
            ));
        }
        for reference in s.favorites.iter().chain(&s.non_favorites) {
            if !ids.contains(reference.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownStudentReference,
                    format!(
                        "Student '{}' references unknown student '{}'",
                        s.id, reference
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
