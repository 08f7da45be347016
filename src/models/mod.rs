//! Grouping domain models.
//!
//! Provides the input and output types of a grouping problem.
//!
//! # Domain Mappings
//!
//! | u-grouping | Classroom | Workshop | Sports |
//! |------------|-----------|----------|--------|
//! | Student | Student | Participant | Player |
//! | personality_type | Enneatype | Role profile | Position |
//! | GroupAssignment | Project team | Breakout room | Squad |

mod assignment;
mod compatibility;
mod student;

pub use assignment::GroupAssignment;
pub use compatibility::{CompatibilityMatrix, ENNEAGRAM_COMPATIBILITY};
pub use student::{MAX_PERSONALITY_TYPE, Student, UNCLASSIFIED};
