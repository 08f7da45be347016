//! Group assignment output.

use serde::{Deserialize, Serialize};

/// One group of a finished partition, as handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAssignment {
    /// 1-based group number, in partition order.
    pub group_number: usize,
    /// Course the group belongs to, copied from the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    /// Ids of the students placed in this group.
    pub student_ids: Vec<String>,
}

impl GroupAssignment {
    /// Creates an assignment for the given group.
    pub fn new(group_number: usize, student_ids: Vec<String>) -> Self {
        Self {
            group_number,
            course_id: None,
            student_ids,
        }
    }

    /// Tags the group with a course.
    pub fn with_course_id(mut self, course_id: impl Into<String>) -> Self {
        self.course_id = Some(course_id.into());
        self
    }
}
