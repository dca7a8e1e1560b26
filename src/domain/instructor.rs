use serde::{Deserialize, Serialize};

use crate::ids;

/// An instructor able to teach courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    pub instructor_id: String,
    pub full_name: String,
    pub department: String,
    pub email: String,
    pub course_ids: Vec<String>,
}

impl Instructor {
    pub fn create(full_name: &str, department: &str, email: &str) -> Self {
        Instructor {
            instructor_id: ids::new_id("INS"),
            full_name: full_name.to_string(),
            department: department.to_string(),
            email: email.to_string(),
            course_ids: Vec::new(),
        }
    }

    pub fn assign_course(&mut self, course_id: &str) {
        if !self.course_ids.iter().any(|id| id == course_id) {
            self.course_ids.push(course_id.to_string());
        }
    }

    pub fn unassign_course(&mut self, course_id: &str) {
        self.course_ids.retain(|id| id != course_id);
    }
}
