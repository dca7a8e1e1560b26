use serde::{Deserialize, Serialize};

use crate::ids;

/// A student registered on campus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub student_id: String,
    pub full_name: String,
    pub department: String,
    pub email: String,
    pub enrolled_course_ids: Vec<String>,
}

impl Student {
    pub fn create(full_name: &str, department: &str, email: &str) -> Self {
        Student {
            student_id: ids::new_id("STD"),
            full_name: full_name.to_string(),
            department: department.to_string(),
            email: email.to_string(),
            enrolled_course_ids: Vec::new(),
        }
    }

    pub fn enroll_course(&mut self, course_id: &str) {
        if !self.enrolled_course_ids.iter().any(|id| id == course_id) {
            self.enrolled_course_ids.push(course_id.to_string());
        }
    }

    pub fn drop_course(&mut self, course_id: &str) {
        self.enrolled_course_ids.retain(|id| id != course_id);
    }
}
