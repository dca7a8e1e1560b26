use serde::{Deserialize, Serialize};

use crate::ids;

/// A course offered on campus.
///
/// `instructor_id` and `room_id` are weak references validated at the point of
/// assignment; `room_id` doubles as the preferred room for automatic
/// timetable generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub course_id: String,
    pub title: String,
    pub credits: u32,
    pub instructor_id: Option<String>,
    pub room_id: Option<String>,
    pub enrolled_student_ids: Vec<String>,
}

impl Course {
    pub fn create(title: &str, credits: u32, instructor_id: Option<&str>, room_id: Option<&str>) -> Self {
        Course {
            course_id: ids::new_id("CRS"),
            title: title.to_string(),
            credits,
            instructor_id: instructor_id.map(str::to_string),
            room_id: room_id.map(str::to_string),
            enrolled_student_ids: Vec::new(),
        }
    }

    pub fn enroll_student(&mut self, student_id: &str) {
        if !self.enrolled_student_ids.iter().any(|id| id == student_id) {
            self.enrolled_student_ids.push(student_id.to_string());
        }
    }

    pub fn drop_student(&mut self, student_id: &str) {
        self.enrolled_student_ids.retain(|id| id != student_id);
    }
}
