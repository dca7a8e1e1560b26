use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids;

/// A single attendance entry for a student in a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub record_id: String,
    pub student_id: String,
    pub course_id: String,
    pub date: NaiveDate,
    pub present: bool,
}

impl AttendanceRecord {
    pub fn create(student_id: &str, course_id: &str, date: NaiveDate, present: bool) -> Self {
        AttendanceRecord {
            record_id: ids::new_id("ATT"),
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
            date,
            present,
        }
    }
}
