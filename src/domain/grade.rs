use serde::{Deserialize, Serialize};

use crate::ids;

/// Grading outcome for a student inside a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    pub report_id: String,
    pub student_id: String,
    pub course_id: String,
    pub score: f64,
    pub letter_grade: String,
    pub remarks: String,
}

impl GradeReport {
    pub fn create(student_id: &str, course_id: &str, score: f64, letter_grade: &str, remarks: &str) -> Self {
        GradeReport {
            report_id: ids::new_id("GRD"),
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
            score,
            letter_grade: letter_grade.to_string(),
            remarks: remarks.to_string(),
        }
    }
}
