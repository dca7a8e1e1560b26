use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::GradeReport;
use crate::error::{Error, Result};
use crate::service::course::CourseService;
use crate::service::student::StudentService;
use crate::store::JsonStore;

/// Grade reports per student and course, backed by `grades.json`.
pub struct GradeService {
    store: JsonStore<GradeReport>,
    reports: Mutex<Vec<GradeReport>>,
    students: Arc<StudentService>,
    courses: Arc<CourseService>,
}

impl GradeService {
    pub fn open(data_dir: &Path, students: Arc<StudentService>, courses: Arc<CourseService>) -> Result<Self> {
        let store = JsonStore::new(data_dir, "grades.json");
        let reports = store.load()?;
        Ok(GradeService { store, reports: Mutex::new(reports), students, courses })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<GradeReport>> {
        self.reports.lock().expect("grade collection lock poisoned")
    }

    pub fn find_all(&self) -> Vec<GradeReport> {
        self.lock().clone()
    }

    pub fn find_by_student(&self, student_id: &str) -> Vec<GradeReport> {
        self.lock().iter().filter(|r| r.student_id == student_id).cloned().collect()
    }

    pub fn find_by_course(&self, course_id: &str) -> Vec<GradeReport> {
        self.lock().iter().filter(|r| r.course_id == course_id).cloned().collect()
    }

    pub fn record_grade(&self, student_id: &str, course_id: &str, score: f64, remarks: &str) -> Result<GradeReport> {
        if self.students.find_by_id(student_id).is_none() {
            return Err(Error::NotFound(format!("Student not found: {student_id}")));
        }
        if self.courses.find_by_id(course_id).is_none() {
            return Err(Error::NotFound(format!("Course not found: {course_id}")));
        }
        let letter = letter_grade(score);
        let report = GradeReport::create(student_id, course_id, score, letter, remarks);
        let mut reports = self.lock();
        reports.push(report.clone());
        self.store.save(&reports)?;
        Ok(report)
    }

    /// Deleting an unknown report id is a no-op.
    pub fn delete(&self, report_id: &str) -> Result<()> {
        let mut reports = self.lock();
        reports.retain(|r| r.report_id != report_id);
        self.store.save(&reports)
    }

    pub fn flush(&self) -> Result<()> {
        self.store.save(&self.lock())
    }

    pub fn reload(&self) -> Result<()> {
        let loaded = self.store.load()?;
        *self.lock() = loaded;
        Ok(())
    }
}

fn letter_grade(score: f64) -> &'static str {
    if score >= 90.0 {
        "A"
    } else if score >= 80.0 {
        "B"
    } else if score >= 70.0 {
        "C"
    } else if score >= 60.0 {
        "D"
    } else {
        "F"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_grade_boundaries() {
        assert_eq!(letter_grade(95.0), "A");
        assert_eq!(letter_grade(90.0), "A");
        assert_eq!(letter_grade(89.9), "B");
        assert_eq!(letter_grade(70.0), "C");
        assert_eq!(letter_grade(60.0), "D");
        assert_eq!(letter_grade(59.9), "F");
    }
}
