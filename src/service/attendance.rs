use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;

use crate::domain::AttendanceRecord;
use crate::error::{Error, Result};
use crate::service::course::CourseService;
use crate::service::student::StudentService;
use crate::store::JsonStore;

/// Append-and-filter attendance log, backed by `attendance.json`.
pub struct AttendanceService {
    store: JsonStore<AttendanceRecord>,
    records: Mutex<Vec<AttendanceRecord>>,
    students: Arc<StudentService>,
    courses: Arc<CourseService>,
}

impl AttendanceService {
    pub fn open(data_dir: &Path, students: Arc<StudentService>, courses: Arc<CourseService>) -> Result<Self> {
        let store = JsonStore::new(data_dir, "attendance.json");
        let records = store.load()?;
        Ok(AttendanceService { store, records: Mutex::new(records), students, courses })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AttendanceRecord>> {
        self.records.lock().expect("attendance collection lock poisoned")
    }

    pub fn find_all(&self) -> Vec<AttendanceRecord> {
        self.lock().clone()
    }

    pub fn find_by_student(&self, student_id: &str) -> Vec<AttendanceRecord> {
        self.lock().iter().filter(|r| r.student_id == student_id).cloned().collect()
    }

    pub fn find_by_course(&self, course_id: &str) -> Vec<AttendanceRecord> {
        self.lock().iter().filter(|r| r.course_id == course_id).cloned().collect()
    }

    pub fn mark_attendance(&self, student_id: &str, course_id: &str, date: NaiveDate, present: bool) -> Result<AttendanceRecord> {
        if self.students.find_by_id(student_id).is_none() {
            return Err(Error::NotFound(format!("Student not found: {student_id}")));
        }
        if self.courses.find_by_id(course_id).is_none() {
            return Err(Error::NotFound(format!("Course not found: {course_id}")));
        }
        let record = AttendanceRecord::create(student_id, course_id, date, present);
        let mut records = self.lock();
        records.push(record.clone());
        self.store.save(&records)?;
        Ok(record)
    }

    /// Deleting an unknown record id is a no-op.
    pub fn delete(&self, record_id: &str) -> Result<()> {
        let mut records = self.lock();
        records.retain(|r| r.record_id != record_id);
        self.store.save(&records)
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
