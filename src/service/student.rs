use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::domain::Student;
use crate::error::{Error, Result};
use crate::store::JsonStore;
use crate::validation;

/// CRUD operations on students, backed by `students.json`.
///
/// The collection and its persistence round-trip are guarded by a single
/// mutex so every read-modify-write sequence stays atomic.
pub struct StudentService {
    store: JsonStore<Student>,
    students: Mutex<Vec<Student>>,
}

impl StudentService {
    pub fn open(data_dir: &Path) -> Result<Self> {
        let store = JsonStore::new(data_dir, "students.json");
        let students = store.load()?;
        Ok(StudentService { store, students: Mutex::new(students) })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Student>> {
        self.students.lock().expect("student collection lock poisoned")
    }

    pub fn find_all(&self) -> Vec<Student> {
        self.lock().clone()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Student> {
        self.lock().iter().find(|s| s.student_id == id).cloned()
    }

    pub fn create(&self, full_name: &str, department: &str, email: &str) -> Result<Student> {
        validation::require_text(full_name, "Student name is required")?;
        validation::require_text(department, "Student department is required")?;
        validation::require_email(email)?;
        let student = Student::create(full_name, department, email);
        let mut students = self.lock();
        students.push(student.clone());
        self.store.save(&students)?;
        Ok(student)
    }

    /// Overwrites the mutable fields of an existing student.
    pub fn update(&self, student: &Student) -> Result<Student> {
        validation::require_text(&student.full_name, "Student name is required")?;
        validation::require_email(&student.email)?;
        let mut students = self.lock();
        let existing = students
            .iter_mut()
            .find(|s| s.student_id == student.student_id)
            .ok_or_else(|| Error::NotFound(format!("Student not found: {}", student.student_id)))?;
        existing.full_name = student.full_name.clone();
        existing.department = student.department.clone();
        existing.email = student.email.clone();
        let updated = existing.clone();
        self.store.save(&students)?;
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let mut students = self.lock();
        let before = students.len();
        students.retain(|s| s.student_id != id);
        if students.len() == before {
            return Err(Error::NotFound(format!("Student not found: {id}")));
        }
        self.store.save(&students)
    }

    pub fn enroll_in_course(&self, student_id: &str, course_id: &str) -> Result<()> {
        let mut students = self.lock();
        let student = students
            .iter_mut()
            .find(|s| s.student_id == student_id)
            .ok_or_else(|| Error::NotFound(format!("Student not found: {student_id}")))?;
        student.enroll_course(course_id);
        self.store.save(&students)
    }

    pub fn drop_from_course(&self, student_id: &str, course_id: &str) -> Result<()> {
        let mut students = self.lock();
        let student = students
            .iter_mut()
            .find(|s| s.student_id == student_id)
            .ok_or_else(|| Error::NotFound(format!("Student not found: {student_id}")))?;
        student.drop_course(course_id);
        self.store.save(&students)
    }

    /// Rewrites the backing file from the in-memory list.
    pub fn flush(&self) -> Result<()> {
        self.store.save(&self.lock())
    }

    /// Discards the in-memory list and reloads it from disk.
    pub fn reload(&self) -> Result<()> {
        let loaded = self.store.load()?;
        *self.lock() = loaded;
        Ok(())
    }
}
