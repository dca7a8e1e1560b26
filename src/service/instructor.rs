use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::domain::Instructor;
use crate::error::{Error, Result};
use crate::store::JsonStore;
use crate::validation;

/// CRUD operations on instructors, backed by `instructors.json`.
pub struct InstructorService {
    store: JsonStore<Instructor>,
    instructors: Mutex<Vec<Instructor>>,
}

impl InstructorService {
    pub fn open(data_dir: &Path) -> Result<Self> {
        let store = JsonStore::new(data_dir, "instructors.json");
        let instructors = store.load()?;
        Ok(InstructorService { store, instructors: Mutex::new(instructors) })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Instructor>> {
        self.instructors.lock().expect("instructor collection lock poisoned")
    }

    pub fn find_all(&self) -> Vec<Instructor> {
        self.lock().clone()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Instructor> {
        self.lock().iter().find(|i| i.instructor_id == id).cloned()
    }

    pub fn create(&self, full_name: &str, department: &str, email: &str) -> Result<Instructor> {
        validation::require_text(full_name, "Instructor name is required")?;
        validation::require_email(email)?;
        let instructor = Instructor::create(full_name, department, email);
        let mut instructors = self.lock();
        instructors.push(instructor.clone());
        self.store.save(&instructors)?;
        Ok(instructor)
    }

    pub fn update(&self, instructor: &Instructor) -> Result<Instructor> {
        validation::require_text(&instructor.full_name, "Instructor name is required")?;
        validation::require_email(&instructor.email)?;
        let mut instructors = self.lock();
        let existing = instructors
            .iter_mut()
            .find(|i| i.instructor_id == instructor.instructor_id)
            .ok_or_else(|| Error::NotFound(format!("Instructor not found: {}", instructor.instructor_id)))?;
        existing.full_name = instructor.full_name.clone();
        existing.department = instructor.department.clone();
        existing.email = instructor.email.clone();
        let updated = existing.clone();
        self.store.save(&instructors)?;
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let mut instructors = self.lock();
        let before = instructors.len();
        instructors.retain(|i| i.instructor_id != id);
        if instructors.len() == before {
            return Err(Error::NotFound(format!("Instructor not found: {id}")));
        }
        self.store.save(&instructors)
    }

    pub fn assign_course(&self, instructor_id: &str, course_id: &str) -> Result<()> {
        let mut instructors = self.lock();
        let instructor = instructors
            .iter_mut()
            .find(|i| i.instructor_id == instructor_id)
            .ok_or_else(|| Error::NotFound(format!("Instructor not found: {instructor_id}")))?;
        instructor.assign_course(course_id);
        self.store.save(&instructors)
    }

    pub fn unassign_course(&self, instructor_id: &str, course_id: &str) -> Result<()> {
        let mut instructors = self.lock();
        let instructor = instructors
            .iter_mut()
            .find(|i| i.instructor_id == instructor_id)
            .ok_or_else(|| Error::NotFound(format!("Instructor not found: {instructor_id}")))?;
        instructor.unassign_course(course_id);
        self.store.save(&instructors)
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
