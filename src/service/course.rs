use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::Course;
use crate::error::{Error, Result};
use crate::service::instructor::InstructorService;
use crate::service::room::RoomService;
use crate::service::student::StudentService;
use crate::store::JsonStore;
use crate::validation;

/// Course lifecycle and enrollment, backed by `courses.json`.
///
/// Instructor assignments and student enrollments are kept bidirectional:
/// mutations here fan out to the instructor and student collections. Locks
/// are only ever taken in the order courses -> instructors/students, so the
/// cross-service calls cannot deadlock.
pub struct CourseService {
    store: JsonStore<Course>,
    courses: Mutex<Vec<Course>>,
    instructors: Arc<InstructorService>,
    rooms: Arc<RoomService>,
    students: Arc<StudentService>,
}

impl CourseService {
    pub fn open(data_dir: &Path, instructors: Arc<InstructorService>, rooms: Arc<RoomService>, students: Arc<StudentService>) -> Result<Self> {
        let store = JsonStore::new(data_dir, "courses.json");
        let courses = store.load()?;
        Ok(CourseService { store, courses: Mutex::new(courses), instructors, rooms, students })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Course>> {
        self.courses.lock().expect("course collection lock poisoned")
    }

    pub fn find_all(&self) -> Vec<Course> {
        self.lock().clone()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Course> {
        self.lock().iter().find(|c| c.course_id == id).cloned()
    }

    pub fn create(&self, title: &str, credits: u32, instructor_id: Option<&str>, room_id: Option<&str>) -> Result<Course> {
        validation::require_text(title, "Course title is required")?;
        validation::require_positive(credits, "Credits must be positive")?;
        if let Some(id) = instructor_id {
            if self.instructors.find_by_id(id).is_none() {
                return Err(Error::NotFound(format!("Instructor not found: {id}")));
            }
        }
        if let Some(id) = room_id {
            if self.rooms.find_by_id(id).is_none() {
                return Err(Error::NotFound(format!("Room not found: {id}")));
            }
        }
        let course = Course::create(title, credits, instructor_id, room_id);
        let mut courses = self.lock();
        courses.push(course.clone());
        if let Some(id) = instructor_id {
            self.instructors.assign_course(id, &course.course_id)?;
        }
        self.store.save(&courses)?;
        Ok(course)
    }

    /// Overwrites title, credits and the instructor/room references, keeping
    /// the instructor's course list in sync with the reassignment.
    pub fn update(&self, course: &Course) -> Result<Course> {
        validation::require_text(&course.title, "Course title is required")?;
        validation::require_positive(course.credits, "Credits must be positive")?;
        if let Some(id) = course.instructor_id.as_deref() {
            if self.instructors.find_by_id(id).is_none() {
                return Err(Error::NotFound(format!("Instructor not found: {id}")));
            }
        }
        if let Some(id) = course.room_id.as_deref() {
            if self.rooms.find_by_id(id).is_none() {
                return Err(Error::NotFound(format!("Room not found: {id}")));
            }
        }
        let mut courses = self.lock();
        let existing = courses
            .iter_mut()
            .find(|c| c.course_id == course.course_id)
            .ok_or_else(|| Error::NotFound(format!("Course not found: {}", course.course_id)))?;
        existing.title = course.title.clone();
        existing.credits = course.credits;
        if existing.instructor_id != course.instructor_id {
            if let Some(old) = existing.instructor_id.as_deref() {
                self.instructors.unassign_course(old, &existing.course_id)?;
            }
            if let Some(new) = course.instructor_id.as_deref() {
                self.instructors.assign_course(new, &existing.course_id)?;
            }
        }
        existing.instructor_id = course.instructor_id.clone();
        existing.room_id = course.room_id.clone();
        let updated = existing.clone();
        self.store.save(&courses)?;
        Ok(updated)
    }

    /// Removes the course together with its instructor assignment and the
    /// enrollment entries held by its students.
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut courses = self.lock();
        let index = courses
            .iter()
            .position(|c| c.course_id == id)
            .ok_or_else(|| Error::NotFound(format!("Course not found: {id}")))?;
        let existing = courses.remove(index);
        if let Some(instructor_id) = existing.instructor_id.as_deref() {
            self.instructors.unassign_course(instructor_id, &existing.course_id)?;
        }
        for student_id in &existing.enrolled_student_ids {
            self.students.drop_from_course(student_id, &existing.course_id)?;
        }
        self.store.save(&courses)
    }

    pub fn enroll_student(&self, course_id: &str, student_id: &str) -> Result<()> {
        if self.students.find_by_id(student_id).is_none() {
            return Err(Error::NotFound(format!("Student not found: {student_id}")));
        }
        let mut courses = self.lock();
        let course = courses
            .iter_mut()
            .find(|c| c.course_id == course_id)
            .ok_or_else(|| Error::NotFound(format!("Course not found: {course_id}")))?;
        course.enroll_student(student_id);
        self.students.enroll_in_course(student_id, course_id)?;
        self.store.save(&courses)
    }

    pub fn drop_student(&self, course_id: &str, student_id: &str) -> Result<()> {
        let mut courses = self.lock();
        let course = courses
            .iter_mut()
            .find(|c| c.course_id == course_id)
            .ok_or_else(|| Error::NotFound(format!("Course not found: {course_id}")))?;
        course.drop_student(student_id);
        self.students.drop_from_course(student_id, course_id)?;
        self.store.save(&courses)
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
