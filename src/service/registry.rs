use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::service::attendance::AttendanceService;
use crate::service::auth::AuthService;
use crate::service::booking::BookingService;
use crate::service::course::CourseService;
use crate::service::grade::GradeService;
use crate::service::instructor::InstructorService;
use crate::service::room::RoomService;
use crate::service::student::StudentService;
use crate::service::timetable::TimetableService;

/// Wires every service together over one data directory.
///
/// Construction loads all collection files up front; a missing file simply
/// starts its collection empty.
pub struct ServiceRegistry {
    pub students: Arc<StudentService>,
    pub instructors: Arc<InstructorService>,
    pub rooms: Arc<RoomService>,
    pub courses: Arc<CourseService>,
    pub timetable: Arc<TimetableService>,
    pub bookings: Arc<BookingService>,
    pub attendance: Arc<AttendanceService>,
    pub grades: Arc<GradeService>,
    pub auth: Arc<AuthService>,
}

impl ServiceRegistry {
    pub fn open(data_dir: &Path) -> Result<Self> {
        let students = Arc::new(StudentService::open(data_dir)?);
        let instructors = Arc::new(InstructorService::open(data_dir)?);
        let rooms = Arc::new(RoomService::open(data_dir)?);
        let courses = Arc::new(CourseService::open(data_dir, Arc::clone(&instructors), Arc::clone(&rooms), Arc::clone(&students))?);
        let timetable = Arc::new(TimetableService::open(data_dir, Arc::clone(&courses), Arc::clone(&rooms))?);
        let bookings = Arc::new(BookingService::open(data_dir, Arc::clone(&rooms), Arc::clone(&timetable))?);
        let attendance = Arc::new(AttendanceService::open(data_dir, Arc::clone(&students), Arc::clone(&courses))?);
        let grades = Arc::new(GradeService::open(data_dir, Arc::clone(&students), Arc::clone(&courses))?);
        let auth = Arc::new(AuthService::open(data_dir)?);
        log::info!("Service registry opened on {}", data_dir.display());
        Ok(ServiceRegistry { students, instructors, rooms, courses, timetable, bookings, attendance, grades, auth })
    }

    /// Flushes every collection to disk.
    pub fn save_all(&self) -> Result<()> {
        self.students.flush()?;
        self.instructors.flush()?;
        self.rooms.flush()?;
        self.courses.flush()?;
        self.timetable.flush()?;
        self.bookings.flush()?;
        self.attendance.flush()?;
        self.grades.flush()?;
        self.auth.flush()
    }

    /// Reloads every collection from disk, dropping unsaved in-memory state.
    pub fn reload_all(&self) -> Result<()> {
        self.students.reload()?;
        self.instructors.reload()?;
        self.rooms.reload()?;
        self.courses.reload()?;
        self.timetable.reload()?;
        self.bookings.reload()?;
        self.attendance.reload()?;
        self.grades.reload()?;
        self.auth.reload()
    }
}
