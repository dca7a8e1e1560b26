use std::io::{self, BufRead, Write};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};

use crate::domain::schedule::parse_time;
use crate::domain::{DayOfWeek, RoomType};
use crate::error::Result;
use crate::service::ServiceRegistry;

/// Menu driven console front end.
///
/// Every service error is caught, printed as `Operation failed: ...` and the
/// menu loop resumes; only stdin/stdout failures abort the session.
pub struct Console {
    registry: ServiceRegistry,
}

/// Prints the outcome of a service call without leaving the menu loop.
fn report(outcome: Result<String>) {
    match outcome {
        Ok(message) => println!("{message}"),
        Err(e) => println!("Operation failed: {e}"),
    }
}

impl Console {
    pub fn new(registry: ServiceRegistry) -> Self {
        Console { registry }
    }

    pub fn run(&self) -> io::Result<()> {
        println!("=== Campus Resource Management System ===");
        if !self.login()? {
            return Ok(());
        }
        loop {
            println!("\nMain Menu");
            println!("1. Manage Students");
            println!("2. Manage Instructors");
            println!("3. Manage Courses");
            println!("4. Manage Rooms");
            println!("5. Manage Timetables");
            println!("6. Book Rooms");
            println!("7. Attendance");
            println!("8. Grade Reports");
            println!("9. Save & Load Data");
            println!("0. Exit");
            match self.prompt("Select: ")?.as_str() {
                "1" => self.manage_students()?,
                "2" => self.manage_instructors()?,
                "3" => self.manage_courses()?,
                "4" => self.manage_rooms()?,
                "5" => self.manage_timetables()?,
                "6" => self.manage_bookings()?,
                "7" => self.manage_attendance()?,
                "8" => self.manage_grades()?,
                "9" => self.manage_data()?,
                "0" => break,
                _ => println!("Invalid option."),
            }
        }
        println!("Goodbye!");
        Ok(())
    }

    fn login(&self) -> io::Result<bool> {
        for _ in 0..3 {
            let username = self.prompt("Username: ")?;
            let password = self.prompt("Password: ")?;
            match self.registry.auth.login(&username, &password) {
                Ok(admin) => {
                    println!("Welcome, {}!", admin.full_name);
                    return Ok(true);
                }
                Err(e) => println!("Login failed: {e}"),
            }
        }
        println!("Too many failed attempts.");
        Ok(false)
    }

    // --- students ---

    fn manage_students(&self) -> io::Result<()> {
        loop {
            println!("\nStudents Menu");
            println!("1. List students");
            println!("2. Create student");
            println!("3. Update student");
            println!("4. Delete student");
            println!("5. Enroll student in course");
            println!("0. Back");
            match self.prompt("Select: ")?.as_str() {
                "1" => {
                    let students = self.registry.students.find_all();
                    println!("Students ({})", students.len());
                    for s in students {
                        println!("{} | {} | {} | {}", s.student_id, s.full_name, s.department, s.email);
                    }
                }
                "2" => {
                    let name = self.prompt("Full name: ")?;
                    let department = self.prompt("Department: ")?;
                    let email = self.prompt("Email: ")?;
                    report(self.registry.students.create(&name, &department, &email).map(|s| format!("Created {}", s.student_id)));
                }
                "3" => self.update_student()?,
                "4" => {
                    let id = self.prompt("Student ID: ")?;
                    report(self.registry.students.delete(&id).map(|_| "Removed student.".to_string()));
                }
                "5" => {
                    let course_id = self.prompt("Course ID: ")?;
                    let student_id = self.prompt("Student ID: ")?;
                    report(self.registry.courses.enroll_student(&course_id, &student_id).map(|_| "Enrollment completed.".to_string()));
                }
                "0" => return Ok(()),
                _ => println!("Invalid option."),
            }
        }
    }

    fn update_student(&self) -> io::Result<()> {
        let id = self.prompt("Student ID: ")?;
        let Some(mut student) = self.registry.students.find_by_id(&id) else {
            println!("Operation failed: Student not found: {id}");
            return Ok(());
        };
        student.full_name = self.prompt_optional("Name", &student.full_name)?;
        student.department = self.prompt_optional("Department", &student.department)?;
        student.email = self.prompt_optional("Email", &student.email)?;
        report(self.registry.students.update(&student).map(|_| "Updated student.".to_string()));
        Ok(())
    }

    // --- instructors ---

    fn manage_instructors(&self) -> io::Result<()> {
        loop {
            println!("\nInstructors Menu");
            println!("1. List instructors");
            println!("2. Create instructor");
            println!("3. Update instructor");
            println!("4. Delete instructor");
            println!("0. Back");
            match self.prompt("Select: ")?.as_str() {
                "1" => {
                    let instructors = self.registry.instructors.find_all();
                    println!("Instructors ({})", instructors.len());
                    for i in instructors {
                        println!("{} | {} | {} | {}", i.instructor_id, i.full_name, i.department, i.email);
                    }
                }
                "2" => {
                    let name = self.prompt("Full name: ")?;
                    let department = self.prompt("Department: ")?;
                    let email = self.prompt("Email: ")?;
                    report(self.registry.instructors.create(&name, &department, &email).map(|i| format!("Created {}", i.instructor_id)));
                }
                "3" => self.update_instructor()?,
                "4" => {
                    let id = self.prompt("Instructor ID: ")?;
                    report(self.registry.instructors.delete(&id).map(|_| "Instructor deleted.".to_string()));
                }
                "0" => return Ok(()),
                _ => println!("Invalid option."),
            }
        }
    }

    fn update_instructor(&self) -> io::Result<()> {
        let id = self.prompt("Instructor ID: ")?;
        let Some(mut instructor) = self.registry.instructors.find_by_id(&id) else {
            println!("Operation failed: Instructor not found: {id}");
            return Ok(());
        };
        instructor.full_name = self.prompt_optional("Name", &instructor.full_name)?;
        instructor.department = self.prompt_optional("Department", &instructor.department)?;
        instructor.email = self.prompt_optional("Email", &instructor.email)?;
        report(self.registry.instructors.update(&instructor).map(|_| "Updated instructor.".to_string()));
        Ok(())
    }

    // --- courses ---

    fn manage_courses(&self) -> io::Result<()> {
        loop {
            println!("\nCourses Menu");
            println!("1. List courses");
            println!("2. Create course");
            println!("3. Update course");
            println!("4. Delete course");
            println!("5. Enroll student");
            println!("0. Back");
            match self.prompt("Select: ")?.as_str() {
                "1" => {
                    let courses = self.registry.courses.find_all();
                    println!("Courses ({})", courses.len());
                    for c in courses {
                        println!(
                            "{} | {} | {} credits | instructor: {} | room: {}",
                            c.course_id,
                            c.title,
                            c.credits,
                            c.instructor_id.as_deref().unwrap_or("-"),
                            c.room_id.as_deref().unwrap_or("-")
                        );
                    }
                }
                "2" => {
                    let title = self.prompt("Title: ")?;
                    let credits = self.prompt_u32("Credits: ")?;
                    let instructor = self.prompt("Instructor ID (blank for none): ")?;
                    let room = self.prompt("Room ID (blank for none): ")?;
                    let instructor = (!instructor.is_empty()).then_some(instructor);
                    let room = (!room.is_empty()).then_some(room);
                    report(
                        self.registry
                            .courses
                            .create(&title, credits, instructor.as_deref(), room.as_deref())
                            .map(|c| format!("Created {}", c.course_id)),
                    );
                }
                "3" => self.update_course()?,
                "4" => {
                    let id = self.prompt("Course ID: ")?;
                    report(self.registry.courses.delete(&id).map(|_| "Course deleted.".to_string()));
                }
                "5" => {
                    let course_id = self.prompt("Course ID: ")?;
                    let student_id = self.prompt("Student ID: ")?;
                    report(self.registry.courses.enroll_student(&course_id, &student_id).map(|_| "Student enrolled.".to_string()));
                }
                "0" => return Ok(()),
                _ => println!("Invalid option."),
            }
        }
    }

    fn update_course(&self) -> io::Result<()> {
        let id = self.prompt("Course ID: ")?;
        let Some(mut course) = self.registry.courses.find_by_id(&id) else {
            println!("Operation failed: Course not found: {id}");
            return Ok(());
        };
        course.title = self.prompt_optional("Title", &course.title)?;
        course.credits = self.prompt_u32(&format!("Credits ({}): ", course.credits))?;
        let instructor = self.prompt("Instructor ID (blank for none): ")?;
        course.instructor_id = (!instructor.is_empty()).then_some(instructor);
        let room = self.prompt("Room ID (blank for none): ")?;
        course.room_id = (!room.is_empty()).then_some(room);
        report(self.registry.courses.update(&course).map(|_| "Updated course.".to_string()));
        Ok(())
    }

    // --- rooms ---

    fn manage_rooms(&self) -> io::Result<()> {
        loop {
            println!("\nRooms Menu");
            println!("1. List rooms");
            println!("2. Create room");
            println!("3. Update room");
            println!("4. Delete room");
            println!("0. Back");
            match self.prompt("Select: ")?.as_str() {
                "1" => {
                    let rooms = self.registry.rooms.find_all();
                    println!("Rooms ({})", rooms.len());
                    for r in rooms {
                        println!("{} | {} | capacity {} | {}", r.room_id, r.name, r.capacity, r.room_type);
                    }
                }
                "2" => {
                    let name = self.prompt("Room name: ")?;
                    let capacity = self.prompt_u32("Capacity: ")?;
                    let room_type = self.prompt_room_type()?;
                    report(self.registry.rooms.create(&name, capacity, room_type).map(|r| format!("Created room {}", r.room_id)));
                }
                "3" => self.update_room()?,
                "4" => {
                    let id = self.prompt("Room ID: ")?;
                    report(self.registry.rooms.delete(&id).map(|_| "Room deleted.".to_string()));
                }
                "0" => return Ok(()),
                _ => println!("Invalid option."),
            }
        }
    }

    fn update_room(&self) -> io::Result<()> {
        let id = self.prompt("Room ID: ")?;
        let Some(mut room) = self.registry.rooms.find_by_id(&id) else {
            println!("Operation failed: Room not found: {id}");
            return Ok(());
        };
        room.name = self.prompt_optional("Name", &room.name)?;
        room.capacity = self.prompt_u32(&format!("Capacity ({}): ", room.capacity))?;
        room.room_type = self.prompt_room_type()?;
        report(self.registry.rooms.update(&room).map(|_| "Room updated.".to_string()));
        Ok(())
    }

    // --- timetable ---

    fn manage_timetables(&self) -> io::Result<()> {
        loop {
            println!("\nTimetable Menu");
            println!("1. List slots");
            println!("2. Generate automatic timetable");
            println!("3. Create slot");
            println!("4. Delete slot");
            println!("0. Back");
            match self.prompt("Select: ")?.as_str() {
                "1" => {
                    let slots = self.registry.timetable.find_all();
                    println!("Schedule Slots ({})", slots.len());
                    for s in slots {
                        println!(
                            "{} | course {} | room {} | {} {}-{}",
                            s.slot_id,
                            s.course_id,
                            s.room_id,
                            s.day_of_week,
                            s.start_time.format("%H:%M"),
                            s.end_time.format("%H:%M")
                        );
                    }
                }
                "2" => report(self.registry.timetable.generate_automatic_timetable().map(|slots| format!("Generated timetable entries: {}", slots.len()))),
                "3" => {
                    let course_id = self.prompt("Course ID: ")?;
                    let room_id = self.prompt("Room ID: ")?;
                    let day = self.prompt_day_of_week()?;
                    let start = self.prompt_time("Start time (HH:MM): ")?;
                    let end = self.prompt_time("End time (HH:MM): ")?;
                    report(self.registry.timetable.schedule_course(&course_id, &room_id, day, start, end).map(|_| "Slot created.".to_string()));
                }
                "4" => {
                    let slot_id = self.prompt("Slot ID to delete: ")?;
                    report(self.registry.timetable.delete_slot(&slot_id).map(|_| "Slot deleted.".to_string()));
                }
                "0" => return Ok(()),
                _ => println!("Invalid option."),
            }
        }
    }

    // --- bookings ---

    fn manage_bookings(&self) -> io::Result<()> {
        loop {
            println!("\nBooking Menu");
            println!("1. List bookings");
            println!("2. Request booking");
            println!("3. Approve booking");
            println!("4. Reject booking");
            println!("5. Cancel booking");
            println!("0. Back");
            match self.prompt("Select: ")?.as_str() {
                "1" => {
                    let bookings = self.registry.bookings.find_all();
                    println!("Bookings ({})", bookings.len());
                    for b in bookings {
                        println!(
                            "{} | room {} | {} | {} {}-{} | {:?} | {}",
                            b.booking_id,
                            b.room_id,
                            b.requester,
                            b.date,
                            b.start_time.format("%H:%M"),
                            b.end_time.format("%H:%M"),
                            b.status,
                            b.purpose
                        );
                    }
                }
                "2" => {
                    let room_id = self.prompt("Room ID: ")?;
                    let requester = self.prompt("Requester: ")?;
                    let purpose = self.prompt("Purpose: ")?;
                    let date = self.prompt_date("Date (YYYY-MM-DD): ")?;
                    let start = self.prompt_time("Start time (HH:MM): ")?;
                    let end = self.prompt_time("End time (HH:MM): ")?;
                    report(
                        self.registry
                            .bookings
                            .request_booking(&room_id, &requester, &purpose, date, start, end)
                            .map(|b| format!("Booking requested: {}", b.booking_id)),
                    );
                }
                "3" => {
                    let id = self.prompt("Booking ID to approve: ")?;
                    report(self.registry.bookings.approve(&id).map(|_| "Booking approved.".to_string()));
                }
                "4" => {
                    let id = self.prompt("Booking ID to reject: ")?;
                    report(self.registry.bookings.reject(&id).map(|_| "Booking rejected.".to_string()));
                }
                "5" => {
                    let id = self.prompt("Booking ID to cancel: ")?;
                    report(self.registry.bookings.cancel(&id).map(|_| "Booking canceled.".to_string()));
                }
                "0" => return Ok(()),
                _ => println!("Invalid option."),
            }
        }
    }

    // --- attendance ---

    fn manage_attendance(&self) -> io::Result<()> {
        loop {
            println!("\nAttendance Menu");
            println!("1. List records");
            println!("2. Mark attendance");
            println!("3. Delete record");
            println!("0. Back");
            match self.prompt("Select: ")?.as_str() {
                "1" => {
                    let records = self.registry.attendance.find_all();
                    println!("Attendance Records ({})", records.len());
                    for r in records {
                        println!("{} | student {} | course {} | {} | {}", r.record_id, r.student_id, r.course_id, r.date, if r.present { "present" } else { "absent" });
                    }
                }
                "2" => {
                    let student_id = self.prompt("Student ID: ")?;
                    let course_id = self.prompt("Course ID: ")?;
                    let date = self.prompt_date("Date (YYYY-MM-DD): ")?;
                    let present = self.prompt("Present? (y/n): ")?.eq_ignore_ascii_case("y");
                    report(
                        self.registry
                            .attendance
                            .mark_attendance(&student_id, &course_id, date, present)
                            .map(|r| format!("Recorded {}", r.record_id)),
                    );
                }
                "3" => {
                    let id = self.prompt("Record ID: ")?;
                    report(self.registry.attendance.delete(&id).map(|_| "Record deleted.".to_string()));
                }
                "0" => return Ok(()),
                _ => println!("Invalid option."),
            }
        }
    }

    // --- grades ---

    fn manage_grades(&self) -> io::Result<()> {
        loop {
            println!("\nGrades Menu");
            println!("1. List reports");
            println!("2. Record grade");
            println!("3. Delete report");
            println!("0. Back");
            match self.prompt("Select: ")?.as_str() {
                "1" => {
                    let reports = self.registry.grades.find_all();
                    println!("Grade Reports ({})", reports.len());
                    for r in reports {
                        println!("{} | student {} | course {} | {:.1} ({}) | {}", r.report_id, r.student_id, r.course_id, r.score, r.letter_grade, r.remarks);
                    }
                }
                "2" => {
                    let student_id = self.prompt("Student ID: ")?;
                    let course_id = self.prompt("Course ID: ")?;
                    let score = self.prompt_f64("Score (0-100): ")?;
                    let remarks = self.prompt("Remarks: ")?;
                    report(
                        self.registry
                            .grades
                            .record_grade(&student_id, &course_id, score, &remarks)
                            .map(|r| format!("Recorded {} ({})", r.report_id, r.letter_grade)),
                    );
                }
                "3" => {
                    let id = self.prompt("Report ID: ")?;
                    report(self.registry.grades.delete(&id).map(|_| "Report deleted.".to_string()));
                }
                "0" => return Ok(()),
                _ => println!("Invalid option."),
            }
        }
    }

    // --- persistence ---

    fn manage_data(&self) -> io::Result<()> {
        loop {
            println!("\nData Menu");
            println!("1. Save all");
            println!("2. Reload all");
            println!("0. Back");
            match self.prompt("Select: ")?.as_str() {
                "1" => report(self.registry.save_all().map(|_| "All collections saved.".to_string())),
                "2" => report(self.registry.reload_all().map(|_| "All collections reloaded.".to_string())),
                "0" => return Ok(()),
                _ => println!("Invalid option."),
            }
        }
    }

    // --- prompt helpers ---

    fn prompt(&self, message: &str) -> io::Result<String> {
        print!("{message}");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        }
        Ok(line.trim().to_string())
    }

    /// Prompts showing the current value; an empty answer keeps it.
    fn prompt_optional(&self, label: &str, current: &str) -> io::Result<String> {
        let text = self.prompt(&format!("{label} [{current}]: "))?;
        Ok(if text.is_empty() { current.to_string() } else { text })
    }

    fn prompt_u32(&self, message: &str) -> io::Result<u32> {
        loop {
            match self.prompt(message)?.parse() {
                Ok(number) => return Ok(number),
                Err(_) => println!("Enter a whole number."),
            }
        }
    }

    fn prompt_f64(&self, message: &str) -> io::Result<f64> {
        loop {
            match self.prompt(message)?.parse() {
                Ok(number) => return Ok(number),
                Err(_) => println!("Enter a number."),
            }
        }
    }

    fn prompt_date(&self, message: &str) -> io::Result<NaiveDate> {
        loop {
            match self.prompt(message)?.parse() {
                Ok(date) => return Ok(date),
                Err(_) => println!("Enter date in YYYY-MM-DD format."),
            }
        }
    }

    fn prompt_time(&self, message: &str) -> io::Result<NaiveTime> {
        loop {
            match parse_time(&self.prompt(message)?) {
                Ok(time) => return Ok(time),
                Err(_) => println!("Enter time in HH:MM format."),
            }
        }
    }

    fn prompt_day_of_week(&self) -> io::Result<DayOfWeek> {
        loop {
            match DayOfWeek::from_str(&self.prompt("Day of week (e.g., MONDAY): ")?) {
                Ok(day) => return Ok(day),
                Err(_) => println!("Invalid day."),
            }
        }
    }

    fn prompt_room_type(&self) -> io::Result<RoomType> {
        loop {
            match RoomType::from_str(&self.prompt("Room type (LECTURE/LAB/AUDITORIUM/MEETING): ")?) {
                Ok(room_type) => return Ok(room_type),
                Err(_) => println!("Invalid room type."),
            }
        }
    }
}
