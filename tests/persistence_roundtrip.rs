use std::fs;

use chrono::{NaiveDate, NaiveTime};
use tempfile::TempDir;

use campus_rms::domain::{BookingStatus, DayOfWeek, RoomType};
use campus_rms::error::Error;
use campus_rms::service::ServiceRegistry;

fn open_registry() -> (TempDir, ServiceRegistry) {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = ServiceRegistry::open(dir.path()).expect("open registry");
    (dir, registry)
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn fresh_data_directory_starts_with_empty_collections() {
    let (_dir, registry) = open_registry();
    assert!(registry.students.find_all().is_empty());
    assert!(registry.instructors.find_all().is_empty());
    assert!(registry.rooms.find_all().is_empty());
    assert!(registry.courses.find_all().is_empty());
    assert!(registry.timetable.find_all().is_empty());
    assert!(registry.bookings.find_all().is_empty());
    assert!(registry.attendance.find_all().is_empty());
    assert!(registry.grades.find_all().is_empty());
    // Except for the seeded default administrator.
    assert_eq!(registry.auth.find_all().len(), 1);
}

#[test]
fn collections_survive_a_registry_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (room_id, course_id, slot_id, booking_id);
    {
        let registry = ServiceRegistry::open(dir.path()).expect("open registry");
        let student = registry.students.create("Ada Lovelace", "Mathematics", "ada@example.edu").unwrap();
        let room = registry.rooms.create("Lecture Hall", 100, RoomType::Lecture).unwrap();
        let course = registry.courses.create("Analysis", 9, None, Some(&room.room_id)).unwrap();
        registry.courses.enroll_student(&course.course_id, &student.student_id).unwrap();
        let slot = registry.timetable.schedule_course(&course.course_id, &room.room_id, DayOfWeek::Thursday, t(10, 0), t(11, 45)).unwrap();
        let booking = registry
            .bookings
            .request_booking(&room.room_id, "Facilities", "Maintenance", NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(), t(7, 0), t(8, 0))
            .unwrap();
        registry.bookings.approve(&booking.booking_id).unwrap();
        room_id = room.room_id;
        course_id = course.course_id;
        slot_id = slot.slot_id;
        booking_id = booking.booking_id;
    }

    let reopened = ServiceRegistry::open(dir.path()).expect("reopen registry");
    let course = reopened.courses.find_by_id(&course_id).expect("course persisted");
    assert_eq!(course.room_id.as_deref(), Some(room_id.as_str()));
    assert_eq!(course.enrolled_student_ids.len(), 1);

    let student = reopened.students.find_by_id(&course.enrolled_student_ids[0]).expect("student persisted");
    assert_eq!(student.enrolled_course_ids, vec![course_id.clone()]);

    let slots = reopened.timetable.slots_for_course(&course_id);
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].slot_id, slot_id);
    assert_eq!(slots[0].day_of_week, DayOfWeek::Thursday);

    let booking = reopened.bookings.find_by_id(&booking_id).expect("booking persisted");
    assert_eq!(booking.status, BookingStatus::Approved);
}

#[test]
fn persisted_files_use_the_original_field_spellings() {
    let (dir, registry) = open_registry();
    let room = registry.rooms.create("R1", 10, RoomType::Meeting).unwrap();
    let course = registry.courses.create("Networks", 6, None, None).unwrap();
    registry.timetable.schedule_course(&course.course_id, &room.room_id, DayOfWeek::Monday, t(8, 0), t(9, 45)).unwrap();
    registry
        .bookings
        .request_booking(&room.room_id, "Ada", "Demo", NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(), t(9, 0), t(10, 0))
        .unwrap();

    let timetable: serde_json::Value = serde_json::from_str(&fs::read_to_string(dir.path().join("timetable.json")).unwrap()).unwrap();
    let slot = &timetable.as_array().expect("array file")[0];
    assert!(slot["slotId"].as_str().unwrap().starts_with("SLOT-"));
    assert_eq!(slot["dayOfWeek"], "MONDAY");
    assert_eq!(slot["startTime"], "08:00");
    assert_eq!(slot["endTime"], "09:45");

    let bookings: serde_json::Value = serde_json::from_str(&fs::read_to_string(dir.path().join("bookings.json")).unwrap()).unwrap();
    let booking = &bookings.as_array().expect("array file")[0];
    assert!(booking["bookingId"].as_str().unwrap().starts_with("RBK-"));
    assert_eq!(booking["date"], "2024-06-10");
    assert_eq!(booking["status"], "PENDING");

    let rooms: serde_json::Value = serde_json::from_str(&fs::read_to_string(dir.path().join("rooms.json")).unwrap()).unwrap();
    assert_eq!(rooms.as_array().expect("array file")[0]["type"], "MEETING");
}

#[test]
fn times_with_seconds_are_accepted_on_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("timetable.json"),
        r#"[{"slotId":"SLOT-1","courseId":"CRS-1","roomId":"ROM-1","dayOfWeek":"FRIDAY","startTime":"08:00:00","endTime":"09:45:00"}]"#,
    )
    .unwrap();
    let registry = ServiceRegistry::open(dir.path()).expect("open registry");
    let slots = registry.timetable.find_all();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].start_time, t(8, 0));
    assert_eq!(slots[0].end_time, t(9, 45));
}

#[test]
fn reload_discards_unsaved_changes_written_by_hand() {
    let (dir, registry) = open_registry();
    registry.rooms.create("R1", 10, RoomType::Meeting).unwrap();
    assert_eq!(registry.rooms.find_all().len(), 1);

    // Simulate an external edit of the backing file.
    fs::write(dir.path().join("rooms.json"), "[]").unwrap();
    registry.reload_all().unwrap();
    assert!(registry.rooms.find_all().is_empty());
}

#[test]
fn course_crud_enforces_referential_checks() {
    let (_dir, registry) = open_registry();

    let bad_instructor = registry.courses.create("Ghost Course", 3, Some("INS-MISSING"), None);
    assert!(matches!(bad_instructor, Err(Error::NotFound(_))));

    let bad_room = registry.courses.create("Ghost Course", 3, None, Some("ROM-MISSING"));
    assert!(matches!(bad_room, Err(Error::NotFound(_))));

    let instructor = registry.instructors.create("Grace Hopper", "CS", "grace@example.edu").unwrap();
    let course = registry.courses.create("Programming", 6, Some(&instructor.instructor_id), None).unwrap();

    // The assignment is kept bidirectional.
    assert_eq!(registry.instructors.find_by_id(&instructor.instructor_id).unwrap().course_ids, vec![course.course_id.clone()]);

    registry.courses.delete(&course.course_id).unwrap();
    assert!(registry.instructors.find_by_id(&instructor.instructor_id).unwrap().course_ids.is_empty());
}

#[test]
fn attendance_and_grades_require_known_student_and_course() {
    let (_dir, registry) = open_registry();
    let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

    assert!(matches!(registry.attendance.mark_attendance("STD-MISSING", "CRS-MISSING", date, true), Err(Error::NotFound(_))));
    assert!(matches!(registry.grades.record_grade("STD-MISSING", "CRS-MISSING", 80.0, "n/a"), Err(Error::NotFound(_))));

    let student = registry.students.create("Ada Lovelace", "Mathematics", "ada@example.edu").unwrap();
    let course = registry.courses.create("Analysis", 9, None, None).unwrap();

    let record = registry.attendance.mark_attendance(&student.student_id, &course.course_id, date, true).unwrap();
    assert_eq!(registry.attendance.find_by_student(&student.student_id), vec![record]);

    let report = registry.grades.record_grade(&student.student_id, &course.course_id, 84.5, "solid work").unwrap();
    assert_eq!(report.letter_grade, "B");
    assert_eq!(registry.grades.find_by_course(&course.course_id), vec![report]);
}

#[test]
fn default_admin_can_log_in_and_duplicate_usernames_are_refused() {
    let (_dir, registry) = open_registry();

    let admin = registry.auth.login("admin", "admin123").expect("default admin");
    assert_eq!(admin.full_name, "Default Administrator");

    assert!(matches!(registry.auth.login("admin", "wrong"), Err(Error::Authentication(_))));
    assert!(matches!(registry.auth.login("nobody", "admin123"), Err(Error::Authentication(_))));

    registry.auth.register("registrar", "s3cret", "Campus Registrar").unwrap();
    assert!(matches!(registry.auth.register("registrar", "other", "Imposter"), Err(Error::Authentication(_))));
    assert!(registry.auth.login("registrar", "s3cret").is_ok());
}
