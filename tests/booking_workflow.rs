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

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn request_booking_validates_before_creating_anything() {
    let (_dir, registry) = open_registry();
    let room = registry.rooms.create("R1", 10, RoomType::Meeting).unwrap();

    let blank = registry.bookings.request_booking(&room.room_id, "  ", "Sync", d(2024, 6, 10), t(9, 0), t(10, 0));
    assert!(matches!(blank, Err(Error::Validation(_))));

    let unknown_room = registry.bookings.request_booking("ROM-MISSING", "Ada", "Sync", d(2024, 6, 10), t(9, 0), t(10, 0));
    assert!(matches!(unknown_room, Err(Error::NotFound(_))));

    let empty_range = registry.bookings.request_booking(&room.room_id, "Ada", "Sync", d(2024, 6, 10), t(9, 0), t(9, 0));
    assert!(matches!(empty_range, Err(Error::InvalidRange(_))));

    assert!(registry.bookings.find_all().is_empty());

    // One minute is enough.
    let minimal = registry.bookings.request_booking(&room.room_id, "Ada", "Sync", d(2024, 6, 10), t(9, 0), t(9, 1)).unwrap();
    assert_eq!(minimal.status, BookingStatus::Pending);
}

#[test]
fn overlapping_requests_coexist_until_approval_resolves_them() {
    let (_dir, registry) = open_registry();
    let room = registry.rooms.create("R1", 10, RoomType::Meeting).unwrap();
    let date = d(2024, 6, 10);

    let team_sync = registry.bookings.request_booking(&room.room_id, "Ada", "Team sync", date, t(9, 0), t(10, 0)).unwrap();
    // The overlapping second request is accepted without error; conflicts are
    // deferred to approval.
    let standup = registry.bookings.request_booking(&room.room_id, "Grace", "Standup", date, t(9, 30), t(9, 45)).unwrap();
    assert_eq!(standup.status, BookingStatus::Pending);

    registry.bookings.approve(&team_sync.booking_id).unwrap();
    assert_eq!(registry.bookings.find_by_id(&team_sync.booking_id).unwrap().status, BookingStatus::Approved);

    let contended = registry.bookings.approve(&standup.booking_id);
    assert!(matches!(contended, Err(Error::Conflict(_))));
    assert_eq!(registry.bookings.find_by_id(&standup.booking_id).unwrap().status, BookingStatus::Pending);

    registry.bookings.cancel(&team_sync.booking_id).unwrap();
    assert!(registry.bookings.find_by_id(&team_sync.booking_id).is_none());

    registry.bookings.approve(&standup.booking_id).unwrap();
    assert_eq!(registry.bookings.find_by_id(&standup.booking_id).unwrap().status, BookingStatus::Approved);
}

#[test]
fn identical_range_conflicts_in_the_same_room_but_not_in_another() {
    let (_dir, registry) = open_registry();
    let r1 = registry.rooms.create("R1", 10, RoomType::Meeting).unwrap();
    let r2 = registry.rooms.create("R2", 10, RoomType::Meeting).unwrap();
    let date = d(2024, 6, 11);

    let first = registry.bookings.request_booking(&r1.room_id, "Ada", "Review", date, t(14, 0), t(15, 0)).unwrap();
    registry.bookings.approve(&first.booking_id).unwrap();

    let same_room = registry.bookings.request_booking(&r1.room_id, "Grace", "Retro", date, t(14, 0), t(15, 0)).unwrap();
    assert!(matches!(registry.bookings.approve(&same_room.booking_id), Err(Error::Conflict(_))));

    let other_room = registry.bookings.request_booking(&r2.room_id, "Grace", "Retro", date, t(14, 0), t(15, 0)).unwrap();
    assert!(registry.bookings.approve(&other_room.booking_id).is_ok());
}

#[test]
fn rejected_bookings_never_conflict_and_rejection_never_fails_on_overlap() {
    let (_dir, registry) = open_registry();
    let room = registry.rooms.create("R1", 10, RoomType::Meeting).unwrap();
    let date = d(2024, 6, 12);

    let first = registry.bookings.request_booking(&room.room_id, "Ada", "Workshop", date, t(9, 0), t(12, 0)).unwrap();
    registry.bookings.approve(&first.booking_id).unwrap();

    // Rejecting an overlapping booking succeeds despite the live conflict.
    let second = registry.bookings.request_booking(&room.room_id, "Grace", "Clash", date, t(10, 0), t(11, 0)).unwrap();
    registry.bookings.reject(&second.booking_id).unwrap();
    assert_eq!(registry.bookings.find_by_id(&second.booking_id).unwrap().status, BookingStatus::Rejected);

    // A rejected booking does not block later approvals either: free the room
    // and approve a range overlapping only the rejected one.
    registry.bookings.cancel(&first.booking_id).unwrap();
    let third = registry.bookings.request_booking(&room.room_id, "Linus", "Fresh", date, t(10, 0), t(11, 0)).unwrap();
    assert!(registry.bookings.approve(&third.booking_id).is_ok());
}

#[test]
fn approval_checks_the_weekly_timetable_for_the_bookings_weekday() {
    let (_dir, registry) = open_registry();
    let room = registry.rooms.create("R1", 10, RoomType::Meeting).unwrap();
    let course = registry.courses.create("Databases", 6, None, None).unwrap();
    registry.timetable.schedule_course(&course.course_id, &room.room_id, DayOfWeek::Monday, t(9, 0), t(10, 0)).unwrap();

    // 2024-06-10 is a Monday, so the recurring slot blocks this booking.
    let monday_booking = registry.bookings.request_booking(&room.room_id, "Ada", "Clash", d(2024, 6, 10), t(9, 30), t(10, 30)).unwrap();
    assert!(matches!(registry.bookings.approve(&monday_booking.booking_id), Err(Error::Conflict(_))));

    // The same time on Tuesday is free.
    let tuesday_booking = registry.bookings.request_booking(&room.room_id, "Ada", "Fine", d(2024, 6, 11), t(9, 30), t(10, 30)).unwrap();
    assert!(registry.bookings.approve(&tuesday_booking.booking_id).is_ok());
}

#[test]
fn unknown_booking_ids_are_reported_for_every_transition() {
    let (_dir, registry) = open_registry();
    assert!(matches!(registry.bookings.approve("RBK-MISSING"), Err(Error::NotFound(_))));
    assert!(matches!(registry.bookings.reject("RBK-MISSING"), Err(Error::NotFound(_))));
    assert!(matches!(registry.bookings.cancel("RBK-MISSING"), Err(Error::NotFound(_))));
    assert!(registry.bookings.find_by_id("RBK-MISSING").is_none());
}

#[test]
fn cancellation_removes_the_record_from_any_status() {
    let (_dir, registry) = open_registry();
    let room = registry.rooms.create("R1", 10, RoomType::Meeting).unwrap();

    let pending = registry.bookings.request_booking(&room.room_id, "Ada", "A", d(2024, 6, 13), t(8, 0), t(9, 0)).unwrap();
    let approved = registry.bookings.request_booking(&room.room_id, "Ada", "B", d(2024, 6, 13), t(10, 0), t(11, 0)).unwrap();
    registry.bookings.approve(&approved.booking_id).unwrap();
    let rejected = registry.bookings.request_booking(&room.room_id, "Ada", "C", d(2024, 6, 13), t(12, 0), t(13, 0)).unwrap();
    registry.bookings.reject(&rejected.booking_id).unwrap();

    for booking_id in [&pending.booking_id, &approved.booking_id, &rejected.booking_id] {
        registry.bookings.cancel(booking_id).unwrap();
        assert!(registry.bookings.find_by_id(booking_id).is_none());
    }
    assert!(registry.bookings.find_all().is_empty());
}
