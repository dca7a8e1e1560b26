use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Duration, NaiveTime};

use crate::domain::schedule::ranges_overlap;
use crate::domain::{DayOfWeek, ScheduleSlot};
use crate::error::{Error, Result};
use crate::service::course::CourseService;
use crate::service::room::RoomService;
use crate::store::JsonStore;

/// Length of every automatically generated slot: 1 hour 45 minutes.
const GENERATED_SLOT_MINUTES: i64 = 105;

/// Weekly timetable engine, backed by `timetable.json`.
///
/// Owns the set of recurring schedule slots, answers room/day conflict
/// queries and runs the round-robin automatic generator. Slots carry no
/// internal state; scheduling is insertion, rescheduling is delete + create.
pub struct TimetableService {
    store: JsonStore<ScheduleSlot>,
    slots: Mutex<Vec<ScheduleSlot>>,
    courses: Arc<CourseService>,
    rooms: Arc<RoomService>,
}

impl TimetableService {
    pub fn open(data_dir: &Path, courses: Arc<CourseService>, rooms: Arc<RoomService>) -> Result<Self> {
        let store = JsonStore::new(data_dir, "timetable.json");
        let slots = store.load()?;
        Ok(TimetableService { store, slots: Mutex::new(slots), courses, rooms })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ScheduleSlot>> {
        self.slots.lock().expect("timetable collection lock poisoned")
    }

    pub fn find_all(&self) -> Vec<ScheduleSlot> {
        self.lock().clone()
    }

    pub fn slots_for_course(&self, course_id: &str) -> Vec<ScheduleSlot> {
        self.lock().iter().filter(|slot| slot.course_id == course_id).cloned().collect()
    }

    /// True iff an existing slot for the same room and day overlaps the given
    /// range. Boundaries are inclusive: a slot ending at 10:00 conflicts with
    /// one starting at 10:00.
    pub fn has_conflict(&self, room_id: &str, day: DayOfWeek, start: NaiveTime, end: NaiveTime) -> bool {
        conflicts(&self.lock(), room_id, day, start, end, None)
    }

    /// Same check, but `ignore_slot_id` is excluded so a slot being
    /// rescheduled does not collide with itself.
    pub fn has_conflict_ignoring(&self, room_id: &str, day: DayOfWeek, start: NaiveTime, end: NaiveTime, ignore_slot_id: &str) -> bool {
        conflicts(&self.lock(), room_id, day, start, end, Some(ignore_slot_id))
    }

    /// Creates a custom schedule slot for a course after validating the
    /// course and room references and the absence of conflicts.
    pub fn schedule_course(&self, course_id: &str, room_id: &str, day: DayOfWeek, start: NaiveTime, end: NaiveTime) -> Result<ScheduleSlot> {
        if self.courses.find_by_id(course_id).is_none() {
            return Err(Error::NotFound(format!("Course not found: {course_id}")));
        }
        let room = self
            .rooms
            .find_by_id(room_id)
            .ok_or_else(|| Error::NotFound(format!("Room not found: {room_id}")))?;
        if start >= end {
            return Err(Error::InvalidRange("Start time must be before end time".to_string()));
        }
        let mut slots = self.lock();
        if conflicts(&slots, room_id, day, start, end, None) {
            return Err(Error::Conflict(format!("Time conflict detected for room {}", room.name)));
        }
        let slot = ScheduleSlot::create(course_id, room_id, day, start, end);
        slots.push(slot.clone());
        self.store.save(&slots)?;
        log::info!("Scheduled course {} in room {} on {} {}-{}", course_id, room_id, day, start.format("%H:%M"), end.format("%H:%M"));
        Ok(slot)
    }

    /// Generates a conflict free timetable for every course that holds no
    /// slot yet.
    ///
    /// Deterministic greedy placement: a single pointer cycles rooms, the
    /// Monday..Friday days and the four canonical start times. The pointer
    /// advances once per course considered whether or not the candidate was
    /// accepted, so repeated runs over the same course list reproduce the
    /// same assignment. A course whose candidate conflicts is skipped for
    /// this run and picked up again on a later one.
    pub fn generate_automatic_timetable(&self) -> Result<Vec<ScheduleSlot>> {
        let courses = self.courses.find_all();
        let rooms = self.rooms.find_all();
        let mut slots = self.lock();
        if rooms.is_empty() {
            return Ok(slots.clone());
        }
        let start_times = [
            NaiveTime::from_hms_opt(8, 0, 0).expect("valid time"),
            NaiveTime::from_hms_opt(10, 0, 0).expect("valid time"),
            NaiveTime::from_hms_opt(13, 0, 0).expect("valid time"),
            NaiveTime::from_hms_opt(15, 0, 0).expect("valid time"),
        ];
        let days = DayOfWeek::WEEKDAYS;
        let mut pointer = 0usize;
        for course in &courses {
            let already_scheduled = slots.iter().any(|slot| slot.course_id == course.course_id);
            if already_scheduled {
                continue;
            }
            let preferred = course.room_id.as_deref().and_then(|id| rooms.iter().find(|r| r.room_id == id));
            let room = preferred.unwrap_or(&rooms[pointer % rooms.len()]);
            let day = days[pointer % days.len()];
            let start = start_times[pointer % start_times.len()];
            let end = start + Duration::minutes(GENERATED_SLOT_MINUTES);
            pointer += 1;
            if conflicts(&slots, &room.room_id, day, start, end, None) {
                log::debug!("Course {} skipped: room {} occupied on {} at {}", course.course_id, room.room_id, day, start.format("%H:%M"));
                continue;
            }
            slots.push(ScheduleSlot::create(&course.course_id, &room.room_id, day, start, end));
        }
        self.store.save(&slots)?;
        log::info!("Automatic timetable generation finished with {} slots", slots.len());
        Ok(slots.clone())
    }

    /// Removes the slot if present; deleting an unknown id is a no-op.
    pub fn delete_slot(&self, slot_id: &str) -> Result<()> {
        let mut slots = self.lock();
        slots.retain(|slot| slot.slot_id != slot_id);
        self.store.save(&slots)
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

fn conflicts(slots: &[ScheduleSlot], room_id: &str, day: DayOfWeek, start: NaiveTime, end: NaiveTime, ignore_slot_id: Option<&str>) -> bool {
    slots.iter().any(|slot| {
        ignore_slot_id.is_none_or(|id| slot.slot_id != id)
            && slot.room_id == room_id
            && slot.day_of_week == day
            && ranges_overlap(slot.start_time, slot.end_time, start, end)
    })
}
