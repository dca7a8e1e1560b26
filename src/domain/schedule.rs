use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::ids;

/// Day of the week a slot occupies, persisted as its uppercase English name
/// (`MONDAY`..`SUNDAY`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// The teaching days cycled through by automatic timetable generation.
    pub const WEEKDAYS: [DayOfWeek; 5] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "MONDAY",
            DayOfWeek::Tuesday => "TUESDAY",
            DayOfWeek::Wednesday => "WEDNESDAY",
            DayOfWeek::Thursday => "THURSDAY",
            DayOfWeek::Friday => "FRIDAY",
            DayOfWeek::Saturday => "SATURDAY",
            DayOfWeek::Sunday => "SUNDAY",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_uppercase().as_str() {
            "MONDAY" => Ok(DayOfWeek::Monday),
            "TUESDAY" => Ok(DayOfWeek::Tuesday),
            "WEDNESDAY" => Ok(DayOfWeek::Wednesday),
            "THURSDAY" => Ok(DayOfWeek::Thursday),
            "FRIDAY" => Ok(DayOfWeek::Friday),
            "SATURDAY" => Ok(DayOfWeek::Saturday),
            "SUNDAY" => Ok(DayOfWeek::Sunday),
            other => Err(format!("unknown day of week: {other}")),
        }
    }
}

/// Parses a time-of-day in `HH:MM` or `HH:MM:SS` notation.
pub fn parse_time(text: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(text, "%H:%M:%S").or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
}

/// Serde adapter writing times as `HH:MM` and accepting `HH:MM[:SS]` on read,
/// matching the persisted timetable format.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_time(&text).map_err(de::Error::custom)
    }
}

/// Inclusive-boundary interval overlap. Two ranges in the same room collide
/// even when they merely touch, i.e. `end1 == start2` counts as a conflict.
pub fn ranges_overlap(start1: NaiveTime, end1: NaiveTime, start2: NaiveTime, end2: NaiveTime) -> bool {
    start1 <= end2 && start2 <= end1
}

/// A fixed weekly occupancy of a room by a course.
///
/// Slots are never updated in place; rescheduling is a delete followed by a
/// fresh create. Invariant: `start_time < end_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    pub slot_id: String,
    pub course_id: String,
    pub room_id: String,
    pub day_of_week: DayOfWeek,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

impl ScheduleSlot {
    pub fn create(course_id: &str, room_id: &str, day_of_week: DayOfWeek, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        ScheduleSlot {
            slot_id: ids::new_id("SLOT"),
            course_id: course_id.to_string(),
            room_id: room_id.to_string(),
            day_of_week,
            start_time,
            end_time,
        }
    }
}
