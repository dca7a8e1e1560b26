use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::schedule::hhmm;
use crate::ids;

/// Lifecycle of a room booking request.
///
/// Transitions are one-directional: `Pending -> Approved` only after the
/// conflict checks pass, `-> Rejected` unconditionally. Cancellation removes
/// the record entirely instead of adding a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
}

/// An ad hoc one-off reservation of a room on a specific calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomBooking {
    pub booking_id: String,
    pub room_id: String,
    pub requester: String,
    pub purpose: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub status: BookingStatus,
}

impl RoomBooking {
    pub fn create(room_id: &str, requester: &str, purpose: &str, date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        RoomBooking {
            booking_id: ids::new_id("RBK"),
            room_id: room_id.to_string(),
            requester: requester.to_string(),
            purpose: purpose.to_string(),
            date,
            start_time,
            end_time,
            status: BookingStatus::Pending,
        }
    }
}
