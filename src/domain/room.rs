use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ids;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoomType {
    Lecture,
    Lab,
    Auditorium,
    Meeting,
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoomType::Lecture => "LECTURE",
            RoomType::Lab => "LAB",
            RoomType::Auditorium => "AUDITORIUM",
            RoomType::Meeting => "MEETING",
        };
        f.write_str(name)
    }
}

impl FromStr for RoomType {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_uppercase().as_str() {
            "LECTURE" => Ok(RoomType::Lecture),
            "LAB" => Ok(RoomType::Lab),
            "AUDITORIUM" => Ok(RoomType::Auditorium),
            "MEETING" => Ok(RoomType::Meeting),
            other => Err(format!("unknown room type: {other}")),
        }
    }
}

/// A physical room that can host courses and one-off bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_id: String,
    pub name: String,
    pub capacity: u32,
    #[serde(rename = "type")]
    pub room_type: RoomType,
}

impl Room {
    pub fn create(name: &str, capacity: u32, room_type: RoomType) -> Self {
        Room { room_id: ids::new_id("ROM"), name: name.to_string(), capacity, room_type }
    }
}
