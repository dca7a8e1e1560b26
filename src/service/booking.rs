use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::domain::schedule::ranges_overlap;
use crate::domain::{BookingStatus, DayOfWeek, RoomBooking};
use crate::error::{Error, Result};
use crate::service::room::RoomService;
use crate::service::timetable::TimetableService;
use crate::store::JsonStore;
use crate::validation;

/// Room booking requests and their approval workflow, backed by
/// `bookings.json`.
///
/// Conflict checking is deferred to approval time so overlapping requests
/// can coexist as Pending; a human approver resolves contention by approving
/// one and rejecting or canceling the rest. The bookings mutex is held
/// across the whole check-then-write of `approve`, keeping the conflict
/// check and the status transition atomic.
pub struct BookingService {
    store: JsonStore<RoomBooking>,
    bookings: Mutex<Vec<RoomBooking>>,
    rooms: Arc<RoomService>,
    timetable: Arc<TimetableService>,
}

impl BookingService {
    pub fn open(data_dir: &Path, rooms: Arc<RoomService>, timetable: Arc<TimetableService>) -> Result<Self> {
        let store = JsonStore::new(data_dir, "bookings.json");
        let bookings = store.load()?;
        Ok(BookingService { store, bookings: Mutex::new(bookings), rooms, timetable })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RoomBooking>> {
        self.bookings.lock().expect("booking collection lock poisoned")
    }

    pub fn find_all(&self) -> Vec<RoomBooking> {
        self.lock().clone()
    }

    pub fn find_by_id(&self, id: &str) -> Option<RoomBooking> {
        self.lock().iter().find(|b| b.booking_id == id).cloned()
    }

    /// Files a new booking request in Pending status. No conflict check
    /// happens here; conflicts surface at approval time.
    pub fn request_booking(&self, room_id: &str, requester: &str, purpose: &str, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Result<RoomBooking> {
        validation::require_text(requester, "Requester name is required")?;
        if self.rooms.find_by_id(room_id).is_none() {
            return Err(Error::NotFound(format!("Room not found: {room_id}")));
        }
        if start >= end {
            return Err(Error::InvalidRange("Start time must be before end time".to_string()));
        }
        let booking = RoomBooking::create(room_id, requester, purpose, date, start, end);
        let mut bookings = self.lock();
        bookings.push(booking.clone());
        self.store.save(&bookings)?;
        log::info!("Booking {} requested for room {} on {}", booking.booking_id, room_id, date);
        Ok(booking)
    }

    /// Approves a booking after checking it against the weekly timetable
    /// (same room, weekday derived from the booking's date) and against every
    /// other Approved booking for the same room and exact date.
    ///
    /// Pending rivals never block an approval; they stay for the approver to
    /// reject or cancel. Rejected bookings never conflict.
    pub fn approve(&self, booking_id: &str) -> Result<()> {
        let mut bookings = self.lock();
        let index = bookings
            .iter()
            .position(|b| b.booking_id == booking_id)
            .ok_or_else(|| Error::NotFound(format!("Booking not found: {booking_id}")))?;
        let booking = bookings[index].clone();
        let day = DayOfWeek::from(booking.date.weekday());
        if self.timetable.has_conflict(&booking.room_id, day, booking.start_time, booking.end_time) {
            return Err(Error::Conflict("Booking conflicts with the timetable".to_string()));
        }
        let overlaps_approved = bookings
            .iter()
            .filter(|b| b.booking_id != booking.booking_id)
            .filter(|b| b.room_id == booking.room_id && b.date == booking.date)
            .filter(|b| b.status == BookingStatus::Approved)
            .any(|b| ranges_overlap(b.start_time, b.end_time, booking.start_time, booking.end_time));
        if overlaps_approved {
            return Err(Error::Conflict("Booking conflicts with another booking".to_string()));
        }
        bookings[index].status = BookingStatus::Approved;
        self.store.save(&bookings)?;
        log::info!("Booking {} approved", booking_id);
        Ok(())
    }

    /// Marks the booking Rejected. Never raises a conflict.
    pub fn reject(&self, booking_id: &str) -> Result<()> {
        let mut bookings = self.lock();
        let booking = bookings
            .iter_mut()
            .find(|b| b.booking_id == booking_id)
            .ok_or_else(|| Error::NotFound(format!("Booking not found: {booking_id}")))?;
        booking.status = BookingStatus::Rejected;
        self.store.save(&bookings)?;
        log::info!("Booking {} rejected", booking_id);
        Ok(())
    }

    /// Removes the booking entirely, whatever its status. No audit trail is
    /// kept for canceled requests.
    pub fn cancel(&self, booking_id: &str) -> Result<()> {
        let mut bookings = self.lock();
        let before = bookings.len();
        bookings.retain(|b| b.booking_id != booking_id);
        if bookings.len() == before {
            return Err(Error::NotFound(format!("Booking not found: {booking_id}")));
        }
        self.store.save(&bookings)?;
        log::info!("Booking {} canceled", booking_id);
        Ok(())
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
