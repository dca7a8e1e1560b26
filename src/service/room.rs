use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::domain::{Room, RoomType};
use crate::error::{Error, Result};
use crate::store::JsonStore;
use crate::validation;

/// CRUD operations on rooms, backed by `rooms.json`.
pub struct RoomService {
    store: JsonStore<Room>,
    rooms: Mutex<Vec<Room>>,
}

impl RoomService {
    pub fn open(data_dir: &Path) -> Result<Self> {
        let store = JsonStore::new(data_dir, "rooms.json");
        let rooms = store.load()?;
        Ok(RoomService { store, rooms: Mutex::new(rooms) })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Room>> {
        self.rooms.lock().expect("room collection lock poisoned")
    }

    pub fn find_all(&self) -> Vec<Room> {
        self.lock().clone()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Room> {
        self.lock().iter().find(|r| r.room_id == id).cloned()
    }

    pub fn create(&self, name: &str, capacity: u32, room_type: RoomType) -> Result<Room> {
        validation::require_text(name, "Room name is required")?;
        validation::require_positive(capacity, "Room capacity must be positive")?;
        let room = Room::create(name, capacity, room_type);
        let mut rooms = self.lock();
        rooms.push(room.clone());
        self.store.save(&rooms)?;
        Ok(room)
    }

    pub fn update(&self, room: &Room) -> Result<Room> {
        validation::require_text(&room.name, "Room name is required")?;
        validation::require_positive(room.capacity, "Room capacity must be positive")?;
        let mut rooms = self.lock();
        let existing = rooms
            .iter_mut()
            .find(|r| r.room_id == room.room_id)
            .ok_or_else(|| Error::NotFound(format!("Room not found: {}", room.room_id)))?;
        existing.name = room.name.clone();
        existing.capacity = room.capacity;
        existing.room_type = room.room_type;
        let updated = existing.clone();
        self.store.save(&rooms)?;
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let mut rooms = self.lock();
        let before = rooms.len();
        rooms.retain(|r| r.room_id != id);
        if rooms.len() == before {
            return Err(Error::NotFound(format!("Room not found: {id}")));
        }
        self.store.save(&rooms)
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
