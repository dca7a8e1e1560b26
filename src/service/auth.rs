use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::domain::Admin;
use crate::error::{Error, Result};
use crate::store::JsonStore;

/// Admin authentication and registration, backed by `admins.json`.
///
/// A fresh data directory is seeded with a default `admin`/`admin123`
/// account so the console is reachable on first start.
pub struct AuthService {
    store: JsonStore<Admin>,
    admins: Mutex<Vec<Admin>>,
}

impl AuthService {
    pub fn open(data_dir: &Path) -> Result<Self> {
        let store = JsonStore::new(data_dir, "admins.json");
        let mut admins = store.load()?;
        if admins.is_empty() {
            admins.push(Admin::create("admin", "admin123", "Default Administrator"));
            store.save(&admins)?;
            log::warn!("No admin accounts found, seeded default 'admin' account");
        }
        Ok(AuthService { store, admins: Mutex::new(admins) })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Admin>> {
        self.admins.lock().expect("admin collection lock poisoned")
    }

    pub fn find_all(&self) -> Vec<Admin> {
        self.lock().clone()
    }

    pub fn find_by_id(&self, admin_id: &str) -> Result<Admin> {
        self.lock()
            .iter()
            .find(|a| a.admin_id == admin_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Admin not found: {admin_id}")))
    }

    pub fn login(&self, username: &str, password: &str) -> Result<Admin> {
        self.lock()
            .iter()
            .find(|a| a.username == username && a.verify_password(password))
            .cloned()
            .ok_or_else(|| Error::Authentication("Invalid username or password".to_string()))
    }

    pub fn register(&self, username: &str, password: &str, full_name: &str) -> Result<Admin> {
        let mut admins = self.lock();
        if admins.iter().any(|a| a.username == username) {
            return Err(Error::Authentication("Username already exists".to_string()));
        }
        let admin = Admin::create(username, password, full_name);
        admins.push(admin.clone());
        self.store.save(&admins)?;
        Ok(admin)
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
