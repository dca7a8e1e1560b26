use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::ids;

/// Administrative user allowed to operate the console.
///
/// The original design carried a `User` base type with `Admin` as its only
/// concrete kind; with a single variant it collapses to this plain record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub admin_id: String,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
}

impl Admin {
    pub fn create(username: &str, raw_password: &str, full_name: &str) -> Self {
        Admin {
            admin_id: ids::new_id("ADM"),
            username: username.to_string(),
            password_hash: hash_password(raw_password),
            full_name: full_name.to_string(),
        }
    }

    /// Checks whether the provided password matches the stored hash.
    pub fn verify_password(&self, password: &str) -> bool {
        hash_password(password) == self.password_hash
    }
}

/// SHA-256 digest of the password, hex encoded.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let admin = Admin::create("admin", "admin123", "Default Administrator");
        assert!(admin.verify_password("admin123"));
        assert!(!admin.verify_password("admin124"));
        // The stored hash is a 64 digit hex string, never the raw password.
        assert_eq!(admin.password_hash.len(), 64);
        assert_ne!(admin.password_hash, "admin123");
    }
}
