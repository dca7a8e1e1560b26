use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Whole-file JSON array persistence for a single entity collection.
///
/// `load` on a missing file yields an empty list. `save` rewrites the complete
/// collection through a temporary file followed by a rename, so a crash in the
/// middle of a write never leaves a truncated array behind.
pub struct JsonStore<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> JsonStore<T> {
    /// Binds the store to `<data_dir>/<file_name>`, e.g. `data/students.json`.
    pub fn new(data_dir: &Path, file_name: &str) -> Self {
        JsonStore { path: data_dir.join(file_name), _marker: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all entities from the backing file.
    pub fn load(&self) -> Result<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| Error::Persistence { path: self.path.clone(), source: e })?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|e| Error::Corrupt { path: self.path.clone(), source: e })
    }

    /// Persists the provided entities, replacing the previous file content.
    pub fn save(&self, entities: &[T]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::Persistence { path: parent.to_path_buf(), source: e })?;
        }
        let json = serde_json::to_string_pretty(entities).map_err(|e| Error::Corrupt { path: self.path.clone(), source: e })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| Error::Persistence { path: tmp.clone(), source: e })?;
        fs::rename(&tmp, &self.path).map_err(|e| Error::Persistence { path: self.path.clone(), source: e })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: String,
        value: u32,
    }

    #[test]
    fn missing_file_loads_as_empty_list() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store: JsonStore<Entry> = JsonStore::new(dir.path(), "entries.json");
        assert!(store.load().expect("load").is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store: JsonStore<Entry> = JsonStore::new(dir.path(), "entries.json");
        let entries = vec![Entry { id: "A".into(), value: 1 }, Entry { id: "B".into(), value: 2 }];
        store.save(&entries).expect("save");
        assert_eq!(store.load().expect("load"), entries);
        // No temporary file left behind after the rename.
        assert!(!dir.path().join("entries.json.tmp").exists());
    }

    #[test]
    fn malformed_file_is_reported_as_corrupt() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("entries.json");
        fs::write(&path, "{ not an array").expect("write");
        let store: JsonStore<Entry> = JsonStore::new(dir.path(), "entries.json");
        assert!(matches!(store.load(), Err(Error::Corrupt { .. })));
    }
}
