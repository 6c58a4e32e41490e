//! Saved zine collection
//!
//! The whole collection lives under a single storage key and is rewritten on
//! every change. Storage problems never reach the caller: unreadable data
//! loads as an empty collection and failed writes are logged. A single
//! unreadable record is skipped on load and written back untouched.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::constants::UNTITLED_ZINE;
use crate::model::{CoverData, PageMap, Zine};
use crate::types::*;

/// Key the collection is stored under
pub const STORAGE_KEY: &str = "savedZines";

/// A string key-value store
pub trait Storage {
    /// Stored value, `None` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    reject_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that refuses every write, like a browser store over quota
    pub fn full() -> Self {
        Self {
            values: HashMap::new(),
            reject_writes: true,
        }
    }

    /// Pre-populated storage
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.values.insert(key.to_string(), value.to_string());
        storage
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.reject_writes {
            return Err(ZineError::Io(std::io::Error::new(
                ErrorKind::StorageFull,
                "storage quota exceeded",
            )));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Write beside the target and swap in, so a failed write leaves the
        // previous collection intact
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// The saved zines, in save order
pub struct ZineStore<S: Storage> {
    storage: S,
    zines: Vec<Zine>,
    /// Stored records that failed to parse, kept so saving never drops them
    unreadable: Vec<Value>,
    clock: fn() -> DateTime<Utc>,
}

impl<S: Storage> ZineStore<S> {
    /// Load the collection from `storage`
    pub fn open(storage: S) -> Self {
        Self::with_clock(storage, Utc::now)
    }

    /// Load the collection, taking timestamps from `clock`
    pub fn with_clock(storage: S, clock: fn() -> DateTime<Utc>) -> Self {
        let (zines, unreadable) = load_collection(&storage);
        log::debug!("Loaded {} saved zines", zines.len());
        Self {
            storage,
            zines,
            unreadable,
            clock,
        }
    }

    pub fn list_all(&self) -> &[Zine] {
        &self.zines
    }

    pub fn find(&self, id: &str) -> Option<&Zine> {
        self.zines.iter().find(|z| z.id == id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Save a zine and return its id.
    ///
    /// When `existing_id` names a stored record that record is updated in
    /// place; otherwise a new record is appended under a fresh id.
    pub fn save(
        &mut self,
        title: &str,
        cover: &CoverData,
        pages: &PageMap,
        existing_id: Option<&str>,
    ) -> String {
        let now = (self.clock)();
        let title = if title.is_empty() {
            UNTITLED_ZINE
        } else {
            title
        };

        let mut updated = self.zines.clone();
        let id = match existing_id.and_then(|id| updated.iter_mut().find(|z| z.id == id)) {
            Some(zine) => {
                zine.title = title.to_string();
                zine.cover_data = cover.clone();
                zine.page_data = pages.clone();
                zine.date_modified = now;
                zine.id.clone()
            }
            None => {
                let id = self.fresh_id(now);
                updated.push(Zine {
                    id: id.clone(),
                    title: title.to_string(),
                    cover_color: cover.selected_color.clone(),
                    date_created: now,
                    date_modified: now,
                    cover_data: cover.clone(),
                    page_data: pages.clone(),
                });
                id
            }
        };

        self.commit(updated);
        id
    }

    /// Remove a zine. Returns whether it existed.
    pub fn delete(&mut self, id: &str) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        let updated = self.zines.iter().filter(|z| z.id != id).cloned().collect();
        self.commit(updated);
        true
    }

    /// Millisecond timestamp, bumped past any id already in use
    fn fresh_id(&self, now: DateTime<Utc>) -> String {
        let mut millis = now.timestamp_millis();
        loop {
            let candidate = millis.to_string();
            if !self.id_in_use(&candidate) {
                return candidate;
            }
            millis += 1;
        }
    }

    fn id_in_use(&self, id: &str) -> bool {
        self.find(id).is_some()
            || self
                .unreadable
                .iter()
                .any(|record| record.get("id").and_then(Value::as_str) == Some(id))
    }

    fn commit(&mut self, updated: Vec<Zine>) {
        self.zines = updated;
        match self.to_json() {
            Ok(json) => {
                if let Err(e) = self.storage.set(STORAGE_KEY, &json) {
                    log::warn!("Failed to save zines: {}", e);
                }
            }
            Err(e) => log::warn!("Failed to serialize zines: {}", e),
        }
    }

    fn to_json(&self) -> serde_json::Result<String> {
        let mut records = self
            .zines
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<_>>>()?;
        records.extend(self.unreadable.iter().cloned());
        serde_json::to_string(&records)
    }
}

/// Parse the stored collection record by record
fn load_collection(storage: &impl Storage) -> (Vec<Zine>, Vec<Value>) {
    let raw = match storage.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return (Vec::new(), Vec::new()),
        Err(e) => {
            log::warn!("Failed to read saved zines: {}", e);
            return (Vec::new(), Vec::new());
        }
    };

    let records: Vec<Value> = match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            log::warn!("Ignoring unreadable saved zines: {}", e);
            return (Vec::new(), Vec::new());
        }
    };

    let mut zines = Vec::with_capacity(records.len());
    let mut unreadable = Vec::new();
    for record in records {
        match Zine::deserialize(&record) {
            Ok(zine) => zines.push(zine),
            Err(e) => {
                log::warn!("Skipping unreadable saved zine: {}", e);
                unreadable.push(record);
            }
        }
    }
    (zines, unreadable)
}
