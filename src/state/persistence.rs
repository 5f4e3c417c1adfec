//! Mirrors the gallery state into a durable key-value store.
//!
//! Each of the three record lists lives under its own key and is loaded and
//! written independently: a corrupt slot only empties that one list.

use crate::config::{COLLECTIONS_KEY, DOWNLOADS_KEY, IMAGES_KEY};
use crate::models::{Collection, DownloadRecord, Image};
use crate::storage::KeyValueStore;
use log::{debug, error, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// One of the three independently stored record lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Images,
    Collections,
    Downloads,
}

impl Slot {
    pub fn key(self) -> &'static str {
        match self {
            Slot::Images => IMAGES_KEY,
            Slot::Collections => COLLECTIONS_KEY,
            Slot::Downloads => DOWNLOADS_KEY,
        }
    }
}

/// Records read from the store at startup.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub images: Vec<Image>,
    pub collections: Vec<Collection>,
    pub downloads: Vec<DownloadRecord>,
}

/// Adapter between the in-memory state and the durable store.
///
/// Writes are ignored until [`Persistence::hydrate`] has run, so an empty
/// startup value never overwrites what is on disk. Without a store every
/// call is a no-op and state lives for the session only.
pub struct Persistence {
    store: Option<Box<dyn KeyValueStore>>,
    hydrated: bool,
}

impl Persistence {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store: Some(store),
            hydrated: false,
        }
    }

    /// An adapter with no backing store.
    pub fn detached() -> Self {
        Self {
            store: None,
            hydrated: false,
        }
    }

    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Reads all three slots and enables mirroring.
    pub fn hydrate(&mut self) -> Snapshot {
        let snapshot = match self.store.as_deref() {
            Some(store) => Snapshot {
                images: load_slot(store, Slot::Images),
                collections: load_slot(store, Slot::Collections),
                downloads: load_slot(store, Slot::Downloads),
            },
            None => {
                debug!("No durable store available, starting with session-only state");
                Snapshot::default()
            }
        };
        self.hydrated = true;
        snapshot
    }

    /// Writes one slot. Failures are logged and otherwise ignored.
    pub fn mirror<T: Serialize>(&mut self, slot: Slot, records: &[T]) {
        if !self.hydrated {
            debug!("Skipping write of {} before hydration", slot.key());
            return;
        }
        let Some(store) = self.store.as_deref_mut() else {
            return;
        };

        let raw = match serde_json::to_string(records) {
            Ok(raw) => raw,
            Err(e) => {
                error!("Failed to encode {}: {}", slot.key(), e);
                return;
            }
        };

        if let Err(e) = store.set(slot.key(), &raw) {
            error!("Failed to write {}: {}", slot.key(), e);
        }
    }
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("available", &self.is_available())
            .field("hydrated", &self.hydrated)
            .finish()
    }
}

/// Loads one slot, falling back to an empty list when absent or unreadable.
fn load_slot<T: DeserializeOwned>(store: &dyn KeyValueStore, slot: Slot) -> Vec<T> {
    let raw = match store.get(slot.key()) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No stored value for {}", slot.key());
            return Vec::new();
        }
        Err(e) => {
            warn!("Failed to read {}: {}", slot.key(), e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(records) => {
            info!("Loaded {} records from {}", records.len(), slot.key());
            records
        }
        Err(e) => {
            error!("Failed to parse {}: {}", slot.key(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::storage::MemoryStore;

    #[test]
    fn writes_before_hydration_are_dropped() {
        let mut backing = MemoryStore::new();
        backing.set(IMAGES_KEY, "[]").unwrap();

        let mut persistence = Persistence::new(Box::new(backing.clone()));
        let image = Image::new("https://x/a.png", "A", "a", Category::Other);
        persistence.mirror(Slot::Images, std::slice::from_ref(&image));
        assert_eq!(backing.get(IMAGES_KEY).unwrap().as_deref(), Some("[]"));

        persistence.hydrate();
        persistence.mirror(Slot::Images, std::slice::from_ref(&image));
        let stored: Vec<Image> =
            serde_json::from_str(&backing.get(IMAGES_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored, vec![image]);
    }

    #[test]
    fn detached_adapter_is_a_no_op() {
        let mut persistence = Persistence::detached();
        assert!(!persistence.is_available());
        let snapshot = persistence.hydrate();
        assert!(snapshot.images.is_empty());
        persistence.mirror::<Image>(Slot::Images, &[]);
        assert!(persistence.is_hydrated());
    }

    #[test]
    fn non_array_value_falls_back_to_empty() {
        let mut backing = MemoryStore::new();
        backing.set(DOWNLOADS_KEY, r#"{"not":"a list"}"#).unwrap();
        let snapshot = Persistence::new(Box::new(backing)).hydrate();
        assert!(snapshot.downloads.is_empty());
    }
}
