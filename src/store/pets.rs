use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use super::JsonFileStore;
use crate::util::time::now_ms;

/// A pet currently offered for sale. Existence in the store means it is
/// available; a purchase deletes the record outright.
///
/// Field names stay camelCase on the wire and in the persisted file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: u64,
    pub pet_name: String,
    pub pet_type: String,
    /// Stored verbatim as submitted, not parsed or validated.
    pub price: String,
    /// `/uploads/<file>` reference, or empty when no image was attached.
    pub image_url: String,
}

/// The set of pets for sale, persisted as one JSON array.
pub struct PetStore {
    inner: JsonFileStore<Pet>,
    /// Seeded from wall-clock milliseconds at startup. Ids stay
    /// time-derived but cannot collide within a process.
    next_id: AtomicU64,
}

impl PetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: JsonFileStore::new(path),
            next_id: AtomicU64::new(now_ms()),
        }
    }

    pub fn load(&self) -> Vec<Pet> {
        self.inner.load()
    }

    pub fn save(&self, pets: &[Pet]) {
        self.inner.save(pets)
    }

    /// Allocate the id for a new listing.
    pub fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}
