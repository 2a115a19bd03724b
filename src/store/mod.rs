//! Storage layer for the marketplace. Provides whole-file persistence for:
//! - Registered accounts ([`AccountStore`])
//! - Pets currently for sale ([`PetStore`])
//!
//! Each store owns its backing JSON file exclusively and moves the entire
//! collection in one load or save. There is no locking, no version check,
//! and no atomic rename: concurrent mutations of the same store race with
//! last-save-wins semantics.

mod accounts;
mod pets;

pub use accounts::{Account, AccountStore, Role};
pub use pets::{Pet, PetStore};

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing::{error, info};

use crate::error::StorageError;
use crate::upload::UploadStore;

/// The process-wide state a command executes against.
pub struct Stores {
    pub accounts: AccountStore,
    pub pets: PetStore,
    pub uploads: UploadStore,
}

/// Whole-file JSON array persistence for one record type.
pub struct JsonFileStore<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    /// Load the full collection. Read and parse failures are logged and
    /// degrade to an empty collection.
    pub fn load(&self) -> Vec<T> {
        match self.try_load() {
            Ok(records) => records,
            Err(e) => {
                error!("{}", e);
                Vec::new()
            }
        }
    }

    fn try_load(&self) -> Result<Vec<T>, StorageError> {
        let raw = std::fs::read(&self.path).map_err(|source| StorageError::Read {
            path: self.path.display().to_string(),
            source,
        })?;
        serde_json::from_slice(&raw).map_err(|source| StorageError::Parse {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// Overwrite the backing file with the full collection. Failures are
    /// logged and swallowed.
    pub fn save(&self, records: &[T]) {
        match self.try_save(records) {
            Ok(()) => info!(
                "Saved {} records to {}",
                records.len(),
                self.path.display()
            ),
            Err(e) => error!("{}", e),
        }
    }

    fn try_save(&self, records: &[T]) -> Result<(), StorageError> {
        let raw =
            serde_json::to_vec_pretty(records).map_err(|source| StorageError::Encode {
                path: self.path.display().to_string(),
                source,
            })?;
        std::fs::write(&self.path, raw).map_err(|source| StorageError::Write {
            path: self.path.display().to_string(),
            source,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::testutil::temp_path;
    use super::*;

    #[test]
    fn test_save_load_round_trip() {
        let path = temp_path("roundtrip");
        let store: JsonFileStore<Account> = JsonFileStore::new(&path);

        let accounts = vec![
            Account {
                username: "alice".to_string(),
                password: "pw".to_string(),
                role: Role::Manager,
            },
            Account {
                username: "bob".to_string(),
                password: "pw2".to_string(),
                role: Role::User,
            },
        ];
        store.save(&accounts);

        // Order-preserving round trip
        assert_eq!(store.load(), accounts);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let store: JsonFileStore<Account> = JsonFileStore::new(temp_path("missing"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_malformed_file_is_empty() {
        let path = temp_path("malformed");
        std::fs::write(&path, b"{not json").unwrap();
        let store: JsonFileStore<Account> = JsonFileStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_overwrites_whole_file() {
        let path = temp_path("overwrite");
        let store: JsonFileStore<Pet> = JsonFileStore::new(&path);

        let first = vec![Pet {
            id: 1,
            pet_name: "Rex".to_string(),
            pet_type: "dog".to_string(),
            price: "50".to_string(),
            image_url: String::new(),
        }];
        store.save(&first);

        store.save(&[]);
        assert!(store.load().is_empty());
    }
}
