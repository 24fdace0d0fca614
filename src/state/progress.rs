//! Best-effort persistence of small JSON blobs in local storage.
//!
//! Nothing here ever fails loudly: a missing or disabled storage behaves like
//! an empty one, corrupt values read as absent, and failed writes are logged
//! and dropped.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;
use crate::model::StoredProgress;

pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// The window's `localStorage`.
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    pub fn local() -> Result<Self, StorageError> {
        web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .map(|storage| Self { storage })
            .ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|_| StorageError::Read { key: key.into() })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|_| StorageError::Write { key: key.into() })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|_| StorageError::Write { key: key.into() })
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().insert(key.into(), value.into());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Stand-in when storage is disabled: remembers nothing.
pub struct NoopStorage;

impl KeyValueStore for NoopStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

#[derive(Clone)]
pub struct ProgressStore {
    backend: Rc<dyn KeyValueStore>,
}

impl ProgressStore {
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Local storage, or a no-op store if the browser refuses it.
    pub fn browser() -> Self {
        match BrowserStorage::local() {
            Ok(storage) => Self::new(Rc::new(storage)),
            Err(e) => {
                log::warn!("{e}; progress will not be kept");
                Self::new(Rc::new(NoopStorage))
            }
        }
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStorage::default()))
    }

    pub fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.backend.get_item(key)? else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt { key: key.into(), source })
    }

    /// Reads `key`, falling back to `fallback` on absence or any failure.
    pub fn load<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => fallback,
            Err(e) => {
                log::warn!("Could not read stored value: {e}");
                fallback
            }
        }
    }

    pub fn try_save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set_item(key, &raw)
    }

    /// Fire-and-forget write.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_save(key, value) {
            log::warn!("Could not persist value: {e}");
        }
    }

    pub fn load_progress(&self, key: &str) -> Option<StoredProgress> {
        self.load(key, None)
    }

    pub fn save_progress(&self, key: &str, progress: &StoredProgress) {
        self.save(key, progress);
    }

    pub fn clear(&self, key: &str) {
        if let Err(e) = self.backend.remove_item(key) {
            log::warn!("Could not clear stored value: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MistakeMap;

    struct BrokenStorage;

    impl KeyValueStore for BrokenStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Read { key: key.into() })
        }
        fn set_item(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write { key: key.into() })
        }
        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            Err(StorageError::Write { key: key.into() })
        }
    }

    fn sample() -> StoredProgress {
        StoredProgress {
            index: Some(3),
            mistakes: Some(MistakeMap::from([("haus".into(), 2), ("vater".into(), 1)])),
        }
    }

    #[test]
    fn progress_round_trips() {
        let store = ProgressStore::in_memory();
        store.save_progress("k", &sample());
        assert_eq!(store.load_progress("k"), Some(sample()));
    }

    #[test]
    fn missing_key_returns_the_fallback() {
        let store = ProgressStore::in_memory();
        assert_eq!(store.load_progress("nothing"), None);
        assert_eq!(store.load("nothing", 17_u32), 17);
    }

    #[test]
    fn corrupt_json_reads_as_absent() {
        let backend = Rc::new(MemoryStorage::default());
        backend.set_item("k", "{index: oops").unwrap();
        backend.set_item("neg", r#"{"mistakes":{"haus":-1}}"#).unwrap();
        backend.set_item("blank", "").unwrap();
        let store = ProgressStore::new(backend);
        assert_eq!(store.load_progress("k"), None);
        assert_eq!(store.load_progress("neg"), None);
        assert_eq!(store.load_progress("blank"), None);
        assert!(matches!(
            store.try_load::<StoredProgress>("k"),
            Err(StorageError::Corrupt { .. })
        ));
    }

    #[test]
    fn disabled_storage_forgets_silently() {
        let store = ProgressStore::new(Rc::new(NoopStorage));
        store.save_progress("k", &sample());
        assert_eq!(store.load_progress("k"), None);
    }

    #[test]
    fn failing_storage_never_panics() {
        let store = ProgressStore::new(Rc::new(BrokenStorage));
        store.save_progress("k", &sample());
        store.clear("k");
        assert_eq!(store.load("k", sample()), sample());
        assert!(store.try_save("k", &sample()).is_err());
    }

    #[test]
    fn clear_removes_the_key() {
        let store = ProgressStore::in_memory();
        store.save_progress("k", &sample());
        store.clear("k");
        assert_eq!(store.load_progress("k"), None);
    }
}
