// ============================================================================
// STORAGE - Almacenamiento clave/valor duradero (localStorage en navegador)
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("almacenamiento no disponible")]
    Unavailable,
    #[error("error escribiendo la clave {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("error serializando datos: {0}")]
    Serialize(String),
}

/// Ranura clave/valor donde se guarda el carrito
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Almacenamiento en memoria. Se usa en tests y cuando localStorage no existe.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    writes: RefCell<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Claves escritas (set o remove) en orden, para inspección
    pub fn write_log(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writes.borrow_mut().push(format!("set:{}", key));
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.writes.borrow_mut().push(format!("remove:{}", key));
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStore;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{KeyValueStore, StorageError};
    use gloo_storage::{LocalStorage, Storage};

    /// localStorage vía gloo-storage. Guarda cadenas crudas (ya serializadas).
    #[derive(Debug, Default, Clone, Copy)]
    pub struct BrowserStore;

    impl BrowserStore {
        pub fn is_available() -> bool {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .is_some()
        }
    }

    impl KeyValueStore for BrowserStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            match LocalStorage::raw().get_item(key) {
                Ok(value) => Ok(value),
                Err(_) => Err(StorageError::Unavailable),
            }
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            LocalStorage::raw()
                .set_item(key, value)
                .map_err(|e| StorageError::Write {
                    key: key.to_string(),
                    reason: format!("{:?}", e),
                })
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            LocalStorage::delete(key);
            Ok(())
        }
    }
}
