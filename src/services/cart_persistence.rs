use std::rc::Rc;

use crate::models::{Cart, PersistedCartRecord};
use crate::services::storage::{KeyValueStore, StorageError};

/// Lectura/escritura del carrito en la ranura duradera
#[derive(Clone)]
pub struct CartPersistence {
    store: Rc<dyn KeyValueStore>,
    key: String,
}

impl CartPersistence {
    pub fn new(store: Rc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Carga el carrito guardado. Registro ausente o corrupto → carrito vacío.
    pub fn load(&self) -> Cart {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(e) => {
                log::warn!("⚠️ [CART] No se pudo leer el carrito guardado: {}", e);
                return Cart::new();
            }
        };

        match serde_json::from_str::<PersistedCartRecord>(&raw) {
            Ok(record) => Cart::from_record(record),
            Err(e) => {
                log::warn!("⚠️ [CART] Carrito guardado corrupto, se descarta: {}", e);
                Cart::new()
            }
        }
    }

    /// Guarda el carrito; un carrito vacío elimina la clave
    pub fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        if cart.is_empty() {
            return self.clear();
        }
        let json = serde_json::to_string(&cart.to_record())
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.store.set(&self.key, &json)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(&self.key)
    }
}
