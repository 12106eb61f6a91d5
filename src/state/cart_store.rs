// ============================================================================
// CART STORE - Dueño del carrito + escritura en almacenamiento
// ============================================================================
// Toda mutación pasa por aquí: se persiste y luego se notifica a los
// subscribers (vista del carrito), en el mismo orden de las mutaciones.
// Nada se escribe antes de hidratar desde el almacenamiento.
// ============================================================================

use std::cell::{Cell, Ref};
use std::rc::Rc;

use crate::models::{Cart, CartSnapshot, PLACEHOLDER_NAME};
use crate::services::CartPersistence;
use crate::state::ReactiveState;

#[derive(Clone)]
pub struct CartStore {
    cart: ReactiveState<Cart>,
    hydrated: Rc<Cell<bool>>,
    persistence: CartPersistence,
}

impl CartStore {
    /// Store sin hidratar: rechaza mutaciones hasta llamar a `hydrate`
    pub fn new(persistence: CartPersistence) -> Self {
        Self {
            cart: ReactiveState::new(Cart::new()),
            hydrated: Rc::new(Cell::new(false)),
            persistence,
        }
    }

    /// Crea el store y lo hidrata de inmediato
    pub fn open(persistence: CartPersistence) -> Self {
        let store = Self::new(persistence);
        store.hydrate();
        store
    }

    /// Carga el carrito guardado. Solo tiene efecto la primera vez.
    pub fn hydrate(&self) -> bool {
        if self.hydrated.get() {
            log::warn!("⚠️ [CART] hydrate() ya fue llamado, ignorando");
            return false;
        }
        let loaded = self.persistence.load();
        log::info!(
            "💾 [CART] Carrito restaurado: {} productos, {} unidades",
            loaded.kinds(),
            loaded.units()
        );
        self.hydrated.set(true);
        self.cart.set(loaded);
        true
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated.get()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.cart.subscribe(callback);
    }

    pub fn cart(&self) -> Ref<'_, Cart> {
        self.cart.borrow()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.cart.borrow().snapshot()
    }

    pub fn kinds(&self) -> usize {
        self.cart.borrow().kinds()
    }

    pub fn units(&self) -> u64 {
        self.cart.borrow().units()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.borrow().is_empty()
    }

    pub fn add(&self, code: &str, name: &str, quantity: u32) -> bool {
        let name = if name.trim().is_empty() { PLACEHOLDER_NAME } else { name };
        self.mutate("add", |cart| cart.add(code, name, quantity))
    }

    /// Agrega una unidad
    pub fn add_one(&self, code: &str, name: &str) -> bool {
        self.add(code, name, 1)
    }

    pub fn set_quantity(&self, code: &str, quantity: i64) -> bool {
        self.mutate("set_quantity", |cart| cart.set_quantity(code, quantity))
    }

    pub fn increment(&self, code: &str) -> bool {
        self.mutate("increment", |cart| cart.increment(code))
    }

    pub fn decrement(&self, code: &str) -> bool {
        self.mutate("decrement", |cart| cart.decrement(code))
    }

    pub fn remove(&self, code: &str) -> bool {
        self.mutate("remove", |cart| cart.remove(code))
    }

    pub fn clear(&self) -> bool {
        self.mutate("clear", Cart::clear)
    }

    /// Escritura síncrona de respaldo (antes de descargar la página)
    pub fn flush(&self) {
        if !self.hydrated.get() {
            return;
        }
        if let Err(e) = self.persistence.save(&self.cart.borrow()) {
            log::warn!("⚠️ [CART] Error guardando carrito en flush: {}", e);
        }
    }

    fn mutate<F>(&self, operation: &str, op: F) -> bool
    where
        F: FnOnce(&mut Cart) -> bool,
    {
        if !self.hydrated.get() {
            log::warn!("⚠️ [CART] {} rechazado: carrito aún no hidratado", operation);
            return false;
        }
        let persistence = &self.persistence;
        self.cart.update(|cart| {
            let changed = op(cart);
            if changed {
                if let Err(e) = persistence.save(cart) {
                    log::warn!("⚠️ [CART] Error guardando carrito tras {}: {}", operation, e);
                }
            }
            changed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryStore;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    const KEY: &str = "salida_cart";

    fn store_with(raw: Option<&str>) -> (Rc<MemoryStore>, CartPersistence) {
        let memory = Rc::new(match raw {
            Some(raw) => MemoryStore::with_entry(KEY, raw),
            None => MemoryStore::new(),
        });
        let persistence = CartPersistence::new(memory.clone(), KEY);
        (memory, persistence)
    }

    #[test]
    fn hydrates_saved_cart_before_any_write() {
        let saved = r#"[["A",{"name":"a","qty":1}],["B",{"name":"b","qty":2}],["C",{"name":"c","qty":3}]]"#;
        let (memory, persistence) = store_with(Some(saved));
        let store = CartStore::new(persistence);

        // Antes de hidratar no se escribe nada aunque se intente mutar
        assert!(!store.add("Z", "z", 1));
        store.flush();
        assert!(memory.write_log().is_empty());

        assert!(store.hydrate());
        assert_eq!(store.kinds(), 3);
        assert_eq!(store.units(), 6);
        assert_eq!(memory.raw(KEY).as_deref(), Some(saved));
    }

    #[test]
    fn hydration_happens_once() {
        let (_memory, persistence) = store_with(Some(r#"[["A",{"name":"a","qty":1}]]"#));
        let store = CartStore::open(persistence);
        store.add("B", "b", 1);
        assert!(!store.hydrate());
        assert_eq!(store.kinds(), 2);
    }

    #[test]
    fn corrupt_storage_hydrates_empty() {
        let (_memory, persistence) = store_with(Some("###"));
        let store = CartStore::open(persistence);
        assert!(store.is_hydrated());
        assert!(store.is_empty());
    }

    #[test]
    fn mutations_write_through_and_notify_in_order() {
        let (memory, persistence) = store_with(None);
        let store = CartStore::open(persistence.clone());
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = seen.clone();
            let reader = store.clone();
            store.subscribe(move || seen.borrow_mut().push(reader.units()));
        }

        store.add("A", "a", 2);
        store.increment("A");
        store.add("B", "b", 4);
        store.decrement("B");
        store.remove("A");

        assert_eq!(*seen.borrow(), vec![2, 3, 7, 6, 3]);
        assert_eq!(persistence.load(), store.cart().clone());
        assert_eq!(memory.write_log().len(), 5);
    }

    #[test]
    fn no_op_mutations_do_not_notify() {
        let (memory, persistence) = store_with(None);
        let store = CartStore::open(persistence);
        let hits = Rc::new(Cell::new(0));
        {
            let hits = hits.clone();
            store.subscribe(move || hits.set(hits.get() + 1));
        }
        store.remove("nada");
        store.set_quantity("nada", 3);
        store.add("  ", "x", 1);
        store.clear();
        assert_eq!(hits.get(), 0);
        assert!(memory.write_log().is_empty());
    }

    #[test]
    fn clear_removes_persisted_record() {
        let (memory, persistence) = store_with(None);
        let store = CartStore::open(persistence);
        store.add("A", "a", 1);
        assert!(memory.raw(KEY).is_some());
        store.clear();
        assert!(store.is_empty());
        assert_eq!(memory.raw(KEY), None);
    }

    #[test]
    fn blank_name_uses_placeholder() {
        let (_memory, persistence) = store_with(None);
        let store = CartStore::open(persistence);
        store.add_one("A", "  ");
        assert_eq!(store.cart().get("A").unwrap().name, PLACEHOLDER_NAME);
    }
}
