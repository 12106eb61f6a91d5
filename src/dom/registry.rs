// ============================================================================
// BINDING REGISTRY - Elementos que ya tienen su listener
// ============================================================================
// Reemplaza las banderas en el propio elemento: un elemento se enlaza solo si
// no está registrado (comparación por identidad, `==` sobre el handle).
// ============================================================================

use std::cell::RefCell;

#[derive(Debug)]
pub struct BindingRegistry<T> {
    bound: RefCell<Vec<T>>,
}

impl<T> Default for BindingRegistry<T> {
    fn default() -> Self {
        Self {
            bound: RefCell::new(Vec::new()),
        }
    }
}

impl<T: PartialEq + Clone> BindingRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_bound(&self, item: &T) -> bool {
        self.bound.borrow().iter().any(|b| b == item)
    }

    /// Enlaza `item` con `bind` si aún no estaba registrado.
    /// Devuelve `true` si se enlazó ahora.
    pub fn attach_with<F>(&self, item: T, bind: F) -> bool
    where
        F: FnOnce(&T) -> bool,
    {
        if self.is_bound(&item) {
            return false;
        }
        // `bind` corre sin préstamo activo sobre el registro
        if !bind(&item) {
            return false;
        }
        self.bound.borrow_mut().push(item);
        true
    }

    /// Descarta los elementos que ya no cumplen `keep` (p.ej. fuera del documento)
    pub fn retain<F>(&self, keep: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut bound = self.bound.borrow_mut();
        let before = bound.len();
        bound.retain(keep);
        before - bound.len()
    }

    pub fn len(&self) -> usize {
        self.bound.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn attach_is_idempotent() {
        let registry = BindingRegistry::new();
        let calls = Cell::new(0);
        let bind = |_: &&str| {
            calls.set(calls.get() + 1);
            true
        };
        assert!(registry.attach_with("btn-1", bind));
        assert!(!registry.attach_with("btn-1", bind));
        assert!(registry.attach_with("btn-2", bind));
        assert_eq!(calls.get(), 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn failed_bind_is_not_registered() {
        let registry = BindingRegistry::new();
        assert!(!registry.attach_with(1u32, |_| false));
        assert!(!registry.is_bound(&1));
        assert!(registry.attach_with(1u32, |_| true));
    }

    #[test]
    fn retain_prunes_detached_items() {
        let registry = BindingRegistry::new();
        for id in 0..4u32 {
            registry.attach_with(id, |_| true);
        }
        assert_eq!(registry.retain(|id| id % 2 == 0), 2);
        assert!(!registry.is_bound(&1));
        assert!(registry.attach_with(1, |_| true));
    }
}
