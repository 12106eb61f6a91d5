// ============================================================================
// REACTIVITY - Sistema de notificaciones/subscribers para reactividad
// ============================================================================

use std::cell::{Ref, RefCell};
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// Estado reactivo con sistema de notificaciones.
/// Los clones comparten valor y subscribers.
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<Callback>>>,
}

impl<T> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Referencia de solo lectura al valor
    pub fn borrow(&self) -> Ref<'_, T> {
        self.value.borrow()
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Actualizar con closure; notifica solo si el closure informa un cambio
    pub fn update<F>(&self, updater: F) -> bool
    where
        F: FnOnce(&mut T) -> bool,
    {
        let changed = updater(&mut *self.value.borrow_mut());
        if changed {
            self.notify();
        }
        changed
    }

    /// Suscribirse a cambios
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers, en orden de suscripción.
    /// Se itera sobre una copia: un subscriber puede suscribir a otros.
    pub fn notify(&self) {
        let callbacks: Vec<Callback> = self.subscribers.borrow().clone();
        for callback in callbacks {
            callback();
        }
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn update_notifies_only_on_change() {
        let state = ReactiveState::new(0u32);
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        state.subscribe(move || counter.set(counter.get() + 1));

        assert!(state.update(|v| {
            *v += 1;
            true
        }));
        assert!(!state.update(|_| false));
        assert_eq!(hits.get(), 1);
        assert_eq!(*state.borrow(), 1);
    }

    #[test]
    fn clones_share_subscribers() {
        let state = ReactiveState::new(String::new());
        let other = state.clone();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let reader = state.clone();
        state.subscribe(move || sink.borrow_mut().push(reader.borrow().clone()));

        other.set("a".into());
        other.set("b".into());
        assert_eq!(*seen.borrow(), vec!["a".to_string(), "b".to_string()]);
    }
}
