// ============================================================================
// QUANTITY MODAL VIEWMODEL - Máquina de estados del modal de cantidad
// ============================================================================
// Closed ──open(p)──▶ Open(p) ──confirm()──▶ Closed   (agrega al carrito)
//                       │
//                       └──cancel / backdrop / Escape──▶ Closed (sin cambios)
// ============================================================================

use crate::models::{parse_quantity, CartLine, PendingSelection};
use crate::state::CartStore;

/// Valor inicial del campo de cantidad al abrir
pub const DEFAULT_QUANTITY_INPUT: &str = "1";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open(PendingSelection),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    Confirmed,
    Cancelled,
    Backdrop,
    Escape,
}

/// Resultado de una tecla presionada con el modal en pantalla
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Confirmed(CartLine),
    Closed,
    Ignored,
}

#[derive(Clone, Debug)]
pub struct QuantityModal {
    state: ModalState,
    quantity_input: String,
}

impl Default for QuantityModal {
    fn default() -> Self {
        Self::new()
    }
}

impl QuantityModal {
    pub fn new() -> Self {
        Self {
            state: ModalState::Closed,
            quantity_input: DEFAULT_QUANTITY_INPUT.to_string(),
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    pub fn pending(&self) -> Option<&PendingSelection> {
        match &self.state {
            ModalState::Open(product) => Some(product),
            ModalState::Closed => None,
        }
    }

    pub fn quantity_input(&self) -> &str {
        &self.quantity_input
    }

    /// Abre el modal para `product`; el campo vuelve a "1".
    /// Abrir con el modal ya abierto reemplaza la selección pendiente.
    pub fn open(&mut self, product: PendingSelection) {
        log::info!("🔢 [MODAL] Abriendo modal para {} ({})", product.code, product.name);
        self.quantity_input = DEFAULT_QUANTITY_INPUT.to_string();
        self.state = ModalState::Open(product);
    }

    /// Refleja el texto actual del campo de cantidad
    pub fn set_quantity_input(&mut self, raw: &str) {
        self.quantity_input = raw.to_string();
    }

    /// Agrega la selección pendiente al carrito y cierra.
    /// Con el modal cerrado no hace nada.
    pub fn confirm(&mut self, store: &CartStore) -> Option<CartLine> {
        let product = match std::mem::replace(&mut self.state, ModalState::Closed) {
            ModalState::Open(product) => product,
            ModalState::Closed => return None,
        };
        let quantity = parse_quantity(&self.quantity_input);
        store.add(&product.code, &product.name, quantity);
        self.log_close(CloseReason::Confirmed);
        store.cart().get(product.code.trim())
    }

    pub fn cancel(&mut self) -> bool {
        self.close(CloseReason::Cancelled)
    }

    pub fn close_via_backdrop(&mut self) -> bool {
        self.close(CloseReason::Backdrop)
    }

    pub fn close_via_escape_key(&mut self) -> bool {
        self.close(CloseReason::Escape)
    }

    /// Enter dentro del campo ≡ confirmar; Escape ≡ cerrar
    pub fn handle_key(&mut self, key: &str, store: &CartStore) -> KeyOutcome {
        if !self.is_open() {
            return KeyOutcome::Ignored;
        }
        match key {
            "Enter" => match self.confirm(store) {
                Some(line) => KeyOutcome::Confirmed(line),
                None => KeyOutcome::Ignored,
            },
            "Escape" => {
                self.close_via_escape_key();
                KeyOutcome::Closed
            }
            _ => KeyOutcome::Ignored,
        }
    }

    fn close(&mut self, reason: CloseReason) -> bool {
        if !self.is_open() {
            return false;
        }
        self.state = ModalState::Closed;
        self.log_close(reason);
        true
    }

    fn log_close(&self, reason: CloseReason) {
        log::info!("🔢 [MODAL] Modal cerrado ({:?})", reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductRef;
    use crate::services::{CartPersistence, MemoryStore};
    use std::rc::Rc;

    fn store() -> CartStore {
        CartStore::open(CartPersistence::new(Rc::new(MemoryStore::new()), "k"))
    }

    fn product() -> PendingSelection {
        ProductRef::new("P-1", "Pintura")
    }

    #[test]
    fn starts_closed() {
        let modal = QuantityModal::new();
        assert_eq!(modal.state(), &ModalState::Closed);
        assert!(modal.pending().is_none());
    }

    #[test]
    fn open_resets_quantity_field() {
        let mut modal = QuantityModal::new();
        modal.open(product());
        modal.set_quantity_input("7");
        modal.cancel();
        modal.open(product());
        assert_eq!(modal.quantity_input(), "1");
        assert_eq!(modal.pending(), Some(&product()));
    }

    #[test]
    fn confirming_twice_accumulates() {
        let store = store();
        let mut modal = QuantityModal::new();

        modal.open(product());
        modal.set_quantity_input("5");
        modal.confirm(&store);

        modal.open(product());
        modal.set_quantity_input("3");
        let line = modal.confirm(&store).unwrap();

        assert_eq!(line.quantity, 8);
        assert_eq!(store.kinds(), 1);
        assert!(!modal.is_open());
    }

    #[test]
    fn invalid_quantities_become_one() {
        for raw in ["0", "-4", "abc", ""] {
            let store = store();
            let mut modal = QuantityModal::new();
            modal.open(product());
            modal.set_quantity_input(raw);
            let line = modal.confirm(&store).unwrap();
            assert_eq!(line.quantity, 1, "entrada: {:?}", raw);
        }
    }

    #[test]
    fn confirm_while_closed_is_noop() {
        let store = store();
        let mut modal = QuantityModal::new();
        assert_eq!(modal.confirm(&store), None);
        assert!(store.is_empty());
    }

    #[test]
    fn dismiss_paths_discard_selection() {
        let store = store();
        let dismissals: [fn(&mut QuantityModal) -> bool; 3] = [
            QuantityModal::cancel,
            QuantityModal::close_via_backdrop,
            QuantityModal::close_via_escape_key,
        ];
        for dismiss in dismissals {
            let mut modal = QuantityModal::new();
            modal.open(product());
            modal.set_quantity_input("9");
            assert!(dismiss(&mut modal));
            assert!(modal.pending().is_none());
            assert!(!dismiss(&mut modal));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn keys_drive_the_modal() {
        let store = store();
        let mut modal = QuantityModal::new();
        assert_eq!(modal.handle_key("Enter", &store), KeyOutcome::Ignored);

        modal.open(product());
        modal.set_quantity_input("2");
        assert_eq!(modal.handle_key("a", &store), KeyOutcome::Ignored);
        match modal.handle_key("Enter", &store) {
            KeyOutcome::Confirmed(line) => assert_eq!(line.quantity, 2),
            other => panic!("se esperaba confirmación, llegó {:?}", other),
        }

        modal.open(product());
        assert_eq!(modal.handle_key("Escape", &store), KeyOutcome::Closed);
        assert_eq!(store.units(), 2);
    }
}
