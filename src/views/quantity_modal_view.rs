// ============================================================================
// QUANTITY MODAL VIEW - Popup de cantidad sobre el listado de productos
// ============================================================================
// El estado vive en `QuantityModal`; esta vista solo refleja clases CSS,
// mueve el foco y conecta los controles.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent, MouseEvent};

use crate::dom::{
    add_class, document, get_attribute, get_element_by_id, get_input_by_id, on_click, on_keydown,
    remove_class, toggle_body_class, BindingRegistry,
};
use crate::models::PendingSelection;
use crate::state::CartStore;
use crate::utils::constants::*;
use crate::viewmodels::{KeyOutcome, QuantityModal};

#[derive(Clone)]
pub struct QuantityModalView {
    modal: Rc<RefCell<QuantityModal>>,
    store: CartStore,
    bound: Rc<BindingRegistry<Element>>,
    product_list_id: String,
}

impl QuantityModalView {
    pub fn new(store: CartStore, product_list_id: &str) -> Self {
        Self {
            modal: Rc::new(RefCell::new(QuantityModal::new())),
            store,
            bound: Rc::new(BindingRegistry::new()),
            product_list_id: product_list_id.to_string(),
        }
    }

    /// Controles fijos del modal (una sola vez al montar la página)
    pub fn mount(&self) -> Result<(), JsValue> {
        if let Some(backdrop) = get_element_by_id(QTY_BACKDROP_ID) {
            let view = self.clone();
            on_click(&backdrop, move |_e| {
                if view.modal.borrow_mut().close_via_backdrop() {
                    view.hide();
                }
            })?;
        }

        for id in [QTY_CLOSE_BTN_ID, CANCEL_QTY_BTN_ID] {
            if let Some(button) = get_element_by_id(id) {
                let view = self.clone();
                on_click(&button, move |_e| {
                    if view.modal.borrow_mut().cancel() {
                        view.hide();
                    }
                })?;
            }
        }

        if let Some(confirm) = get_element_by_id(ADD_TO_CART_BTN_ID) {
            let view = self.clone();
            on_click(&confirm, move |_e| view.confirm())?;
        }

        if let Some(input) = get_input_by_id(QTY_INPUT_ID) {
            let view = self.clone();
            on_keydown(&input, move |e: KeyboardEvent| view.handle_key(&e))?;
        }

        // Escape con el foco fuera del campo
        if let Some(doc) = document() {
            let view = self.clone();
            on_keydown(&doc, move |e: KeyboardEvent| {
                if e.key() == "Escape" && view.modal.borrow_mut().close_via_escape_key() {
                    view.hide();
                }
            })?;
        }

        Ok(())
    }

    /// Enlaza un click delegado en el contenedor del listado (`#productList`,
    /// o `<body>` si la página no lo tiene). Los swaps de paginación reemplazan
    /// solo su contenido, así que llamarlo de nuevo no agrega listeners; un
    /// contenedor nuevo sí se enlaza y el viejo se olvida.
    pub fn bind_product_list(&self) -> Result<bool, JsValue> {
        let pruned = self.bound.retain(|element| element.is_connected());
        if pruned > 0 {
            log::debug!("🧹 [MODAL] {} contenedores fuera del documento", pruned);
        }

        let container = match get_element_by_id(&self.product_list_id) {
            Some(container) => container,
            None => document()
                .and_then(|d| d.body())
                .map(Element::from)
                .ok_or_else(|| JsValue::from_str("No body"))?,
        };

        let view = self.clone();
        let mut failure = None;
        let attached = self.bound.attach_with(container, |container| {
            match on_click(container, move |e: MouseEvent| view.handle_list_click(&e)) {
                Ok(()) => true,
                Err(e) => {
                    failure = Some(e);
                    false
                }
            }
        });
        if let Some(e) = failure {
            return Err(e);
        }
        if attached {
            log::info!("🔗 [MODAL] Listado enlazado (#{})", self.product_list_id);
        }
        Ok(attached)
    }

    fn handle_list_click(&self, e: &MouseEvent) {
        let row = e
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|t| t.closest(OPEN_QTY_SELECTOR).ok().flatten())
            .and_then(|button| button.closest(PRODUCT_ROW_SELECTOR).ok().flatten());
        if let Some(product) = row.as_ref().and_then(selection_from_row) {
            self.open(product);
        }
    }

    pub fn open(&self, product: PendingSelection) {
        self.modal.borrow_mut().open(product);
        let input = get_input_by_id(QTY_INPUT_ID);
        if let Some(input) = &input {
            input.set_value(self.modal.borrow().quantity_input());
        }
        self.set_visible(true);

        // Foco tras el repintado
        if let Some(input) = input {
            Timeout::new(0, move || {
                if let Err(e) = input.focus() {
                    log::warn!("⚠️ [MODAL] No se pudo enfocar #{}: {:?}", QTY_INPUT_ID, e);
                }
                input.select();
            })
            .forget();
        }
    }

    fn confirm(&self) {
        if let Some(input) = get_input_by_id(QTY_INPUT_ID) {
            self.modal.borrow_mut().set_quantity_input(&input.value());
        }
        let line = self.modal.borrow_mut().confirm(&self.store);
        if let Some(line) = line {
            log::info!("🛒 [MODAL] {} → {} unidades", line.code, line.quantity);
            self.hide();
            focus_code_input();
        }
    }

    fn handle_key(&self, e: &KeyboardEvent) {
        if let Some(input) = get_input_by_id(QTY_INPUT_ID) {
            self.modal.borrow_mut().set_quantity_input(&input.value());
        }
        let outcome = self.modal.borrow_mut().handle_key(&e.key(), &self.store);
        match outcome {
            KeyOutcome::Confirmed(_) => {
                e.prevent_default();
                self.hide();
                focus_code_input();
            }
            KeyOutcome::Closed => self.hide(),
            KeyOutcome::Ignored => {}
        }
    }

    fn hide(&self) {
        self.set_visible(false);
    }

    fn set_visible(&self, visible: bool) {
        for id in [QTY_POP_ID, QTY_BACKDROP_ID] {
            if let Some(element) = get_element_by_id(id) {
                let result = if visible {
                    add_class(&element, SHOW_CLASS)
                } else {
                    remove_class(&element, SHOW_CLASS)
                };
                if let Err(e) = result {
                    log::warn!("⚠️ [MODAL] No se pudo actualizar #{}: {:?}", id, e);
                }
            }
        }
        if let Err(e) = toggle_body_class(MODAL_OPEN_BODY_CLASS, visible) {
            log::warn!("⚠️ [MODAL] No se pudo actualizar body: {:?}", e);
        }
    }
}

/// Código y nombre desde los atributos `data-*` de la fila
fn selection_from_row(row: &Element) -> Option<PendingSelection> {
    let code = get_attribute(row, DATA_CODE_ATTR)?;
    if code.trim().is_empty() {
        return None;
    }
    let name = get_attribute(row, DATA_NAME_ATTR).unwrap_or_default();
    Some(PendingSelection::new(code, name))
}

pub(crate) fn focus_code_input() {
    if let Some(input) = get_element_by_id(CODE_INPUT_ID).and_then(|e| e.dyn_into::<HtmlElement>().ok()) {
        if let Err(e) = input.focus() {
            log::warn!("⚠️ [CODE] No se pudo enfocar #{}: {:?}", CODE_INPUT_ID, e);
        }
    }
}
