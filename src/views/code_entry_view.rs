// ============================================================================
// CODE ENTRY VIEW - Formulario "agregar por código" + mensaje de estado
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Event;

use crate::config::AppConfig;
use crate::dom::{
    add_class, get_element_by_id, get_input_by_id, on_event, remove_class, set_style,
    set_text_content, DomCatalog,
};
use crate::services::ApiClient;
use crate::state::CartStore;
use crate::utils::constants::*;
use crate::viewmodels::{CodeEntryForm, MessageKind, StatusBanner, StatusMessage};
use crate::views::quantity_modal_view::focus_code_input;

#[derive(Clone)]
pub struct CodeEntryView {
    form: CodeEntryForm,
    banner: Rc<RefCell<StatusBanner>>,
    store: CartStore,
    api: Rc<ApiClient>,
    message_ms: u32,
    fade_ms: u32,
}

impl CodeEntryView {
    pub fn new(config: &AppConfig, store: CartStore, api: Rc<ApiClient>) -> Self {
        Self {
            form: CodeEntryForm::new(config.remote_lookup_enabled),
            banner: Rc::new(RefCell::new(StatusBanner::new())),
            store,
            api,
            message_ms: config.status_message_ms,
            fade_ms: config.status_fade_ms,
        }
    }

    pub fn mount(&self) -> Result<(), JsValue> {
        let form = match get_element_by_id(ADD_BY_CODE_FORM_ID) {
            Some(form) => form,
            None => {
                log::debug!("ℹ️ [CODE] Página sin formulario de código");
                return Ok(());
            }
        };

        let view = self.clone();
        on_event(&form, "submit", move |e: Event| {
            e.prevent_default();
            // El campo se limpia siempre, exista o no el producto
            let raw = match get_input_by_id(CODE_INPUT_ID) {
                Some(input) => {
                    let value = input.value();
                    input.set_value("");
                    value
                }
                None => String::new(),
            };

            let view = view.clone();
            spawn_local(async move {
                let outcome = view
                    .form
                    .submit(&raw, &DomCatalog, view.api.as_ref(), &view.store)
                    .await;
                if let Some(message) = outcome.status_message() {
                    view.show_message(message);
                }
                focus_code_input();
            });
        })
    }

    fn show_message(&self, message: StatusMessage) {
        let element = match get_element_by_id(FORM_MSG_ID) {
            Some(element) => element,
            None => return,
        };

        set_text_content(&element, &message.text);
        let styled = remove_class(&element, MessageKind::Ok.css_class())
            .and_then(|_| remove_class(&element, MessageKind::Error.css_class()))
            .and_then(|_| add_class(&element, message.kind.css_class()))
            .and_then(|_| set_style(&element, "opacity", "1"));
        if let Err(e) = styled {
            log::warn!("⚠️ [CODE] No se pudo mostrar #{}: {:?}", FORM_MSG_ID, e);
        }

        let token = self.banner.borrow_mut().show(message);

        let banner = self.banner.clone();
        let fade_ms = self.fade_ms;
        Timeout::new(self.message_ms, move || {
            if !banner.borrow_mut().fade(token) {
                return;
            }
            if let Some(element) = get_element_by_id(FORM_MSG_ID) {
                if let Err(e) = set_style(&element, "opacity", "0") {
                    log::warn!("⚠️ [CODE] No se pudo ocultar #{}: {:?}", FORM_MSG_ID, e);
                }
            }
            Timeout::new(fade_ms, move || {
                if banner.borrow_mut().clear(token) {
                    if let Some(element) = get_element_by_id(FORM_MSG_ID) {
                        set_text_content(&element, "");
                    }
                }
            })
            .forget();
        })
        .forget();
    }
}
