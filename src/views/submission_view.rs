// ============================================================================
// SUBMISSION VIEW - Botones "Registrar" y "Vaciar"
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlButtonElement;

use crate::config::PageConfig;
use crate::dom::{get_element_by_id, input_value, on_click, window};
use crate::models::ShipmentMetadata;
use crate::services::ApiClient;
use crate::state::CartStore;
use crate::utils::constants::*;
use crate::viewmodels::SubmissionController;

#[derive(Clone)]
pub struct SubmissionView {
    controller: SubmissionController,
    store: CartStore,
    api: Rc<ApiClient>,
    page: PageConfig,
}

impl SubmissionView {
    pub fn new(store: CartStore, api: Rc<ApiClient>, page: PageConfig) -> Self {
        Self {
            controller: SubmissionController::new(),
            store,
            api,
            page,
        }
    }

    pub fn mount(&self) -> Result<(), JsValue> {
        if let Some(clear) = get_element_by_id(BTN_VACIAR_ID) {
            let store = self.store.clone();
            on_click(&clear, move |_e| {
                if store.clear() {
                    log::info!("🗑️ [CART] Carrito vaciado");
                }
            })?;
        }

        if let Some(submit) = get_element_by_id(BTN_REGISTRAR_ID) {
            let view = self.clone();
            on_click(&submit, move |_e| view.submit())?;
        }
        Ok(())
    }

    fn submit(&self) {
        let metadata = ShipmentMetadata::new(
            &input_value(MOTIVO_ID),
            &input_value(REFERENCIA_ID),
            &input_value(USUARIO_ID),
        );
        let view = self.clone();
        spawn_local(async move {
            set_submit_disabled(true);
            let outcome = view
                .controller
                .submit(metadata, &view.store, view.api.as_ref(), &view.page)
                .await;
            set_submit_disabled(view.controller.is_in_flight());
            if let Some(notice) = outcome.notice() {
                alert(&notice);
            }
        });
    }
}

fn set_submit_disabled(disabled: bool) {
    if let Some(button) = get_element_by_id(BTN_REGISTRAR_ID)
        .and_then(|b| b.dyn_into::<HtmlButtonElement>().ok())
    {
        button.set_disabled(disabled);
    }
}

fn alert(text: &str) {
    if let Some(win) = window() {
        if let Err(e) = win.alert_with_message(text) {
            log::warn!("⚠️ [SUBMIT] alert falló: {:?}", e);
        }
    }
}
