// ============================================================================
// PAGINATION VIEW - Links de #pagination y botones atrás/adelante
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlAnchorElement, MouseEvent, PopStateEvent};

use crate::dom::{
    get_element_by_id, is_plain_click, navigation_state_from, on_click, on_event, window,
    BrowserSurface,
};
use crate::services::ApiClient;
use crate::viewmodels::{classify_link, LinkClick, LinkDecision, PaginationController, SwapOutcome};

#[derive(Clone)]
pub struct PaginationView {
    controller: PaginationController,
    api: Rc<ApiClient>,
    surface: BrowserSurface,
}

impl PaginationView {
    pub fn new(controller: PaginationController, api: Rc<ApiClient>) -> Self {
        Self {
            controller,
            api,
            surface: BrowserSurface,
        }
    }

    /// Marca la entrada inicial y registra los listeners (una sola vez)
    pub fn mount(&self) -> Result<(), JsValue> {
        self.surface.replace_history(&self.controller.initial_state());

        // Delegación en el contenedor: su contenido se reemplaza en cada swap
        if let Some(region) = get_element_by_id(&self.controller.regions().pagination_id) {
            let view = self.clone();
            on_click(&region, move |e: MouseEvent| view.handle_click(&e))?;
        } else {
            log::debug!("ℹ️ [PAGINATION] Página sin paginación");
        }

        if let Some(win) = window() {
            let view = self.clone();
            on_event(&win, "popstate", move |e: PopStateEvent| {
                let state = navigation_state_from(&e.state());
                let location = view.surface.location_href();
                let view = view.clone();
                spawn_local(async move {
                    let outcome = view
                        .controller
                        .restore(state, &location, view.api.as_ref(), &view.surface)
                        .await;
                    log_outcome(&outcome);
                });
            })?;
        }
        Ok(())
    }

    fn handle_click(&self, e: &MouseEvent) {
        let anchor = match e
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|t| t.closest("a").ok().flatten())
            .and_then(|a| a.dyn_into::<HtmlAnchorElement>().ok())
        {
            Some(anchor) => anchor,
            None => return,
        };

        let href_attr = anchor.get_attribute("href");
        let resolved = anchor.href();
        let target = anchor.get_attribute("target");
        let click = LinkClick {
            href_attr: href_attr.as_deref(),
            resolved_url: &resolved,
            target: target.as_deref(),
            modified: !is_plain_click(e),
        };

        if let LinkDecision::Intercept(url) = classify_link(&click) {
            e.prevent_default();
            let view = self.clone();
            spawn_local(async move {
                let outcome = view
                    .controller
                    .follow(&url, view.api.as_ref(), &view.surface)
                    .await;
                log_outcome(&outcome);
            });
        }
    }
}

fn log_outcome(outcome: &SwapOutcome) {
    match outcome {
        SwapOutcome::Swapped { url } => log::debug!("📄 [PAGINATION] Mostrando {}", url),
        SwapOutcome::FellBack { url, reason } => {
            log::debug!("📄 [PAGINATION] Recarga completa de {} ({})", url, reason)
        }
        SwapOutcome::Unchanged => log::debug!("📄 [PAGINATION] Sin cambios"),
    }
}
