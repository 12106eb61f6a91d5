// ============================================================================
// APP - Montaje de la página de salidas
// ============================================================================
// Orden:
//   config → carrito hidratado → render inicial → modal + botones del listado
//   → formulario de código → registrar/vaciar → paginación
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Event;

use crate::config::{AppConfig, PageConfig, CONFIG};
use crate::dom::{meta_content, on_event, window, BrowserSurface};
use crate::services::{ApiClient, BrowserStore, CartPersistence, KeyValueStore, MemoryStore};
use crate::state::CartStore;
use crate::utils::constants::{CSRF_HEADER_META, CSRF_TOKEN_META};
use crate::viewmodels::{PaginationController, PostSwapSteps};
use crate::views::{CartView, CodeEntryView, PaginationView, QuantityModalView, SubmissionView};

/// Aplicación principal
pub struct App {
    store: CartStore,
    cart_view: CartView,
    modal_view: QuantityModalView,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let config: AppConfig = CONFIG.clone();

        // Sin localStorage (modo privado, cuota) el carrito vive solo en memoria
        let backend: Rc<dyn KeyValueStore> = if BrowserStore::is_available() {
            Rc::new(BrowserStore)
        } else {
            log::warn!("⚠️ [APP] localStorage no disponible, carrito solo en memoria");
            Rc::new(MemoryStore::new())
        };
        let store = CartStore::open(CartPersistence::new(backend, config.cart_storage_key.as_str()));

        let cart_view = CartView::new(store.clone());
        let modal_view = QuantityModalView::new(store.clone(), &config.regions.product_list_id);

        Ok(Self {
            store,
            cart_view,
            modal_view,
        })
    }

    /// Registra todos los listeners de la página. Llamar una sola vez.
    pub fn mount(&self) -> Result<(), JsValue> {
        let config: AppConfig = CONFIG.clone();
        let page = PageConfig::from_meta(meta_content(CSRF_TOKEN_META), meta_content(CSRF_HEADER_META));
        let api = Rc::new(ApiClient::new(&config));

        {
            let cart_view = self.cart_view.clone();
            self.store.subscribe(move || {
                if let Err(e) = cart_view.render() {
                    log::error!("❌ [CART] Error renderizando carrito: {:?}", e);
                }
            });
        }
        self.cart_view.render()?;

        self.modal_view.mount()?;
        self.modal_view.bind_product_list()?;

        CodeEntryView::new(&config, self.store.clone(), api.clone()).mount()?;
        SubmissionView::new(self.store.clone(), api.clone(), page).mount()?;

        let steps = {
            let modal_view = self.modal_view.clone();
            let cart_view = self.cart_view.clone();
            PostSwapSteps {
                rebind_product_list: Rc::new(move || {
                    if let Err(e) = modal_view.bind_product_list() {
                        log::error!("❌ [MODAL] Error enlazando listado: {:?}", e);
                    }
                }),
                rerender_cart: Rc::new(move || {
                    if let Err(e) = cart_view.render() {
                        log::error!("❌ [CART] Error renderizando carrito: {:?}", e);
                    }
                }),
            }
        };
        let controller =
            PaginationController::new(config.regions.clone(), &BrowserSurface.location_href(), steps);
        PaginationView::new(controller, api).mount()?;

        // Guardado final al salir de la página
        if let Some(win) = window() {
            for event in ["pagehide", "beforeunload"] {
                let store = self.store.clone();
                on_event(&win, event, move |_e: Event| store.flush())?;
            }
        }

        log::info!("✅ [APP] Página de salidas lista");
        Ok(())
    }
}
