// ============================================================================
// SALIDAS PWA - CARRITO DE SALIDAS DE INVENTARIO (RUST PURO)
// ============================================================================
// Arquitectura MVVM:
// - Views: render DOM y listeners (solo wasm32)
// - ViewModels: lógica UI sin DOM (modal, código, envío, paginación)
// - Services: HTTP y almacenamiento detrás de traits
// - State: CartStore con Rc<RefCell> + suscriptores
// - Models: carrito y estructuras compartidas con el backend
// ============================================================================

pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod viewmodels;
pub mod views;
pub mod dom;
pub mod utils;

#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;
    use wasm_logger::Config;

    use crate::app::App;

    // Instancia global: los listeners guardan sus propios clones del estado
    thread_local! {
        static APP: RefCell<Option<App>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        // Inicializar panic hook para mejor debugging
        console_error_panic_hook::set_once();

        // Inicializar logging
        wasm_logger::init(Config::default());
        log::info!("🚀 Salidas - Rust Puro + MVVM");

        let app = App::new()?;
        app.mount()?;

        APP.with(|app_cell| {
            *app_cell.borrow_mut() = Some(app);
        });
        Ok(())
    }
}
