// ============================================================================
// EVENT HANDLING - Sistema de eventos
// ============================================================================
// closure.forget() deja el closure vivo mientras dure la página, aunque el
// elemento salga del documento. Por eso solo se registran listeners en
// contenedores estables (delegación) o en window/document, una vez cada uno.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, KeyboardEvent, MouseEvent};

/// Registra un listener genérico y lo mantiene vivo
pub fn on_event<E, F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let mut handler = handler;
    let closure = Closure::wrap(Box::new(move |e: Event| {
        if let Ok(e) = e.dyn_into::<E>() {
            handler(e);
        }
    }) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    // Nota: closure.forget() es necesario para mantener el closure vivo en Rust WASM
    closure.forget();
    Ok(())
}

/// Helper para crear click handler simple
pub fn on_click<F>(target: &EventTarget, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    on_event::<MouseEvent, _>(target, "click", handler)
}

/// Helper para `keydown`
pub fn on_keydown<F>(target: &EventTarget, handler: F) -> Result<(), JsValue>
where
    F: FnMut(KeyboardEvent) + 'static,
{
    on_event::<KeyboardEvent, _>(target, "keydown", handler)
}

/// Click sin teclas modificadoras y con el botón principal
pub fn is_plain_click(e: &MouseEvent) -> bool {
    e.button() == 0 && !(e.ctrl_key() || e.meta_key() || e.shift_key() || e.alt_key())
}
