// ============================================================================
// PAGE SURFACE - Documento vivo + historial para la paginación
// ============================================================================

use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::{DomParser, SupportedType};

use crate::config::RegionConfig;
use crate::dom::{get_element_by_id, set_inner_html, window};
use crate::models::NavigationState;
use crate::viewmodels::{PageFragments, PageSurface};

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserSurface;

impl BrowserSurface {
    /// Marca la entrada actual del historial (replaceState)
    pub fn replace_history(&self, state: &NavigationState) {
        let result = history_state(state).and_then(|js_state| {
            window()
                .ok_or_else(|| JsValue::from_str("No window"))?
                .history()?
                .replace_state_with_url(&js_state, "", Some(&state.url))
        });
        if let Err(e) = result {
            log::warn!("⚠️ [PAGINATION] replaceState falló: {:?}", e);
        }
    }

    /// URL actual de la pestaña
    pub fn location_href(&self) -> String {
        window()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default()
    }
}

impl PageSurface for BrowserSurface {
    fn extract_fragments(&self, html: &str, regions: &RegionConfig) -> Option<PageFragments> {
        let parser = DomParser::new().ok()?;
        let parsed = parser
            .parse_from_string(html, SupportedType::TextHtml)
            .ok()?;
        let product_list = parsed.get_element_by_id(&regions.product_list_id)?;
        let pagination = parsed.get_element_by_id(&regions.pagination_id)?;
        Some(PageFragments {
            product_list: product_list.inner_html(),
            pagination: pagination.inner_html(),
        })
    }

    fn replace_region(&self, id: &str, inner_html: &str) -> bool {
        match get_element_by_id(id) {
            Some(region) => {
                set_inner_html(&region, inner_html);
                true
            }
            None => false,
        }
    }

    fn push_history(&self, state: &NavigationState) {
        let result = history_state(state).and_then(|js_state| {
            window()
                .ok_or_else(|| JsValue::from_str("No window"))?
                .history()?
                .push_state_with_url(&js_state, "", Some(&state.url))
        });
        if let Err(e) = result {
            log::warn!("⚠️ [PAGINATION] pushState falló: {:?}", e);
        }
    }

    fn navigate(&self, url: &str) {
        let result = window()
            .ok_or_else(|| JsValue::from_str("No window"))
            .and_then(|w| w.location().assign(url));
        if let Err(e) = result {
            log::error!("❌ [PAGINATION] No se pudo navegar a {}: {:?}", url, e);
        }
    }
}

/// `{ajax, url}` como objeto JS para el historial
fn history_state(state: &NavigationState) -> Result<JsValue, JsValue> {
    let obj = Object::new();
    Reflect::set(&obj, &JsValue::from_str("ajax"), &JsValue::from_bool(state.ajax))?;
    Reflect::set(&obj, &JsValue::from_str("url"), &JsValue::from_str(&state.url))?;
    Ok(obj.into())
}

/// Lee el estado de un popstate; `None` si no es una entrada nuestra
pub fn navigation_state_from(value: &JsValue) -> Option<NavigationState> {
    if value.is_null() || value.is_undefined() {
        return None;
    }
    let url = Reflect::get(value, &JsValue::from_str("url")).ok()?.as_string()?;
    let ajax = Reflect::get(value, &JsValue::from_str("ajax"))
        .ok()
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    Some(NavigationState { ajax, url })
}
