// ============================================================================
// ELEMENT HELPERS - Funciones básicas para manipular DOM
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Window};

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Obtener document
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Obtener elemento por ID
pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Obtener un `<input>` por ID
pub fn get_input_by_id(id: &str) -> Option<HtmlInputElement> {
    get_element_by_id(id)?.dyn_into::<HtmlInputElement>().ok()
}

/// Valor recortado de un `<input>`/`<textarea>`; vacío si no existe
pub fn input_value(id: &str) -> String {
    match get_element_by_id(id) {
        Some(element) => js_sys::Reflect::get(&element, &JsValue::from_str("value"))
            .ok()
            .and_then(|v| v.as_string())
            .map(|v| v.trim().to_string())
            .unwrap_or_default(),
        None => String::new(),
    }
}

/// Crear elemento
pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

/// Establecer class name (reemplaza todas las clases)
pub fn set_class_name(element: &Element, class: &str) {
    element.set_class_name(class);
}

/// Agregar clase
pub fn add_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().add_1(class)
}

/// Remover clase
pub fn remove_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().remove_1(class)
}

/// Establecer text content
pub fn set_text_content(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

/// Establecer inner HTML
pub fn set_inner_html(element: &Element, html: &str) {
    element.set_inner_html(html);
}

/// Agregar hijo
pub fn append_child(parent: &Element, child: &Element) -> Result<(), JsValue> {
    parent.append_child(child).map(|_| ())
}

/// Establecer atributo
pub fn set_attribute(element: &Element, name: &str, value: &str) -> Result<(), JsValue> {
    element.set_attribute(name, value)
}

/// Obtener atributo
pub fn get_attribute(element: &Element, name: &str) -> Option<String> {
    element.get_attribute(name)
}

/// Establecer una propiedad de estilo inline
pub fn set_style(element: &Element, property: &str, value: &str) -> Result<(), JsValue> {
    element
        .dyn_ref::<HtmlElement>()
        .ok_or_else(|| JsValue::from_str("Element is not an HtmlElement"))?
        .style()
        .set_property(property, value)
}

/// Query selector (buscar elemento por selector CSS)
pub fn query_selector(selector: &str) -> Result<Option<Element>, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))?
        .query_selector(selector)
}

/// Query selector all dentro de `scope` (o de todo el documento)
pub fn query_selector_all(scope: Option<&Element>, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = match scope {
        Some(scope) => scope.query_selector_all(selector)?,
        None => document()
            .ok_or_else(|| JsValue::from_str("No document"))?
            .query_selector_all(selector)?,
    };
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Contenido de `<meta name="...">`
pub fn meta_content(name: &str) -> Option<String> {
    query_selector(&format!("meta[name=\"{}\"]", name))
        .ok()
        .flatten()
        .and_then(|meta| meta.get_attribute("content"))
}

/// Agregar/quitar clase en `<body>`
pub fn toggle_body_class(class: &str, on: bool) -> Result<(), JsValue> {
    if let Some(body) = document().and_then(|d| d.body()) {
        body.class_list().toggle_with_force(class, on)?;
    }
    Ok(())
}
