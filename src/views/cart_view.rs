// ============================================================================
// CART VIEW - Filas del carrito + contadores (tipos / unidades)
// ============================================================================
// `cart_view_model` es función pura del carrito; el render DOM la consume en
// cada notificación del CartStore.
// ============================================================================

use crate::models::{parse_quantity, Cart};
use crate::state::CartStore;

pub const EMPTY_CART_TEXT: &str = "Aún no hay productos en la salida.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartRow {
    pub code: String,
    pub name: String,
    pub quantity: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CartSummary {
    /// Códigos distintos
    pub kinds: usize,
    /// Suma de cantidades
    pub units: u64,
    pub show_empty_hint: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartViewModel {
    pub rows: Vec<CartRow>,
    pub summary: CartSummary,
}

pub fn cart_view_model(cart: &Cart) -> CartViewModel {
    let rows = cart
        .lines()
        .map(|line| CartRow {
            code: line.code,
            name: line.name,
            quantity: line.quantity,
        })
        .collect();
    let kinds = cart.kinds();
    CartViewModel {
        rows,
        summary: CartSummary {
            kinds,
            units: cart.units(),
            show_empty_hint: kinds == 0,
        },
    }
}

/// Controles de cada fila
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowAction {
    Decrement,
    Increment,
    /// Texto escrito en el campo de cantidad
    Edit(String),
    Remove,
}

/// Aplica la acción y devuelve la cantidad que debe mostrar la fila
/// (`None` si la línea ya no existe)
pub fn apply_row_action(store: &CartStore, code: &str, action: RowAction) -> Option<u32> {
    match action {
        RowAction::Decrement => {
            store.decrement(code);
        }
        RowAction::Increment => {
            store.increment(code);
        }
        RowAction::Edit(raw) => {
            store.set_quantity(code, i64::from(parse_quantity(&raw)));
        }
        RowAction::Remove => {
            store.remove(code);
        }
    }
    store.cart().get(code).map(|line| line.quantity)
}

/// Control de una fila del carrito, marcado en el DOM por atributo o clase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowControl {
    Decrement,
    Increment,
    Remove,
    QuantityField,
}

impl RowControl {
    /// Selector CSS de cada control, en orden de búsqueda desde el target
    pub const SELECTORS: [(&'static str, RowControl); 4] = [
        ("[data-dec]", RowControl::Decrement),
        ("[data-inc]", RowControl::Increment),
        (".trash", RowControl::Remove),
        (".qty-input", RowControl::QuantityField),
    ];
}

/// Traduce un evento delegado (`click`/`change`) sobre un control a su acción.
/// El campo de cantidad solo actúa en `change`; los botones solo en `click`.
pub fn delegated_action(event_type: &str, control: RowControl, field_value: &str) -> Option<RowAction> {
    match (event_type, control) {
        ("click", RowControl::Decrement) => Some(RowAction::Decrement),
        ("click", RowControl::Increment) => Some(RowAction::Increment),
        ("click", RowControl::Remove) => Some(RowAction::Remove),
        ("change", RowControl::QuantityField) => Some(RowAction::Edit(field_value.to_string())),
        _ => None,
    }
}

#[cfg(target_arch = "wasm32")]
pub use dom_render::CartView;

#[cfg(target_arch = "wasm32")]
mod dom_render {
    use std::rc::Rc;

    use super::{
        apply_row_action, cart_view_model, delegated_action, CartRow, CartSummary, RowControl,
        EMPTY_CART_TEXT,
    };
    use crate::dom::{
        append_child, get_attribute, get_element_by_id, on_event, set_inner_html, set_style,
        set_text_content, BindingRegistry, ElementBuilder,
    };
    use crate::state::CartStore;
    use crate::utils::constants::*;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{Element, Event, HtmlInputElement};

    /// Render del panel del carrito.
    /// Las filas no llevan listeners: un solo par click/change delegado por
    /// contenedor `#cartList`.
    #[derive(Clone)]
    pub struct CartView {
        store: CartStore,
        delegated: Rc<BindingRegistry<Element>>,
    }

    impl CartView {
        pub fn new(store: CartStore) -> Self {
            Self {
                store,
                delegated: Rc::new(BindingRegistry::new()),
            }
        }

        pub fn render(&self) -> Result<(), JsValue> {
            let model = cart_view_model(&self.store.cart());
            render_summary(&model.summary)?;

            // Páginas sin panel de carrito: solo contadores
            let list = match get_element_by_id(CART_LIST_ID) {
                Some(list) => list,
                None => return Ok(()),
            };
            self.ensure_delegation(&list);

            set_inner_html(&list, "");
            if model.rows.is_empty() {
                let hint = ElementBuilder::new("div")?
                    .class("subtext")
                    .attr("style", "padding:14px")?
                    .text(EMPTY_CART_TEXT)
                    .build();
                append_child(&list, &hint)?;
                return Ok(());
            }

            for row in &model.rows {
                append_child(&list, &render_row(row)?)?;
            }
            Ok(())
        }

        /// Enlaza los listeners delegados una vez por elemento contenedor
        fn ensure_delegation(&self, list: &Element) {
            self.delegated.retain(|element| element.is_connected());
            let view = self.clone();
            self.delegated.attach_with(list.clone(), move |list| {
                ["click", "change"].iter().all(|event_type| {
                    let view = view.clone();
                    on_event(list, event_type, move |e: Event| view.handle_row_event(&e))
                        .map_err(|e| log::error!("❌ [CART] Error enlazando #{}: {:?}", CART_LIST_ID, e))
                        .is_ok()
                })
            });
        }

        fn handle_row_event(&self, e: &Event) {
            let target = match e.target().and_then(|t| t.dyn_into::<Element>().ok()) {
                Some(target) => target,
                None => return,
            };
            let code = match target
                .closest(".cart-row")
                .ok()
                .flatten()
                .and_then(|row| get_attribute(&row, DATA_CODE_ATTR))
            {
                Some(code) => code,
                None => return,
            };
            let control = RowControl::SELECTORS.iter().find_map(|(selector, control)| {
                target.closest(selector).ok().flatten().map(|el| (*control, el))
            });
            let (control, element) = match control {
                Some(found) => found,
                None => return,
            };

            let field = element.dyn_into::<HtmlInputElement>().ok();
            let value = field.as_ref().map(|f| f.value()).unwrap_or_default();
            let action = match delegated_action(&e.type_(), control, &value) {
                Some(action) => action,
                None => return,
            };

            // Sin cambio en el store no hay re-render: se corrige el campo a mano
            if let (Some(quantity), Some(field)) = (apply_row_action(&self.store, &code, action), field) {
                field.set_value(&quantity.to_string());
            }
        }
    }

    fn render_row(row: &CartRow) -> Result<Element, JsValue> {
        let qty_box = ElementBuilder::new("div")?
            .class("qty-box")
            .child(ElementBuilder::new("div")?.class("qty-btn").data("dec", "")?.text("-").build())?
            .child(
                ElementBuilder::new("input")?
                    .class("qty-input")
                    .attr("value", &row.quantity.to_string())?
                    .attr("inputmode", "numeric")?
                    .build(),
            )?
            .child(ElementBuilder::new("div")?.class("qty-btn").data("inc", "")?.text("+").build())?
            .build();

        let label = ElementBuilder::new("div")?
            .child(
                ElementBuilder::new("div")?
                    .attr("style", "font-weight:600")?
                    .text(&row.name)
                    .build(),
            )?
            .child(
                ElementBuilder::new("div")?
                    .class("subtext")
                    .text(&format!("Código: {}", row.code))
                    .build(),
            )?
            .build();

        let trash = ElementBuilder::new("div")?
            .class("trash")
            .attr("title", "Quitar")?
            .child(ElementBuilder::new("i")?.class("fas fa-times").build())?
            .build();

        Ok(ElementBuilder::new("div")?
            .class("cart-row")
            .data("code", &row.code)?
            .child(qty_box)?
            .child(label)?
            .child(trash)?
            .build())
    }

    fn render_summary(summary: &CartSummary) -> Result<(), JsValue> {
        if let Some(kinds) = get_element_by_id(KINDS_ID) {
            set_text_content(&kinds, &summary.kinds.to_string());
        }
        if let Some(units) = get_element_by_id(UNITS_ID) {
            set_text_content(&units, &summary.units.to_string());
        }
        if let Some(hint) = get_element_by_id(EMPTY_HINT_ID) {
            let display = if summary.show_empty_hint { "block" } else { "none" };
            set_style(&hint, "display", display)?;
        }
        Ok(())
    }
}
