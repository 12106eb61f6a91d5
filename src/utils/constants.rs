// ============================================================================
// CONSTANTES DE LA PÁGINA - IDs y selectores que entrega el servidor
// ============================================================================

// Modal de cantidad
pub const QTY_POP_ID: &str = "qtyPop";
pub const QTY_BACKDROP_ID: &str = "qtyBackdrop";
pub const QTY_CLOSE_BTN_ID: &str = "qtyCloseBtn";
pub const CANCEL_QTY_BTN_ID: &str = "cancelQtyBtn";
pub const QTY_INPUT_ID: &str = "qtyInput";
pub const ADD_TO_CART_BTN_ID: &str = "addToCartBtn";

// Agregar por código
pub const ADD_BY_CODE_FORM_ID: &str = "addByCodeForm";
pub const CODE_INPUT_ID: &str = "codeInput";
pub const FORM_MSG_ID: &str = "formMsg";

// Carrito
pub const CART_LIST_ID: &str = "cartList";
pub const KINDS_ID: &str = "kinds";
pub const UNITS_ID: &str = "units";
pub const EMPTY_HINT_ID: &str = "emptyHint";
pub const BTN_VACIAR_ID: &str = "btnVaciar";
pub const BTN_REGISTRAR_ID: &str = "btnRegistrar";

// Metadatos de la salida
pub const MOTIVO_ID: &str = "motivo";
pub const REFERENCIA_ID: &str = "referencia";
pub const USUARIO_ID: &str = "usuario";

// Listado de productos
pub const PRODUCT_ROW_SELECTOR: &str = ".product-row";
pub const OPEN_QTY_SELECTOR: &str = "[data-open-qty]";
pub const DATA_CODE_ATTR: &str = "data-code";
pub const DATA_NAME_ATTR: &str = "data-name";

// CSRF
pub const CSRF_TOKEN_META: &str = "_csrf";
pub const CSRF_HEADER_META: &str = "_csrf_header";

// Clases CSS
pub const SHOW_CLASS: &str = "show";
pub const MODAL_OPEN_BODY_CLASS: &str = "modal-open";
